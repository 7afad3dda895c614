//! Encoder-based stall detection.
//!
//! Each judged window compares the full steps commanded since the last
//! judgment against the encoder ticks observed over the same window. A
//! healthy axis lands inside the configured ticks-per-step band; anything
//! outside is a strike. Strikes are counted per axis and consecutively:
//! one clean window wipes them.

/// Full steps a window must span before slip can be judged. Shorter
/// windows return [`StallCheck::TooEarly`] without advancing the
/// snapshots, so the window keeps growing until it is judgeable.
pub(crate) const MIN_JUDGE_STEPS: i32 = 10;

/// Outcome of one stall check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StallCheck {
    /// The axis has no encoder; the check is a no-op.
    NoEncoder,
    /// Too few steps since the last judgment to tell anything.
    TooEarly,
    /// Encoder travel matches the commanded steps.
    InRange,
    /// One out-of-band window; the axis backs off and retries.
    Suspected,
    /// Out of band past the strike threshold; the move must stop.
    Confirmed,
}

/// Per-axis slip judge.
///
/// Snapshots advance only when a window is actually judged, so slow axes
/// accumulate enough travel instead of flapping on sub-threshold windows.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StallDetector {
    prev_steps: i32,
    prev_encoder: i32,
    strikes: u8,
}

impl StallDetector {
    pub(crate) const fn new() -> Self {
        Self {
            prev_steps: 0,
            prev_encoder: 0,
            strikes: 0,
        }
    }

    /// Re-baseline at a known-good point (move start, homing zero,
    /// encoder reposition). Clears the strike count.
    pub(crate) fn arm(&mut self, steps: i32, encoder_ticks: i32) {
        self.prev_steps = steps;
        self.prev_encoder = encoder_ticks;
        self.strikes = 0;
    }

    /// Judge the window since the last judgment.
    ///
    /// `min_ticks`/`max_ticks` bound the healthy encoder ticks per full
    /// step; `threshold` is the consecutive strike count that confirms a
    /// stall. An encoder running against the commanded direction is
    /// treated as negative travel and always falls below the band.
    pub(crate) fn judge(
        &mut self,
        steps: i32,
        encoder_ticks: i32,
        min_ticks: u16,
        max_ticks: u16,
        threshold: u8,
    ) -> StallCheck {
        let mut d_steps = steps.wrapping_sub(self.prev_steps);
        let mut d_enc = i64::from(encoder_ticks.wrapping_sub(self.prev_encoder));
        let mut agree = true;
        if d_steps < 0 {
            d_steps = -d_steps;
            agree = !agree;
        }
        if d_steps < MIN_JUDGE_STEPS {
            return StallCheck::TooEarly;
        }
        if d_enc < 0 {
            d_enc = -d_enc;
            agree = !agree;
        }
        if !agree {
            d_enc = -d_enc;
        }

        self.prev_steps = steps;
        self.prev_encoder = encoder_ticks;

        let d_steps = i64::from(d_steps);
        if d_enc < i64::from(min_ticks) * d_steps || i64::from(max_ticks) * d_steps < d_enc {
            self.strikes = self.strikes.saturating_add(1);
            if self.strikes > threshold {
                self.strikes = 0;
                StallCheck::Confirmed
            } else {
                StallCheck::Suspected
            }
        } else {
            self.strikes = 0;
            StallCheck::InRange
        }
    }
}

impl Default for StallDetector {
    fn default() -> Self {
        Self::new()
    }
}
