//! Homing sequencer.
//!
//! Homing runs as a staged overlay on top of ordinary moves: each stage
//! issues one move, waits for the axis to come to rest, then the table
//! here names the next move. The switch sits at the negative end of
//! travel, so the sequence is a fast seek toward negative, a short
//! positive back-off to release the switch, and a slow approach that
//! recrosses it. Where the approach stops becomes step zero.

use super::phase::{AxisPhase, HomingStage};

/// Steps moved away from the switch after the fast seek.
pub(crate) const BACKOFF_STEPS: i32 = 50;

/// Steps of the final slow approach. Twice the back-off, so the switch is
/// recrossed from the released side.
pub(crate) const APPROACH_STEPS: i32 = -100;

/// What the sequencer does once the current stage's move has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HomingAction {
    /// Issue the back-off move; the sequence continues at
    /// [`HomingStage::BackOff`].
    BackOff,
    /// Issue the approach move at creep speed; continues at
    /// [`HomingStage::Approach`].
    Approach,
    /// The axis rests on the reference point: zero it and leave the
    /// sequence.
    Finish,
}

/// One row of the homing table. `None` while the stage's move is still
/// in flight.
pub(crate) fn next_action(stage: HomingStage, phase: AxisPhase) -> Option<HomingAction> {
    use AxisPhase as P;
    use HomingStage as S;

    match (stage, phase) {
        // fast seek done, release the switch
        (S::Fast, P::Idle) => Some(HomingAction::BackOff),

        // back-off done, creep back onto the switch
        (S::BackOff, P::Idle) => Some(HomingAction::Approach),

        // approach done, the axis rests on the reference
        (S::Approach, P::Idle) => Some(HomingAction::Finish),

        // a move is still in flight
        _ => None,
    }
}
