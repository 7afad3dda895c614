//! Multi-axis closed-loop controller.
//!
//! One [`Controller`] owns every axis: the hardware sessions, the shared
//! atomic cells the interrupts touch, the tick-owned planning state, the
//! stall detectors, and the derived kinematic constants. Three entry
//! classes drive it:
//!
//! - **Commands** (`request_*`, [`Controller::start_homing`],
//!   [`Controller::set_encoder_position`]) validate and start work; all
//!   rejection is synchronous and leaves state untouched.
//! - **Interrupts** ([`Controller::on_microstep`],
//!   [`Controller::on_encoder_overflow`]) count movement and honor stops.
//!   They touch only the atomic cells and the axis's own hardware.
//! - **The tick** ([`Controller::tick`]) runs the speed ramps, the stall
//!   checks, the keep-position hold, and the homing sequencer. Call it
//!   at least once per [`TICK_INTERVAL_MS`]; it rate-limits itself.
//!
//! Later failures (stall, homing abort) surface through
//! [`Controller::phase`] and the status sink, never as callbacks.

use core::fmt::Write;

use crate::axis::{
    next_action, AxisPhase, AxisShared, AxisState, HomingAction, HomingStage, MotionIntent,
    StallCheck, StallDetector, APPROACH_STEPS, BACKOFF_STEPS,
};
use crate::config::{AxisConfig, Kinematics, Millis};
use crate::error::{MotionError, Result};
use crate::hal::{AxisHardware, NullSink, StatusSink};
use crate::motion::{accel_ramp, decel_ramp, Direction, MoveGeometry, TimerScale};

/// Scheduler cadence, milliseconds. Ticks arriving closer than this to
/// the previous effective tick are ignored.
pub const TICK_INTERVAL_MS: u32 = 10;

/// Closed-loop controller for `N` stepper axes.
///
/// `HW` is the per-axis hardware session, `S` the status sink.
/// Construction trusts its configuration; run [`crate::validate_config`]
/// (or load through [`crate::load_config`]) first.
///
/// Every method taking an `axis` index panics if `axis >= N`.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_axes::{Controller, Millis, TimerScale};
///
/// let scale = TimerScale::new(1_000_000, 20);
/// let mut ctl = Controller::new(hardware, scale, axes);
///
/// ctl.request_absolute_move(0, 1500)?;
/// loop {
///     // interrupt context calls ctl.on_microstep(0) / ctl.on_encoder_overflow(0)
///     ctl.tick(Millis(now_ms()));
///     if ctl.phase(0) == stepper_axes::AxisPhase::Idle {
///         break;
///     }
/// }
/// ```
pub struct Controller<HW, S, const N: usize> {
    hw: [HW; N],
    sink: S,
    scale: TimerScale,
    config: [AxisConfig; N],
    kinematics: [Kinematics; N],
    shared: [AxisShared; N],
    state: [AxisState; N],
    stall: [StallDetector; N],
    /// Latest timestamp seen; commands issued between ticks borrow it
    /// for ramp starts.
    clock: Millis,
    last_tick: Millis,
}

impl<HW, const N: usize> Controller<HW, NullSink, N>
where
    HW: AxisHardware,
{
    /// Build a controller that discards status lines.
    pub fn new(hw: [HW; N], scale: TimerScale, config: [AxisConfig; N]) -> Self {
        Self::with_sink(hw, scale, config, NullSink)
    }
}

impl<HW, S, const N: usize> Controller<HW, S, N>
where
    HW: AxisHardware,
    S: StatusSink,
{
    /// Build a controller with a status sink.
    ///
    /// Stops every step timer and applies the hold policy: axes with
    /// `hold_on_stop` are energized immediately, the rest released.
    pub fn with_sink(mut hw: [HW; N], scale: TimerScale, config: [AxisConfig; N], sink: S) -> Self {
        let kinematics = core::array::from_fn(|i| Kinematics::from_config(&config[i]));
        for (session, cfg) in hw.iter_mut().zip(config.iter()) {
            session.timer_stop();
            if cfg.hold_on_stop {
                session.energize();
            } else {
                session.release();
            }
        }
        Self {
            hw,
            sink,
            scale,
            config,
            kinematics,
            shared: core::array::from_fn(|_| AxisShared::new()),
            state: [AxisState::idle(); N],
            stall: [StallDetector::new(); N],
            clock: Millis(0),
            last_tick: Millis(0),
        }
    }

    // ---- commands ----

    /// Start a move to an absolute step position.
    ///
    /// Rejected with `NotIdle` while the axis is moving or faulted, and
    /// with `OutOfRange` when `|target|` exceeds the travel bound or the
    /// target equals the current position. Rejection mutates nothing.
    pub fn request_absolute_move(&mut self, axis: usize, target: i32) -> Result<()> {
        self.begin_move(axis, target)?;
        self.state[axis].intent = MotionIntent::Direct;
        Ok(())
    }

    /// Start a move relative to the current step position.
    pub fn request_relative_move(&mut self, axis: usize, delta: i32) -> Result<()> {
        self.begin_relative(axis, delta)?;
        self.state[axis].intent = MotionIntent::Direct;
        Ok(())
    }

    /// Latch a stop request; fire and forget.
    ///
    /// The axis reaches idle at its next full-step boundary, not
    /// instantaneously: poll [`Controller::phase`] for confirmation. The
    /// remaining move distance is discarded (`target` freezes to wherever
    /// the axis stopped).
    pub fn request_stop(&self, axis: usize) {
        self.shared[axis].request_stop();
    }

    /// Start the homing sequence: a fast seek to the negative travel
    /// bound, a short back-off once the limit switch stops it, then a
    /// slow approach; where the approach stops becomes position zero.
    ///
    /// Rejections of the fast seek (`NotIdle`, `OutOfRange`) propagate
    /// directly and mutate nothing. A stage failing to launch later in
    /// the sequence parks the axis in [`AxisPhase::Fault`] and reports
    /// `HomingAborted` through the sink.
    pub fn start_homing(&mut self, axis: usize) -> Result<()> {
        let travel = self.kinematics[axis].travel;
        self.begin_move(axis, -travel)?;
        self.state[axis].intent = MotionIntent::Homing(HomingStage::Fast);
        Self::status(&mut self.sink, axis, format_args!("homing fast"));
        Ok(())
    }

    /// Reposition the encoder while the axis rests.
    ///
    /// Splits `position` into the hardware counter remainder (wrapping
    /// once per revolution) and the accumulated base, and refreshes the
    /// stall snapshot. Fails `NotIdle` on a moving axis without touching
    /// anything; a no-op on axes without an encoder.
    pub fn set_encoder_position(&mut self, axis: usize, position: i32) -> Result<()> {
        let phase = self.shared[axis].phase();
        if phase != AxisPhase::Idle {
            return Err(MotionError::NotIdle(phase).into());
        }
        let Some(ticks_per_rev) = self.config[axis]
            .encoder
            .as_ref()
            .map(|enc| enc.ticks_per_rev as i32)
        else {
            return Ok(());
        };

        let remain = position.rem_euclid(ticks_per_rev);
        self.hw[axis].set_encoder_count(remain as u32);
        self.shared[axis].set_encoder_base(position - remain);
        self.stall[axis].arm(self.shared[axis].position(), position);
        Self::status(
            &mut self.sink,
            axis,
            format_args!(
                "encoder={} remain={} base={}",
                position,
                remain,
                position - remain
            ),
        );
        Ok(())
    }

    /// Re-derive every axis from its configuration, exactly like
    /// construction: timers stopped, latches and partial-step counters
    /// cleared, speeds zeroed, phases returned to idle (this is the
    /// recovery path out of [`AxisPhase::Fault`]), hold policy
    /// re-applied. Positions survive.
    pub fn reinit(&mut self) {
        for axis in 0..N {
            self.hw[axis].timer_stop();
            self.kinematics[axis] = Kinematics::from_config(&self.config[axis]);
            let shared = &self.shared[axis];
            shared.clear_stop();
            shared.set_direction(Direction::Positive);
            shared.set_phase(AxisPhase::Idle);
            shared.reset_microstep();
            self.state[axis] = AxisState::idle();
            if self.config[axis].hold_on_stop {
                self.hw[axis].energize();
            } else {
                self.hw[axis].release();
            }
        }
    }

    // ---- queries ----

    /// Profile phase of an axis.
    pub fn phase(&self, axis: usize) -> AxisPhase {
        self.shared[axis].phase()
    }

    /// Why the axis is moving. `Direct` is retired to `Idle` by the tick
    /// that observes the move finished.
    pub fn intent(&self, axis: usize) -> MotionIntent {
        self.state[axis].intent
    }

    /// Position fused from the encoder when one is configured (rounded
    /// half away from zero), the raw step counter otherwise.
    pub fn position(&self, axis: usize) -> i32 {
        match self.kinematics[axis].ticks_per_step {
            Some(tps) if tps > 0 => {
                let ticks = self.encoder_raw(axis);
                let bias = tps / 2;
                if ticks < 0 {
                    (ticks - bias) / tps
                } else {
                    (ticks + bias) / tps
                }
            }
            _ => self.shared[axis].position(),
        }
    }

    /// Raw step-counted position.
    pub fn step_position(&self, axis: usize) -> i32 {
        self.shared[axis].position()
    }

    /// Raw encoder ticks (base plus hardware counter); `None` without an
    /// encoder.
    pub fn encoder_ticks(&self, axis: usize) -> Option<i32> {
        self.config[axis].encoder.as_ref()?;
        Some(self.encoder_raw(axis))
    }

    /// Steps left to the target (`target − position`).
    pub fn remaining_steps(&self, axis: usize) -> i32 {
        self.shared[axis]
            .target()
            .wrapping_sub(self.shared[axis].position())
    }

    /// Realized commanded speed, full steps/s. Diagnostic: the value
    /// reflects the last timer programming and keeps it after a stop.
    pub fn speed(&self, axis: usize) -> u32 {
        self.state[axis].current_speed
    }

    /// Configuration of one axis.
    pub fn axis_config(&self, axis: usize) -> &AxisConfig {
        &self.config[axis]
    }

    /// The hardware sessions, for composed platforms.
    pub fn hardware(&self) -> &[HW; N] {
        &self.hw
    }

    /// Mutable hardware sessions, for composed platforms and simulators.
    pub fn hardware_mut(&mut self) -> &mut [HW; N] {
        &mut self.hw
    }

    // ---- interrupt context ----

    /// Count one microstep pulse; call from the axis's step-timer
    /// interrupt.
    ///
    /// Evaluates the limit-switch policy, advances the step position once
    /// per `microsteps` pulses, and ends the move at the target or on a
    /// latched stop: timer off, phase idle, windings released unless
    /// `hold_on_stop`, and on a manual stop the target frozen to the
    /// stop position. Everything shared with the tick context lives in
    /// atomics; the hardware session and sink must not be driven from
    /// another context concurrently.
    pub fn on_microstep(&mut self, axis: usize) {
        let policy = self.config[axis].limit_switch;
        if self.hw[axis].limit_active() && policy.should_stop(self.shared[axis].direction()) {
            self.shared[axis].request_stop();
        }

        if !self.shared[axis].advance_microstep(self.config[axis].microsteps.value()) {
            return;
        }
        self.shared[axis].step();

        let position = self.shared[axis].position();
        let target = self.shared[axis].target();
        let stop_requested = self.shared[axis].stop_requested();
        let at_target = self.shared[axis].direction().has_reached(position, target);
        if stop_requested || at_target {
            if stop_requested {
                self.shared[axis].set_target(position);
            }
            self.shared[axis].clear_stop();
            self.hw[axis].timer_stop();
            if !self.config[axis].hold_on_stop {
                self.hw[axis].release();
            }
            self.shared[axis].set_phase(AxisPhase::Idle);
            Self::status(&mut self.sink, axis, format_args!("stop @{}", position));
        }
    }

    /// Fold one hardware-counter wrap into the encoder base; call from
    /// the encoder timer's overflow interrupt.
    pub fn on_encoder_overflow(&mut self, axis: usize) {
        let Some((ticks, reversed)) = self.config[axis]
            .encoder
            .as_ref()
            .map(|enc| (enc.ticks_per_rev as i32, enc.reverse))
        else {
            return;
        };
        let mut down = self.hw[axis].encoder_counting_down();
        if reversed {
            down = !down;
        }
        self.shared[axis].add_encoder_base(if down { -ticks } else { ticks });
    }

    // ---- scheduler tick ----

    /// Advance every axis. Call at least once per [`TICK_INTERVAL_MS`];
    /// calls arriving early return immediately (rate limiter, not a
    /// scheduler — missed intervals are not made up).
    pub fn tick(&mut self, now: Millis) {
        self.clock = now;
        if now.since(self.last_tick) < TICK_INTERVAL_MS {
            return;
        }
        self.last_tick = now;
        for axis in 0..N {
            self.check_axis(axis, now);
            self.observe_homing(axis);
        }
    }

    // ---- internals ----

    fn check_axis(&mut self, axis: usize, now: Millis) {
        match self.shared[axis].phase() {
            AxisPhase::Idle => {
                if self.state[axis].intent == MotionIntent::Direct {
                    self.state[axis].intent = MotionIntent::Idle;
                }
                self.hold_position(axis);
            }
            AxisPhase::Accelerating => {
                if stall_clear(self.check_stall(axis, now)) {
                    let min = self.kinematics[axis].min_speed;
                    let max = self.kinematics[axis].max_speed;
                    let accel = self.kinematics[axis].acceleration;
                    let elapsed = now.since(self.state[axis].accel_start);
                    let speed = accel_ramp(min, accel, elapsed);
                    if speed >= max {
                        self.state[axis].current_speed = max;
                        self.shared[axis].set_phase(AxisPhase::Cruising);
                        let position = self.shared[axis].position();
                        Self::status(
                            &mut self.sink,
                            axis,
                            format_args!("-> cruise @{} v={}", position, max),
                        );
                    } else {
                        self.state[axis].current_speed = speed;
                    }
                    self.apply_speed(axis);
                }
                // the deceleration point can arrive mid-ramp (triangle)
                let position = self.shared[axis].position();
                if self.state[axis].geometry.past_decel_start(position) {
                    self.enter_decel(axis, now);
                }
            }
            AxisPhase::Cruising => {
                if stall_clear(self.check_stall(axis, now)) {
                    let position = self.shared[axis].position();
                    if self.state[axis].geometry.past_decel_start(position) {
                        self.enter_decel(axis, now);
                    }
                }
            }
            AxisPhase::Decelerating => {
                if stall_clear(self.check_stall(axis, now)) {
                    let min = self.kinematics[axis].min_speed;
                    let accel = self.kinematics[axis].acceleration;
                    let elapsed = now.since(self.state[axis].accel_start);
                    let speed = decel_ramp(self.state[axis].start_speed, accel, elapsed);
                    if speed > min {
                        self.state[axis].current_speed = speed;
                    } else {
                        self.state[axis].current_speed = min;
                        self.shared[axis].set_phase(AxisPhase::Creeping);
                        let position = self.shared[axis].position();
                        Self::status(&mut self.sink, axis, format_args!("-> creep @{}", position));
                    }
                    self.apply_speed(axis);
                }
            }
            AxisPhase::Creeping | AxisPhase::Fault => {}
        }
    }

    /// Keep-position hold: while the axis rests with no intent, trust
    /// the encoder over the step counter and re-issue the move if the
    /// axis was pushed off target.
    fn hold_position(&mut self, axis: usize) {
        if !self.config[axis].keep_position
            || self.state[axis].intent != MotionIntent::Idle
            || self.kinematics[axis].ticks_per_step.is_none()
        {
            return;
        }
        let fused = self.position(axis);
        let counted = self.shared[axis].position();
        if fused != counted {
            Self::status(
                &mut self.sink,
                axis,
                format_args!("drift {} step {} -> {}", fused - counted, counted, fused),
            );
            self.shared[axis].set_position(fused);
        }
        let target = self.shared[axis].target();
        if target != fused {
            Self::status(
                &mut self.sink,
                axis,
                format_args!("hold at={} want={}", fused, target),
            );
            let _ = self.begin_move(axis, target);
        }
    }

    /// Judge the axis's encoder window and act on the outcome: a
    /// suspicion halves the speed (floor `min_speed`) and re-plans the
    /// move from the current position toward the unchanged target,
    /// re-entering acceleration; a confirmation latches a stop.
    fn check_stall(&mut self, axis: usize, now: Millis) -> StallCheck {
        let (min_ticks, max_ticks, threshold) = match self.config[axis].encoder.as_ref() {
            Some(enc) => (
                enc.min_ticks_per_step,
                enc.max_ticks_per_step,
                enc.stall_threshold,
            ),
            None => return StallCheck::NoEncoder,
        };
        let steps = self.shared[axis].position();
        let ticks = self.encoder_raw(axis);
        let outcome = self.stall[axis].judge(steps, ticks, min_ticks, max_ticks, threshold);
        match outcome {
            StallCheck::Suspected => {
                let min_speed = self.kinematics[axis].min_speed;
                let accel_steps = self.kinematics[axis].accel_steps;
                let halved = (self.state[axis].current_speed / 2).max(min_speed);
                let target = self.shared[axis].target();
                let geometry = MoveGeometry::plan(steps, target, accel_steps);

                let state = &mut self.state[axis];
                state.geometry = geometry;
                state.current_speed = halved;
                state.start_speed = halved;
                state.accel_start = now;
                self.shared[axis].set_phase(AxisPhase::Accelerating);
                self.shared[axis].set_direction(geometry.direction);
                self.set_hw_direction(axis, geometry.direction);
                self.apply_speed(axis);
                let applied = self.state[axis].current_speed;
                Self::status(&mut self.sink, axis, format_args!("slip v={}", applied));
            }
            StallCheck::Confirmed => {
                self.shared[axis].request_stop();
                Self::status(&mut self.sink, axis, format_args!("stalled"));
            }
            _ => {}
        }
        outcome
    }

    fn observe_homing(&mut self, axis: usize) {
        let MotionIntent::Homing(stage) = self.state[axis].intent else {
            return;
        };
        let phase = self.shared[axis].phase();
        let Some(action) = next_action(stage, phase) else {
            return;
        };
        match action {
            HomingAction::BackOff => match self.begin_relative(axis, BACKOFF_STEPS) {
                Ok(()) => {
                    self.state[axis].intent = MotionIntent::Homing(HomingStage::BackOff);
                    Self::status(&mut self.sink, axis, format_args!("homing backoff"));
                }
                Err(_) => self.abort_homing(axis, HomingStage::BackOff),
            },
            HomingAction::Approach => match self.begin_relative(axis, APPROACH_STEPS) {
                Ok(()) => {
                    self.state[axis].intent = MotionIntent::Homing(HomingStage::Approach);
                    // the whole approach runs at creep speed
                    self.shared[axis].set_phase(AxisPhase::Creeping);
                    Self::status(&mut self.sink, axis, format_args!("homing approach"));
                }
                Err(_) => self.abort_homing(axis, HomingStage::Approach),
            },
            HomingAction::Finish => {
                self.shared[axis].set_position(0);
                self.shared[axis].set_target(0);
                self.shared[axis].set_encoder_base(0);
                self.hw[axis].set_encoder_count(0);
                self.stall[axis].arm(0, 0);
                self.state[axis].intent = MotionIntent::Idle;
                Self::status(&mut self.sink, axis, format_args!("homed"));
            }
        }
    }

    fn abort_homing(&mut self, axis: usize, stage: HomingStage) {
        self.shared[axis].set_phase(AxisPhase::Fault);
        self.state[axis].intent = MotionIntent::Idle;
        Self::status(
            &mut self.sink,
            axis,
            format_args!("homing aborted ({})", stage),
        );
    }

    /// Validate and launch a move; does not touch the intent.
    fn begin_move(&mut self, axis: usize, target: i32) -> Result<()> {
        let phase = self.shared[axis].phase();
        if phase != AxisPhase::Idle {
            Self::status(
                &mut self.sink,
                axis,
                format_args!("reject {} (busy: {})", target, phase),
            );
            return Err(MotionError::NotIdle(phase).into());
        }
        let travel = self.kinematics[axis].travel;
        let position = self.shared[axis].position();
        if target > travel || target < -travel || target == position {
            Self::status(
                &mut self.sink,
                axis,
                format_args!("reject {} (range)", target),
            );
            return Err(MotionError::OutOfRange {
                target,
                limit: self.config[axis].max_steps,
            }
            .into());
        }

        self.stall[axis].arm(position, self.encoder_raw(axis));
        let geometry = MoveGeometry::plan(position, target, self.kinematics[axis].accel_steps);
        let min_speed = self.kinematics[axis].min_speed;

        self.shared[axis].set_target(target);
        self.shared[axis].reset_microstep();
        self.shared[axis].set_direction(geometry.direction);
        self.shared[axis].set_phase(AxisPhase::Accelerating);
        self.state[axis].arm(geometry, min_speed, self.clock);
        self.set_hw_direction(axis, geometry.direction);
        self.apply_speed(axis);

        Self::status(
            &mut self.sink,
            axis,
            format_args!(
                "target={} decel={} ramp={}",
                target, geometry.decel_start, self.kinematics[axis].accel_steps
            ),
        );
        self.hw[axis].energize();
        self.hw[axis].timer_start();
        Ok(())
    }

    fn begin_relative(&mut self, axis: usize, delta: i32) -> Result<()> {
        let target = self.shared[axis].position() as i64 + delta as i64;
        if target > i32::MAX as i64 || target < i32::MIN as i64 {
            Self::status(
                &mut self.sink,
                axis,
                format_args!("reject {:+} (range)", delta),
            );
            return Err(MotionError::OutOfRange {
                target: target.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
                limit: self.config[axis].max_steps,
            }
            .into());
        }
        self.begin_move(axis, target as i32)
    }

    fn enter_decel(&mut self, axis: usize, now: Millis) {
        self.shared[axis].set_phase(AxisPhase::Decelerating);
        self.state[axis].enter_decel(now);
        let position = self.shared[axis].position();
        let speed = self.state[axis].current_speed;
        Self::status(
            &mut self.sink,
            axis,
            format_args!("-> decel @{} v={}", position, speed),
        );
    }

    /// Quantize the commanded speed, program the timer, and keep the
    /// realized value.
    fn apply_speed(&mut self, axis: usize) {
        let rate = self.scale.quantize(
            self.state[axis].current_speed,
            self.kinematics[axis].microstep_shift,
        );
        self.state[axis].current_speed = rate.speed;
        self.hw[axis].set_timer_period(rate.period);
    }

    fn set_hw_direction(&mut self, axis: usize, direction: Direction) {
        let physical = if self.config[axis].reverse {
            direction.flip()
        } else {
            direction
        };
        self.hw[axis].set_direction(physical);
    }

    fn encoder_raw(&self, axis: usize) -> i32 {
        let base = self.shared[axis].encoder_base();
        let count = self.hw[axis].encoder_count() as i32;
        let reversed = self.config[axis]
            .encoder
            .as_ref()
            .map_or(false, |enc| enc.reverse);
        if reversed {
            base - count
        } else {
            base + count
        }
    }

    fn status(sink: &mut S, axis: usize, args: core::fmt::Arguments<'_>) {
        let mut line = heapless::String::<96>::new();
        let _ = write!(line, "axis{} ", axis);
        let _ = line.write_fmt(args);
        sink.status_line(&line);
    }
}

/// Whether the profile update may proceed this tick (the stall check
/// took no corrective action).
fn stall_clear(outcome: StallCheck) -> bool {
    matches!(
        outcome,
        StallCheck::NoEncoder | StallCheck::TooEarly | StallCheck::InRange
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Microsteps;
    use crate::config::LimitPolicy;
    use crate::error::Error;

    /// Bare-bones hardware recording the last writes; pulse feeding
    /// lives in the integration simulator.
    struct BenchAxis {
        period: u16,
        running: bool,
        energized: bool,
        direction: Direction,
        limit: bool,
        count: u32,
        down: bool,
    }

    impl BenchAxis {
        fn new() -> Self {
            Self {
                period: 0,
                running: false,
                energized: false,
                direction: Direction::Positive,
                limit: false,
                count: 0,
                down: false,
            }
        }
    }

    impl AxisHardware for BenchAxis {
        fn set_timer_period(&mut self, period: u16) {
            self.period = period;
        }
        fn timer_start(&mut self) {
            self.running = true;
        }
        fn timer_stop(&mut self) {
            self.running = false;
        }
        fn energize(&mut self) {
            self.energized = true;
        }
        fn release(&mut self) {
            self.energized = false;
        }
        fn set_direction(&mut self, direction: Direction) {
            self.direction = direction;
        }
        fn limit_active(&self) -> bool {
            self.limit
        }
        fn encoder_count(&self) -> u32 {
            self.count
        }
        fn set_encoder_count(&mut self, count: u32) {
            self.count = count;
        }
        fn encoder_counting_down(&self) -> bool {
            self.down
        }
    }

    fn bench_config() -> AxisConfig {
        AxisConfig {
            steps_per_rev: 200,
            microsteps: Microsteps::FULL,
            acceleration: 100,
            max_speed: 2000,
            min_speed: 50,
            max_steps: 1000,
            reverse: false,
            hold_on_stop: true,
            limit_switch: LimitPolicy::Ignore,
            keep_position: false,
            encoder: None,
        }
    }

    fn bench_controller() -> Controller<BenchAxis, NullSink, 1> {
        Controller::new(
            [BenchAxis::new()],
            TimerScale::new(1_000_000, 20),
            [bench_config()],
        )
    }

    #[test]
    fn test_move_accepted_from_idle() {
        let mut ctl = bench_controller();

        ctl.request_absolute_move(0, 500).unwrap();
        assert_eq!(ctl.phase(0), AxisPhase::Accelerating);
        assert_eq!(ctl.intent(0), MotionIntent::Direct);
        assert_eq!(ctl.remaining_steps(0), 500);
        assert!(ctl.hardware()[0].running);
        assert!(ctl.hardware()[0].energized);
    }

    #[test]
    fn test_move_rejected_when_busy() {
        let mut ctl = bench_controller();
        ctl.request_absolute_move(0, 500).unwrap();

        let err = ctl.request_absolute_move(0, 300).unwrap_err();
        assert_eq!(
            err,
            Error::Motion(MotionError::NotIdle(AxisPhase::Accelerating))
        );
        // rejection left the running move untouched
        assert_eq!(ctl.remaining_steps(0), 500);
    }

    #[test]
    fn test_move_rejected_out_of_range() {
        let mut ctl = bench_controller();

        assert!(ctl.request_absolute_move(0, 1001).is_err());
        assert!(ctl.request_absolute_move(0, -1001).is_err());
        // equal to current position
        assert!(ctl.request_absolute_move(0, 0).is_err());
        assert_eq!(ctl.phase(0), AxisPhase::Idle);
        assert!(!ctl.hardware()[0].running);

        // the bounds themselves are reachable
        assert!(ctl.request_absolute_move(0, 1000).is_ok());
    }

    #[test]
    fn test_tick_is_rate_limited() {
        let mut ctl = bench_controller();
        ctl.request_absolute_move(0, 500).unwrap();

        ctl.tick(Millis(10));
        let after_first = ctl.speed(0);
        ctl.tick(Millis(15));
        assert_eq!(ctl.speed(0), after_first);
        ctl.tick(Millis(20));
        assert!(ctl.speed(0) > after_first);
    }

    #[test]
    fn test_start_homing_seeks_negative_bound() {
        let mut ctl = bench_controller();

        ctl.start_homing(0).unwrap();
        assert_eq!(ctl.intent(0), MotionIntent::Homing(HomingStage::Fast));
        assert_eq!(ctl.phase(0), AxisPhase::Accelerating);
        assert_eq!(ctl.hardware()[0].direction, Direction::Negative);
        assert_eq!(ctl.remaining_steps(0), -1000);
    }

    #[test]
    fn test_reinit_recovers_fault() {
        let mut ctl = bench_controller();
        ctl.request_absolute_move(0, 500).unwrap();

        ctl.reinit();
        assert_eq!(ctl.phase(0), AxisPhase::Idle);
        assert_eq!(ctl.intent(0), MotionIntent::Idle);
        assert!(!ctl.hardware()[0].running);
        assert!(ctl.hardware()[0].energized);
    }
}
