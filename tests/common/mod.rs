//! Shared harness for the integration tests.
//!
//! `SimAxis` is a software rendition of one axis's hardware: the step
//! timer, the driver enable and direction lines, a limit switch tied to a
//! step position, and a quadrature counter fed by a configurable
//! ticks-per-step factor (20 is nominal for the 4000-tick, 200-step
//! fixtures; lower models a slipping coupling, 0 a stalled rotor).
//!
//! `SimBench` closes the loop: each [`SimBench::step`] advances the world
//! one scheduler interval — controller tick first, then every running
//! step timer delivers the pulses that fit in the window, carrying the
//! sub-pulse remainder across windows so slow speeds stay exact.

use std::cell::RefCell;
use std::rc::Rc;

use stepper_axes::{
    AxisConfig, AxisHardware, Controller, Direction, EncoderConfig, LimitPolicy, Microsteps,
    Millis, StatusSink, TimerScale, TICK_INTERVAL_MS,
};

pub const SIM_TICK_HZ: u32 = 1_000_000;
pub const SIM_MIN_PERIOD: u16 = 20;

pub fn sim_scale() -> TimerScale {
    TimerScale::new(SIM_TICK_HZ, SIM_MIN_PERIOD)
}

/// Axis fixture: 200 steps/rev, full stepping, 100 steps/s² ramps,
/// 50..2000 steps/s, ±1000 steps travel, no encoder.
pub fn open_loop_axis() -> AxisConfig {
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

/// The open-loop fixture plus a 4000-tick encoder (20 ticks per full
/// step nominal, healthy band 10..=30, three strikes).
pub fn encoder_axis() -> AxisConfig {
    AxisConfig {
        encoder: Some(EncoderConfig {
            ticks_per_rev: 4000,
            reverse: false,
            min_ticks_per_step: 10,
            max_ticks_per_step: 30,
            stall_threshold: 3,
        }),
        ..open_loop_axis()
    }
}

/// Status sink that keeps every line; clones share the buffer so a test
/// can hold one handle while the controller owns the other.
#[derive(Clone, Default)]
pub struct VecSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines
            .borrow()
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl StatusSink for VecSink {
    fn status_line(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

/// Software axis hardware.
pub struct SimAxis {
    pub period: u16,
    pub running: bool,
    pub energized: bool,
    pub direction: Direction,
    /// Limit switch reads active at or below this step position.
    pub limit_below: Option<i32>,
    pub limit: bool,
    pub count: u32,
    pub down: bool,
    /// Encoder ticks the simulated world delivers per full step.
    pub ticks_per_step: i32,
}

impl SimAxis {
    pub fn new() -> Self {
        Self {
            period: 0,
            running: false,
            energized: false,
            direction: Direction::Positive,
            limit_below: None,
            limit: false,
            count: 0,
            down: false,
            ticks_per_step: 20,
        }
    }
}

impl Default for SimAxis {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisHardware for SimAxis {
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

/// Controller plus simulated time.
pub struct SimBench<const N: usize> {
    pub ctl: Controller<SimAxis, VecSink, N>,
    pub sink: VecSink,
    now: u32,
    carry: [u32; N],
}

impl<const N: usize> SimBench<N> {
    pub fn new(config: [AxisConfig; N]) -> Self {
        let sink = VecSink::new();
        let hw = core::array::from_fn(|_| SimAxis::new());
        let ctl = Controller::with_sink(hw, sim_scale(), config, sink.clone());
        Self {
            ctl,
            sink,
            now: 0,
            carry: [0; N],
        }
    }

    pub fn now(&self) -> Millis {
        Millis(self.now)
    }

    /// One scheduler interval: tick, then pulses.
    pub fn step(&mut self) {
        self.now += TICK_INTERVAL_MS;
        self.ctl.tick(Millis(self.now));
        for axis in 0..N {
            self.run_axis_window(axis);
        }
    }

    /// Advance simulated time by `ms`.
    pub fn run_ms(&mut self, ms: u32) {
        let deadline = self.now + ms;
        while self.now < deadline {
            self.step();
        }
    }

    /// Advance until `done` holds, giving up after `max_ms`.
    pub fn run_until<F>(&mut self, max_ms: u32, done: F) -> bool
    where
        F: Fn(&Controller<SimAxis, VecSink, N>) -> bool,
    {
        let deadline = self.now + max_ms;
        while self.now < deadline {
            self.step();
            if done(&self.ctl) {
                return true;
            }
        }
        false
    }

    fn run_axis_window(&mut self, axis: usize) {
        if !self.ctl.hardware()[axis].running {
            self.carry[axis] = 0;
            return;
        }
        let mut budget = self.carry[axis] + SIM_TICK_HZ / 1000 * TICK_INTERVAL_MS;
        loop {
            if !self.ctl.hardware()[axis].running {
                budget = 0;
                break;
            }
            let period = u32::from(self.ctl.hardware()[axis].period.max(1));
            if budget < period {
                break;
            }
            budget -= period;
            self.pulse(axis);
        }
        self.carry[axis] = budget;
    }

    /// One timer fire: refresh the limit switch from the step position,
    /// deliver the edge, then mirror any completed full step into the
    /// encoder.
    fn pulse(&mut self, axis: usize) {
        if let Some(threshold) = self.ctl.hardware()[axis].limit_below {
            let active = self.ctl.step_position(axis) <= threshold;
            self.ctl.hardware_mut()[axis].limit = active;
        }
        let before = self.ctl.step_position(axis);
        self.ctl.on_microstep(axis);
        let moved = self.ctl.step_position(axis) - before;
        if moved != 0 {
            self.feed_encoder(axis, moved);
        }
    }

    /// Advance the quadrature counter, wrapping once per revolution the
    /// way the hardware timer would and raising the overflow interrupt.
    fn feed_encoder(&mut self, axis: usize, steps: i32) {
        let Some(ticks_per_rev) = self
            .ctl
            .axis_config(axis)
            .encoder
            .as_ref()
            .map(|enc| i64::from(enc.ticks_per_rev))
        else {
            return;
        };
        let delta = i64::from(self.ctl.hardware()[axis].ticks_per_step) * i64::from(steps);
        let mut count = i64::from(self.ctl.hardware()[axis].count) + delta;
        if count >= ticks_per_rev {
            count -= ticks_per_rev;
            self.ctl.hardware_mut()[axis].count = count as u32;
            self.ctl.hardware_mut()[axis].down = false;
            self.ctl.on_encoder_overflow(axis);
        } else if count < 0 {
            count += ticks_per_rev;
            self.ctl.hardware_mut()[axis].count = count as u32;
            self.ctl.hardware_mut()[axis].down = true;
            self.ctl.on_encoder_overflow(axis);
        } else {
            self.ctl.hardware_mut()[axis].count = count as u32;
        }
        debug_assert!((0..ticks_per_rev).contains(&count));
    }
}
