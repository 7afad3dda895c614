//! # stepper-axes
//!
//! Closed-loop multi-axis stepper motor control with encoder stall detection
//! and homing.
//!
//! ## Features
//!
//! - **Trapezoidal/triangular profiles**: Accelerate, cruise, decelerate —
//!   or fold the cruise away when the move is too short to reach max speed
//! - **Closed loop**: Per-axis quadrature encoders checked against the
//!   commanded step count; slipping or stuck motors back off and retry,
//!   persistent stalls stop the move
//! - **Homing**: Staged move-to-reference sequence driven by a limit switch
//! - **Interrupt-friendly**: Microstep and encoder-overflow entry points
//!   touch only atomic state; the 10 ms scheduler tick does the rest
//! - **no_std compatible**: Core library works without the standard library,
//!   no allocation, no read-modify-write atomics
//! - **Configuration-driven**: Per-axis parameters load from TOML on std
//!   hosts or are built directly on embedded targets
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_axes::{Controller, Millis, SystemConfig, TimerScale};
//!
//! // Load configuration from TOML
//! let config: SystemConfig = stepper_axes::load_config("axes.toml")?;
//! let axes = config.axis_array::<3>()?;
//!
//! // Hardware implements `AxisHardware`; the timer scale describes the
//! // step-pulse timer clock after prescaling.
//! let scale = TimerScale::new(1_000_000, 20);
//! let mut ctl = Controller::new(hardware, scale, axes);
//!
//! // Command side
//! ctl.request_absolute_move(0, 1500)?;
//!
//! // Interrupt side (per-axis step timer and encoder update ISRs)
//! ctl.on_microstep(0);
//! ctl.on_encoder_overflow(0);
//!
//! // Main loop, at least once per 10 ms
//! ctl.tick(Millis(now));
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod axis;
pub mod config;
pub mod controller;
pub mod error;
pub mod hal;
pub mod motion;

// Re-exports for ergonomic API
pub use axis::{AxisPhase, HomingStage, MotionIntent, StallCheck};
pub use config::{validate_config, AxisConfig, EncoderConfig, LimitPolicy, SystemConfig};
pub use controller::{Controller, TICK_INTERVAL_MS};
pub use error::{Error, MotionError, Result};
pub use hal::{AxisHardware, AxisPins, NullSink, StatusSink};
pub use motion::{Direction, MoveGeometry, ProfileKind, StepRate, TimerScale};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

// Unit types
pub use config::units::{Microsteps, Millis};
