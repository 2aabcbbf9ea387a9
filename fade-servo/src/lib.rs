//! Interrupt-driven LED fade and servo position control.
//!
//! This crate holds the hardware independent half of the fade / servo firmware:
//!
//! - [`oscillator::DutyCycleOscillator`] is driven by a 1 ms tick and walks a
//!   triangle wave over an LED PWM channel, one step every fifth tick.
//! - [`servo::ServoMapper`] is driven by a button interrupt and snaps a servo
//!   PWM channel to one of four fixed positions.
//!
//! Both talk to their outputs through [`embedded_hal::pwm::SetDutyCycle`], so
//! any HAL channel (or a test double) can sit behind them. The interrupt
//! sources reach them through the [`handler::TickHandler`] and
//! [`handler::ButtonHandler`] traits, either bound directly to hardware
//! interrupts or through the software sources in [`source`].
//!
//! ```
//! use fade_servo::config::OscillatorConfig;
//! use fade_servo::handler::TickHandler;
//! use fade_servo::oscillator::DutyCycleOscillator;
//! # use core::convert::Infallible;
//! # struct Led(u16);
//! # impl embedded_hal::pwm::ErrorType for Led { type Error = Infallible; }
//! # impl embedded_hal::pwm::SetDutyCycle for Led {
//! #     fn max_duty_cycle(&self) -> u16 { 62_500 }
//! #     fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> { self.0 = duty; Ok(()) }
//! # }
//!
//! let mut led = DutyCycleOscillator::new(Led(0), OscillatorConfig::LED_FADE);
//! for _ in 0..5 {
//!     led.on_tick().unwrap();
//! }
//! assert_eq!(led.level(), 50);
//! ```

#![deny(missing_docs)]
#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod handler;
pub mod oscillator;
pub mod servo;
pub mod source;

#[cfg(test)]
mod mock;

pub use config::{ConfigError, OscillatorConfig};
pub use handler::{ButtonHandler, TickHandler};
pub use oscillator::{Direction, DutyCycleOscillator, TriangleWave};
pub use servo::ServoMapper;
pub use source::{ButtonSource, DispatchError, Dispatcher, Event, TickSource};
