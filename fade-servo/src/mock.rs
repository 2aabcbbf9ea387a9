//! PWM channel test doubles shared by the unit tests.

use core::convert::Infallible;
use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};
use std::vec::Vec;

use crate::config::PWM_PERIOD;

/// Records every duty cycle written to it.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    pub writes: Vec<u16>,
}

impl ErrorType for RecordingChannel {
    type Error = Infallible;
}

impl SetDutyCycle for RecordingChannel {
    fn max_duty_cycle(&self) -> u16 {
        PWM_PERIOD
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.writes.push(duty);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected;

impl embedded_hal::pwm::Error for Disconnected {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Rejects every write.
#[derive(Debug, Default)]
pub struct FailingChannel;

impl ErrorType for FailingChannel {
    type Error = Disconnected;
}

impl SetDutyCycle for FailingChannel {
    fn max_duty_cycle(&self) -> u16 {
        PWM_PERIOD
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
        Err(Disconnected)
    }
}
