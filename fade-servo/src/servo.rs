//! Button-to-duty mapping for the servo
//!
//! Four push buttons select four fixed servo positions. The mapping is a pure
//! lookup on the mask reported by the button interrupt: exactly one of the
//! known lines must be set, anything else is ignored.

use embedded_hal::pwm::SetDutyCycle;

use crate::handler::ButtonHandler;

/// Mask reported for the first button line.
pub const BUTTON_0: u8 = 0x04;
/// Mask reported for the second button line.
pub const BUTTON_1: u8 = 0x08;
/// Mask reported for the third button line.
pub const BUTTON_2: u8 = 0x10;
/// Mask reported for the fourth button line.
pub const BUTTON_3: u8 = 0x20;

/// Servo duty cycle selected by a button mask, in PWM compare counts.
///
/// With a 62 500 count, 20 ms period these are pulses of 0.6, 1.0, 1.6 and
/// 2.3 ms.
pub const fn duty_for(mask: u8) -> Option<u16> {
    match mask {
        BUTTON_0 => Some(1875),
        BUTTON_1 => Some(3125),
        BUTTON_2 => Some(5000),
        BUTTON_3 => Some(7187),
        _ => None,
    }
}

/// Writes the position selected by each button event to a servo channel.
#[derive(Debug)]
pub struct ServoMapper<C> {
    channel: C,
}

impl<C: SetDutyCycle> ServoMapper<C> {
    /// Take ownership of `channel`.
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Release the PWM channel.
    pub fn into_inner(self) -> C {
        self.channel
    }
}

impl<C: SetDutyCycle> ButtonHandler for ServoMapper<C> {
    type Error = C::Error;

    fn on_button(&mut self, mask: u8) -> Result<(), Self::Error> {
        match duty_for(mask) {
            Some(duty) => self.channel.set_duty_cycle(duty),
            None => {
                #[cfg(feature = "defmt")]
                defmt::debug!("ignoring button mask {=u8:#x}", mask);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Disconnected, FailingChannel, RecordingChannel};

    #[test]
    fn known_buttons() {
        let mut servo = ServoMapper::new(RecordingChannel::default());
        for mask in [BUTTON_0, BUTTON_1, BUTTON_2, BUTTON_3] {
            servo.on_button(mask).ok().unwrap();
        }
        assert_eq!(servo.into_inner().writes, [1875, 3125, 5000, 7187]);
    }

    #[test]
    fn other_masks_are_ignored() {
        let mut servo = ServoMapper::new(RecordingChannel::default());
        for mask in 0..=u8::MAX {
            if duty_for(mask).is_none() {
                servo.on_button(mask).ok().unwrap();
            }
        }
        assert!(servo.channel.writes.is_empty());

        // Two lines at once is not a position either.
        assert_eq!(duty_for(BUTTON_0 | BUTTON_1), None);
        assert_eq!(duty_for(0), None);
        assert_eq!(duty_for(0x01), None);
        assert_eq!(duty_for(0x40), None);
    }

    #[test]
    fn exactly_four_masks_map() {
        let mapped = (0..=u8::MAX).filter(|m| duty_for(*m).is_some()).count();
        assert_eq!(mapped, 4);
    }

    #[test]
    fn repeated_events_are_not_deduplicated() {
        let mut servo = ServoMapper::new(RecordingChannel::default());
        servo.on_button(BUTTON_2).ok().unwrap();
        servo.on_button(BUTTON_2).ok().unwrap();
        assert_eq!(servo.channel.writes, [5000, 5000]);
    }

    #[test]
    fn channel_errors_are_returned() {
        let mut servo = ServoMapper::new(FailingChannel);
        assert_eq!(servo.on_button(BUTTON_3), Err(Disconnected));
        // Ignored masks never touch the channel.
        assert_eq!(servo.on_button(0x01), Ok(()));
    }
}
