//! The four push-button inputs
//!
//! Buttons sit on GPIO2 to GPIO5 with a pull-down, so a press is a rising
//! edge. The mask handed to the button handler has bit `n` set for GPIO `n`,
//! which gives 0x04, 0x08, 0x10 and 0x20 for the four buttons.

use rp2040_hal::gpio::{DynPinId, FunctionSioInput, Interrupt::EdgeHigh, Pin, PullDown};

/// A button input after it has been made dynamically typed, so all four fit in
/// one array.
pub type ButtonPin = Pin<DynPinId, FunctionSioInput, PullDown>;

/// The set of button inputs feeding the `IO_IRQ_BANK0` interrupt.
pub struct ButtonLines {
    pins: [ButtonPin; 4],
}

impl ButtonLines {
    /// Enable the rising-edge interrupt on every pin.
    pub fn new(mut pins: [ButtonPin; 4]) -> Self {
        for pin in pins.iter_mut() {
            pin.set_interrupt_enabled(EdgeHigh, true);
        }
        Self { pins }
    }

    /// Collect and acknowledge the pending rising edges.
    ///
    /// Returns the mask of the lines that fired since the last call.
    pub fn take_pending(&mut self) -> u8 {
        let mut mask = 0;
        for pin in self.pins.iter_mut() {
            if pin.interrupt_status(EdgeHigh) {
                // Our interrupt doesn't clear itself.
                pin.clear_interrupt(EdgeHigh);
                if let Some(bit) = 1u8.checked_shl(u32::from(pin.id().num)) {
                    mask |= bit;
                }
            }
        }
        mask
    }
}
