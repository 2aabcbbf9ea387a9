//! Interrupt handler traits
//!
//! A tick handler is called once per period of the tick source, a button
//! handler once per qualifying edge with the mask of the lines that fired.
//! Implementations run in interrupt context: they must not block and must
//! finish in bounded time.

/// Receiver of periodic ticks.
pub trait TickHandler {
    /// Error raised while handling a tick.
    type Error;

    /// Handle one tick.
    fn on_tick(&mut self) -> Result<(), Self::Error>;
}

/// Receiver of button events.
pub trait ButtonHandler {
    /// Error raised while handling a button event.
    type Error;

    /// Handle one button event. Bit `n` of `mask` is set when input line `n`
    /// saw a rising edge.
    fn on_button(&mut self, mask: u8) -> Result<(), Self::Error>;
}

impl<T: TickHandler + ?Sized> TickHandler for &mut T {
    type Error = T::Error;

    #[inline]
    fn on_tick(&mut self) -> Result<(), Self::Error> {
        (**self).on_tick()
    }
}

impl<T: ButtonHandler + ?Sized> ButtonHandler for &mut T {
    type Error = T::Error;

    #[inline]
    fn on_button(&mut self, mask: u8) -> Result<(), Self::Error> {
        (**self).on_button(mask)
    }
}
