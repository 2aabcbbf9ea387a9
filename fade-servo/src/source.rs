//! Software tick and button sources
//!
//! On hardware the tick and button handlers are bound straight to their
//! interrupts. These types model the same sources in software: each source
//! holds its handler, and a [`Dispatcher`] feeds a stream of [`Event`]s to them
//! one at a time on a single thread. This is the event-dispatch model used to
//! replay interrupt sequences off target.
//!
//! ```
//! use fade_servo::config::OscillatorConfig;
//! use fade_servo::oscillator::DutyCycleOscillator;
//! use fade_servo::servo::{ServoMapper, BUTTON_1};
//! use fade_servo::source::{Dispatcher, Event};
//! # use core::convert::Infallible;
//! # #[derive(Default)]
//! # struct Pwm(u16);
//! # impl embedded_hal::pwm::ErrorType for Pwm { type Error = Infallible; }
//! # impl embedded_hal::pwm::SetDutyCycle for Pwm {
//! #     fn max_duty_cycle(&self) -> u16 { 62_500 }
//! #     fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> { self.0 = duty; Ok(()) }
//! # }
//!
//! let mut led = DutyCycleOscillator::new(Pwm::default(), OscillatorConfig::LED_FADE);
//! let mut servo = ServoMapper::new(Pwm::default());
//!
//! let mut dispatcher = Dispatcher::new(&mut led, &mut servo);
//! let events = [Event::Tick; 10].into_iter().chain([Event::Button(BUTTON_1)]);
//! dispatcher.run(events).unwrap();
//!
//! assert_eq!(led.level(), 100);
//! assert_eq!(servo.into_inner().0, 3125);
//! ```

use crate::handler::{ButtonHandler, TickHandler};

/// Periodic source of ticks.
#[derive(Debug)]
pub struct TickSource<H> {
    handler: H,
}

impl<H: TickHandler> TickSource<H> {
    /// Register `handler` with this source.
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Deliver one tick to the handler.
    pub fn fire(&mut self) -> Result<(), H::Error> {
        self.handler.on_tick()
    }

    /// Release the handler.
    pub fn free(self) -> H {
        self.handler
    }
}

/// Edge-triggered source of button events.
#[derive(Debug)]
pub struct ButtonSource<H> {
    handler: H,
}

impl<H: ButtonHandler> ButtonSource<H> {
    /// Register `handler` with this source.
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Deliver one button event with the mask of the lines that fired.
    pub fn fire(&mut self, mask: u8) -> Result<(), H::Error> {
        self.handler.on_button(mask)
    }

    /// Release the handler.
    pub fn free(self) -> H {
        self.handler
    }
}

/// One interrupt occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The tick source fired.
    Tick,
    /// The button source fired with the given line mask.
    Button(u8),
}

/// Errors for event dispatch, tagged with the path that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError<T, B> {
    /// The tick handler failed.
    Tick(T),
    /// The button handler failed.
    Button(B),
}

/// Routes events to a tick source and a button source, one at a time.
///
/// Handlers run to completion before the next event is delivered, so each
/// handler keeps exclusive ownership of its own state.
#[derive(Debug)]
pub struct Dispatcher<T, B> {
    tick: TickSource<T>,
    button: ButtonSource<B>,
}

impl<T: TickHandler, B: ButtonHandler> Dispatcher<T, B> {
    /// Create a dispatcher with one handler per source.
    pub fn new(tick: T, button: B) -> Self {
        Self {
            tick: TickSource::new(tick),
            button: ButtonSource::new(button),
        }
    }

    /// Deliver one event.
    pub fn dispatch(&mut self, event: Event) -> Result<(), DispatchError<T::Error, B::Error>> {
        match event {
            Event::Tick => self.tick.fire().map_err(DispatchError::Tick),
            Event::Button(mask) => self.button.fire(mask).map_err(DispatchError::Button),
        }
    }

    /// Deliver every event in order, stopping at the first failure.
    pub fn run<I>(&mut self, events: I) -> Result<(), DispatchError<T::Error, B::Error>>
    where
        I: IntoIterator<Item = Event>,
    {
        events.into_iter().try_for_each(|event| self.dispatch(event))
    }

    /// Release both handlers.
    pub fn free(self) -> (T, B) {
        (self.tick.free(), self.button.free())
    }
}
