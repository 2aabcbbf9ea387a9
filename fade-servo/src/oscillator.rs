//! Duty-cycle oscillator
//!
//! Turns a stream of ticks into a triangle wave on a PWM channel. The tick
//! counter, the current level and the direction are owned by the oscillator,
//! which in turn is owned by whatever context handles the tick interrupt.
//!
//! ```text
//!  ceiling        /\        /\
//!                /  \      /  \
//!               /    \    /    \
//!  0  ---------/      \__/      \__
//! ```
//!
//! With [`OscillatorConfig::LED_FADE`] the level moves by 50 every 5 ticks,
//! so one full rise and fall takes 2250 emissions, 11.25 s at a 1 ms tick.

use embedded_hal::pwm::SetDutyCycle;

use crate::config::OscillatorConfig;
use crate::handler::TickHandler;

/// Direction the wave is currently moving in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Level increases on the next step.
    Rising,
    /// Level decreases on the next step.
    Falling,
}

/// Triangle wave between 0 and a ceiling, one fixed step at a time.
///
/// This is the pure state machine behind [`DutyCycleOscillator`]. Each call to
/// [`advance`](TriangleWave::advance) moves the level one step and returns it;
/// the direction turns around when a rising step reaches the ceiling or a
/// falling step reaches 0, so both extremes are emitted exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriangleWave {
    level: u16,
    direction: Direction,
    step: u16,
    ceiling: u16,
}

impl TriangleWave {
    /// A wave at level 0, rising.
    pub const fn new(config: &OscillatorConfig) -> Self {
        Self {
            level: 0,
            direction: Direction::Rising,
            step: config.step(),
            ceiling: config.ceiling(),
        }
    }

    /// The last emitted level.
    pub fn level(&self) -> u16 {
        self.level
    }

    /// The direction of the next step.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move one step and return the new level.
    pub fn advance(&mut self) -> u16 {
        match self.direction {
            Direction::Rising => {
                // The ceiling is a whole number of steps, so `>=` only ever
                // matches on the ceiling itself.
                self.level = self.level.saturating_add(self.step);
                if self.level >= self.ceiling {
                    self.direction = Direction::Falling;
                    #[cfg(feature = "defmt")]
                    defmt::trace!("peak reached at {=u16}", self.level);
                }
            }
            Direction::Falling => {
                self.level = self.level.saturating_sub(self.step);
                if self.level == 0 {
                    self.direction = Direction::Rising;
                    #[cfg(feature = "defmt")]
                    defmt::trace!("trough reached");
                }
            }
        }
        self.level
    }
}

impl Iterator for TriangleWave {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        Some(self.advance())
    }
}

/// Drives a PWM channel with a triangle wave, one step every `divider` ticks.
///
/// Register it as the tick handler; every call to
/// [`on_tick`](TickHandler::on_tick) counts one tick and, on every
/// `divider`-th tick, advances the wave and writes the new level to the
/// channel.
#[derive(Debug)]
pub struct DutyCycleOscillator<C> {
    channel: C,
    wave: TriangleWave,
    elapsed: u32,
    divider: u32,
}

impl<C: SetDutyCycle> DutyCycleOscillator<C> {
    /// Take ownership of `channel` and start the wave at 0, rising.
    ///
    /// The channel itself is not written until the first emission.
    pub fn new(channel: C, config: OscillatorConfig) -> Self {
        Self {
            channel,
            wave: TriangleWave::new(&config),
            elapsed: 0,
            divider: config.divider(),
        }
    }

    /// Number of ticks seen so far, wrapping at `u32::MAX`.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// The last level written to the channel, 0 before the first emission.
    pub fn level(&self) -> u16 {
        self.wave.level()
    }

    /// The direction of the next step.
    pub fn direction(&self) -> Direction {
        self.wave.direction()
    }

    /// Release the PWM channel.
    pub fn into_inner(self) -> C {
        self.channel
    }
}

impl<C: SetDutyCycle> TickHandler for DutyCycleOscillator<C> {
    type Error = C::Error;

    fn on_tick(&mut self) -> Result<(), Self::Error> {
        self.elapsed = self.elapsed.wrapping_add(1);
        if self.elapsed % self.divider != 0 {
            return Ok(());
        }
        let level = self.wave.advance();
        self.channel.set_duty_cycle(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Disconnected, FailingChannel, RecordingChannel};
    use std::vec::Vec;

    const EMISSIONS: usize = 2250;

    fn led_fade() -> DutyCycleOscillator<RecordingChannel> {
        DutyCycleOscillator::new(RecordingChannel::default(), OscillatorConfig::LED_FADE)
    }

    fn tick_n<C: SetDutyCycle>(osc: &mut DutyCycleOscillator<C>, n: usize) {
        for _ in 0..n {
            osc.on_tick().ok().unwrap();
        }
    }

    fn expected_level(emission: usize) -> u16 {
        let emission = emission % EMISSIONS;
        if emission < 1125 {
            50 * (emission as u16 + 1)
        } else {
            56_250 - 50 * (emission as u16 - 1124)
        }
    }

    #[test]
    fn first_emission_after_five_ticks() {
        let mut osc = led_fade();

        tick_n(&mut osc, 4);
        assert_eq!(osc.elapsed(), 4);
        assert!(osc.channel.writes.is_empty());

        tick_n(&mut osc, 1);
        assert_eq!(osc.channel.writes, [50]);
        assert_eq!(osc.level(), 50);
        assert_eq!(osc.direction(), Direction::Rising);
    }

    #[test]
    fn one_period_is_a_triangle() {
        let mut osc = led_fade();
        tick_n(&mut osc, EMISSIONS * 5);

        let writes = osc.into_inner().writes;
        assert_eq!(writes.len(), EMISSIONS);
        for (i, level) in writes.iter().enumerate() {
            assert_eq!(*level, expected_level(i), "emission {}", i);
            assert_eq!(level % 50, 0);
            assert!(*level <= 56_250);
        }
        assert_eq!(writes.iter().max(), Some(&56_250));
        assert_eq!(writes.iter().filter(|l| **l == 56_250).count(), 1);
        assert_eq!(writes.iter().filter(|l| **l == 0).count(), 1);
    }

    #[test]
    fn wave_repeats_every_period() {
        let mut osc = led_fade();
        tick_n(&mut osc, 3 * EMISSIONS * 5);

        let writes = osc.into_inner().writes;
        let (first, rest) = writes.split_at(EMISSIONS);
        assert_eq!(first, &rest[..EMISSIONS]);
        assert_eq!(first, &rest[EMISSIONS..]);
    }

    #[test]
    fn turns_around_at_the_peak() {
        let mut osc = led_fade();

        tick_n(&mut osc, 1124 * 5);
        assert_eq!(osc.level(), 56_200);
        assert_eq!(osc.direction(), Direction::Rising);

        tick_n(&mut osc, 5);
        assert_eq!(osc.level(), 56_250);
        assert_eq!(osc.direction(), Direction::Falling);

        tick_n(&mut osc, 5);
        assert_eq!(osc.level(), 56_200);
        assert_eq!(osc.direction(), Direction::Falling);
    }

    #[test]
    fn turns_around_at_the_trough() {
        let mut osc = led_fade();

        tick_n(&mut osc, EMISSIONS * 5);
        assert_eq!(osc.level(), 0);
        assert_eq!(osc.direction(), Direction::Rising);

        tick_n(&mut osc, 5);
        let writes = &osc.channel.writes;
        assert_eq!(&writes[EMISSIONS - 2..], [50, 0, 50]);
    }

    #[test]
    fn counter_wraps() {
        let mut osc = led_fade();
        osc.elapsed = u32::MAX - 1;

        // u32::MAX and 0 are both multiples of 5.
        tick_n(&mut osc, 2);
        assert_eq!(osc.elapsed(), 0);
        assert_eq!(osc.channel.writes, [50, 100]);
    }

    #[test]
    fn channel_errors_are_returned() {
        let mut osc = DutyCycleOscillator::new(FailingChannel, OscillatorConfig::LED_FADE);
        for _ in 0..4 {
            assert_eq!(osc.on_tick(), Ok(()));
        }
        assert_eq!(osc.on_tick(), Err(Disconnected));

        // The wave keeps its own state even when the write fails.
        assert_eq!(osc.elapsed(), 5);
        assert_eq!(osc.level(), 50);
    }

    #[test]
    fn small_wave() {
        let config = OscillatorConfig::new(1, 3, 1).unwrap();
        let levels: Vec<u16> = TriangleWave::new(&config).take(8).collect();
        assert_eq!(levels, [1, 2, 3, 2, 1, 0, 1, 2]);
    }

    #[test]
    fn custom_divider() {
        let config = OscillatorConfig::new(7, 21, 2).unwrap();
        let mut osc = DutyCycleOscillator::new(RecordingChannel::default(), config);
        tick_n(&mut osc, 12);
        assert_eq!(osc.channel.writes, [7, 14, 21, 14, 7, 0]);
    }
}
