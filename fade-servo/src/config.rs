//! Compile-time configuration
//!
//! The PWM timing and the fade parameters are fixed at build time. The fade
//! parameters go through [`OscillatorConfig::new`] so that a ceiling the step
//! does not divide is rejected instead of producing an off-grid peak.

/// PWM period in compare counts.
///
/// With a 3.125 MHz PWM counter this is 20 ms, the frame rate hobby servos expect.
pub const PWM_PERIOD: u16 = 62_500;

/// Duty cycle written to the LED channel during bring-up.
pub const LED_INITIAL_DUTY: u16 = 3125;

/// Duty cycle written to the servo channel during bring-up.
pub const SERVO_INITIAL_DUTY: u16 = 1875;

/// Nominal period of the tick source in microseconds.
pub const TICK_PERIOD_US: u32 = 1_000;

/// Errors for oscillator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The step size is zero, the wave would never move.
    ZeroStep,
    /// The tick divider is zero.
    ZeroDivider,
    /// The ceiling is zero or smaller than a single step.
    CeilingBelowStep,
    /// The ceiling is not a whole number of steps.
    CeilingNotStepAligned,
    /// The ceiling is larger than the channel's maximum duty cycle.
    CeilingAboveMaxDuty,
}

/// Parameters of the triangle wave produced by
/// [`DutyCycleOscillator`](crate::oscillator::DutyCycleOscillator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OscillatorConfig {
    step: u16,
    ceiling: u16,
    divider: u32,
}

impl OscillatorConfig {
    /// The LED fade: step 50 up to 56 250, one step every 5 ticks.
    pub const LED_FADE: Self = match Self::new(50, 56_250, 5) {
        Ok(config) => config,
        Err(_) => panic!("invalid LED fade configuration"),
    };

    /// Build a configuration.
    ///
    /// `step` is the change in duty per emission, `ceiling` the peak duty and
    /// `divider` the number of ticks between emissions. The ceiling must be a
    /// whole number of steps so that the wave turns around exactly on it.
    pub const fn new(step: u16, ceiling: u16, divider: u32) -> Result<Self, ConfigError> {
        if step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if divider == 0 {
            return Err(ConfigError::ZeroDivider);
        }
        if ceiling < step {
            return Err(ConfigError::CeilingBelowStep);
        }
        if ceiling % step != 0 {
            return Err(ConfigError::CeilingNotStepAligned);
        }
        Ok(Self {
            step,
            ceiling,
            divider,
        })
    }

    /// Change in duty per emission.
    pub const fn step(&self) -> u16 {
        self.step
    }

    /// Peak duty of the wave.
    pub const fn ceiling(&self) -> u16 {
        self.ceiling
    }

    /// Number of ticks between emissions.
    pub const fn divider(&self) -> u32 {
        self.divider
    }

    /// Number of emissions in one full rise and fall.
    pub const fn emissions_per_period(&self) -> u32 {
        2 * (self.ceiling / self.step) as u32
    }

    /// Check that the peak can be expressed by a channel whose maximum duty
    /// cycle is `max_duty`.
    pub const fn check_fits(&self, max_duty: u16) -> Result<(), ConfigError> {
        if self.ceiling > max_duty {
            Err(ConfigError::CeilingAboveMaxDuty)
        } else {
            Ok(())
        }
    }
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self::LED_FADE
    }
}

// Initial duties and the fade peak must all lie inside one PWM period.
const _: () = assert!(LED_INITIAL_DUTY <= PWM_PERIOD);
const _: () = assert!(SERVO_INITIAL_DUTY <= PWM_PERIOD);
const _: () = assert!(OscillatorConfig::LED_FADE.check_fits(PWM_PERIOD).is_ok());
