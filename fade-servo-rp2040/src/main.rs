//! # Fade and Servo Firmware
//!
//! Fades the Pico's on-board LED up and down with PWM and moves a servo to
//! one of four positions when one of four push buttons is pressed.
//!
//! - LED: GPIO25, PWM slice 4 channel B. A 1 ms timer alarm drives the
//!   oscillator, which moves the duty cycle by 50 counts every 5 ms.
//! - Servo: GPIO16, PWM slice 0 channel A, signal wire only. Power the servo
//!   separately.
//! - Buttons: GPIO2 to GPIO5, active high with the internal pull-down.
//!
//! Both PWM slices run at 125 MHz / 40 = 3.125 MHz with a period of 62 500
//! counts, which is 20 ms.
//!
//! All work happens in the two interrupt handlers; the idle loop does nothing.
//! Each handler owns its state as an RTIC local resource, nothing is shared.
//!
//! See the `Cargo.toml` file for Copyright and license details.

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use rp2040_hal::pwm;

mod buttons;

/// The linker will place this boot block at the start of our program image. We
/// need this to help the ROM bootloader get our code up and running.
#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

/// External high-speed crystal on the Raspberry Pi Pico board is 12 MHz. Adjust
/// if your board has a different frequency
const XTAL_FREQ_HZ: u32 = 12_000_000u32;

/// 125 MHz system clock divided down to a 3.125 MHz PWM counter.
const PWM_DIV_INT: u8 = 40;

/// LED output: GPIO25 is channel B of slice 4.
type LedChannel = pwm::Channel<pwm::Slice<pwm::Pwm4, pwm::FreeRunning>, pwm::B>;

/// Servo output: GPIO16 is channel A of slice 0.
type ServoChannel = pwm::Channel<pwm::Slice<pwm::Pwm0, pwm::FreeRunning>, pwm::A>;

#[rtic::app(device = rp2040_hal::pac, peripherals = true)]
mod app {
    use crate::buttons::ButtonLines;
    use crate::{LedChannel, ServoChannel, PWM_DIV_INT, XTAL_FREQ_HZ};

    use defmt::{debug, info};
    use embedded_hal::pwm::SetDutyCycle;
    use fugit::ExtU32;
    use rp2040_hal::{
        self as hal,
        clocks::init_clocks_and_plls,
        gpio, pwm,
        timer::{Alarm, Alarm0},
        watchdog::Watchdog,
        Sio,
    };

    use fade_servo::config::{
        OscillatorConfig, LED_INITIAL_DUTY, PWM_PERIOD, SERVO_INITIAL_DUTY, TICK_PERIOD_US,
    };
    use fade_servo::{ButtonHandler, DutyCycleOscillator, ServoMapper, TickHandler};

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        alarm: Alarm0,
        oscillator: DutyCycleOscillator<LedChannel>,
        buttons: ButtonLines,
        servo: ServoMapper<ServoChannel>,
    }

    #[init]
    fn init(c: init::Context) -> (Shared, Local, init::Monotonics) {
        // Soft-reset does not release the hardware spinlocks
        // Release them now to avoid a deadlock after debug or watchdog reset
        unsafe {
            hal::sio::spinlock_reset();
        }
        info!("Program start");

        let mut resets = c.device.RESETS;
        let mut watchdog = Watchdog::new(c.device.WATCHDOG);

        // The default is to generate a 125 MHz system clock
        let clocks = init_clocks_and_plls(
            XTAL_FREQ_HZ,
            c.device.XOSC,
            c.device.CLOCKS,
            c.device.PLL_SYS,
            c.device.PLL_USB,
            &mut resets,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let sio = Sio::new(c.device.SIO);
        let pins = gpio::Pins::new(
            c.device.IO_BANK0,
            c.device.PADS_BANK0,
            sio.gpio_bank0,
            &mut resets,
        );

        let pwm_slices = pwm::Slices::new(c.device.PWM, &mut resets);

        // The counter wraps after TOP, so one period is TOP + 1 counts.
        let mut led_pwm = pwm_slices.pwm4;
        led_pwm.set_div_int(PWM_DIV_INT);
        led_pwm.set_top(PWM_PERIOD - 1);
        led_pwm.enable();
        let mut led = led_pwm.channel_b;
        led.output_to(pins.gpio25);
        led.set_duty_cycle(LED_INITIAL_DUTY).ok();

        let mut servo_pwm = pwm_slices.pwm0;
        servo_pwm.set_div_int(PWM_DIV_INT);
        servo_pwm.set_top(PWM_PERIOD - 1);
        servo_pwm.enable();
        let mut servo = servo_pwm.channel_a;
        servo.output_to(pins.gpio16);
        servo.set_duty_cycle(SERVO_INITIAL_DUTY).ok();

        let fade = OscillatorConfig::LED_FADE;
        if let Err(e) = fade.check_fits(led.max_duty_cycle()) {
            defmt::panic!("LED channel cannot reach the fade peak: {}", e);
        }

        let buttons = ButtonLines::new([
            pins.gpio2.into_pull_down_input().into_dyn_pin(),
            pins.gpio3.into_pull_down_input().into_dyn_pin(),
            pins.gpio4.into_pull_down_input().into_dyn_pin(),
            pins.gpio5.into_pull_down_input().into_dyn_pin(),
        ]);

        let mut timer = hal::Timer::new(c.device.TIMER, &mut resets, &clocks);
        let mut alarm = timer.alarm_0().unwrap();
        alarm.schedule(TICK_PERIOD_US.micros()).unwrap();
        alarm.enable_interrupt();

        (
            Shared {},
            Local {
                alarm,
                oscillator: DutyCycleOscillator::new(led, fade),
                buttons,
                servo: ServoMapper::new(servo),
            },
            init::Monotonics(),
        )
    }

    #[idle]
    fn idle(_: idle::Context) -> ! {
        loop {
            // interrupts handle everything else
            cortex_m::asm::nop();
        }
    }

    #[task(binds = TIMER_IRQ_0, priority = 2, local = [alarm, oscillator])]
    fn tick(c: tick::Context) {
        let alarm = c.local.alarm;
        alarm.clear_interrupt();
        let _ = alarm.schedule(TICK_PERIOD_US.micros());

        // set_duty_cycle can't fail, but the embedded-hal traits always allow for it
        c.local.oscillator.on_tick().ok();
    }

    #[task(binds = IO_IRQ_BANK0, priority = 1, local = [buttons, servo])]
    fn button(c: button::Context) {
        let mask = c.local.buttons.take_pending();
        debug!("buttons {=u8:#x}", mask);
        c.local.servo.on_button(mask).ok();
    }
}
