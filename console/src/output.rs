//! Output lines for the console: a real GPIO pin, or a dry run that only logs.

use std::convert::Infallible;
use std::thread;

use myrtio_pin_effects::{Delay, Duration, Level, OutputLine, OutputMode, OutputSink};
use tracing::info;

/// Sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&mut self, duration: Duration) {
        thread::sleep(std::time::Duration::from_micros(duration.as_micros()));
    }
}

/// Line that logs writes instead of touching hardware
pub struct DryRunLine {
    pin: u8,
}

impl DryRunLine {
    pub fn new(pin: u8) -> Self {
        Self { pin }
    }
}

impl OutputLine for DryRunLine {
    type Sink = DryRunSink;
    type Error = Infallible;

    fn acquire(&mut self, mode: OutputMode) -> Result<DryRunSink, Infallible> {
        info!(pin = self.pin, ?mode, "dry run: line acquired");
        Ok(DryRunSink { pin: self.pin })
    }
}

pub struct DryRunSink {
    pin: u8,
}

impl OutputSink for DryRunSink {
    type Error = Infallible;

    fn set_level(&mut self, level: Level) -> Result<(), Infallible> {
        info!(pin = self.pin, on = level.is_on(), "level");
        Ok(())
    }

    fn set_intensity(&mut self, intensity: f32) -> Result<(), Infallible> {
        info!(pin = self.pin, intensity, "intensity");
        Ok(())
    }

    fn release(&mut self) -> Result<(), Infallible> {
        info!(pin = self.pin, "dry run: line released");
        Ok(())
    }
}

#[cfg(feature = "gpio")]
pub use gpio::GpioLine;

#[cfg(feature = "gpio")]
mod gpio {
    use myrtio_pin_effects::{Level, OutputLine, OutputMode, OutputSink};
    use rppal::gpio::{Error, Gpio, OutputPin};
    use tracing::debug;

    /// Software PWM frequency used for intensity
    const PWM_FREQUENCY_HZ: f64 = 100.0;

    /// BCM-numbered GPIO pin, claimed anew for every session
    pub struct GpioLine {
        pin: u8,
    }

    impl GpioLine {
        pub fn new(pin: u8) -> Self {
            Self { pin }
        }
    }

    impl OutputLine for GpioLine {
        type Sink = GpioSink;
        type Error = Error;

        fn acquire(&mut self, mode: OutputMode) -> Result<GpioSink, Error> {
            let pin = Gpio::new()?.get(self.pin)?.into_output_low();
            debug!(pin = self.pin, ?mode, "gpio line acquired");
            Ok(GpioSink { pin })
        }
    }

    pub struct GpioSink {
        pin: OutputPin,
    }

    impl OutputSink for GpioSink {
        type Error = Error;

        fn set_level(&mut self, level: Level) -> Result<(), Error> {
            if level.is_on() {
                self.pin.set_high();
            } else {
                self.pin.set_low();
            }
            Ok(())
        }

        fn set_intensity(&mut self, intensity: f32) -> Result<(), Error> {
            if intensity <= 0.0 {
                self.pin.clear_pwm()?;
                self.pin.set_low();
                return Ok(());
            }
            self.pin
                .set_pwm_frequency(PWM_FREQUENCY_HZ, f64::from(intensity.min(1.0)))
        }

        fn release(&mut self) -> Result<(), Error> {
            self.pin.clear_pwm()?;
            self.pin.set_low();
            Ok(())
        }
    }
}
