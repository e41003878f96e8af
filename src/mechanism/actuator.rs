//! Actuator abstraction and an embedded-hal H-bridge adapter.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::error::{MechanismError, Result};
use crate::motion::Direction;

/// Anything that accepts a normalized drive command in `[-1, 1]`.
pub trait Actuator {
    /// Apply `output`. Callers pass values already clamped to `[-1, 1]`.
    fn set_output(&mut self, output: f64) -> Result<()>;
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    fn set_output(&mut self, output: f64) -> Result<()> {
        (**self).set_output(output)
    }
}

/// H-bridge driven by a PWM channel for magnitude and a pin for direction.
///
/// Generic over:
/// - `PWM`: duty cycle output (must implement `SetDutyCycle`)
/// - `DIR`: direction pin (must implement `OutputPin`)
pub struct HBridge<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    pwm: PWM,
    dir_pin: DIR,
    invert_direction: bool,
    /// Cached to avoid unnecessary pin writes.
    current_direction: Option<Direction>,
}

impl<PWM, DIR> HBridge<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    /// Create a new H-bridge adapter.
    pub fn new(pwm: PWM, dir_pin: DIR) -> Self {
        Self {
            pwm,
            dir_pin,
            invert_direction: false,
            current_direction: None,
        }
    }

    /// Swap which pin level means forward.
    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Release the PWM channel and direction pin.
    pub fn release(self) -> (PWM, DIR) {
        (self.pwm, self.dir_pin)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Forward => !self.invert_direction,
            Direction::Reverse => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MechanismError::ActuatorFault)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MechanismError::ActuatorFault)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }
}

impl<PWM, DIR> Actuator for HBridge<PWM, DIR>
where
    PWM: SetDutyCycle,
    DIR: OutputPin,
{
    fn set_output(&mut self, output: f64) -> Result<()> {
        let output = if output.is_nan() { 0.0 } else { output.clamp(-1.0, 1.0) };
        self.set_direction(Direction::from_displacement(output))?;

        let max = self.pwm.max_duty_cycle();
        let duty = libm::round(libm::fabs(output) * f64::from(max)) as u16;
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| MechanismError::ActuatorFault)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};

    struct FakePwm {
        max: u16,
        duty: u16,
    }

    impl embedded_hal::pwm::ErrorType for FakePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_duty_and_direction() {
        let expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let pin = PinMock::new(&expectations);
        let mut bridge = HBridge::new(FakePwm { max: 1000, duty: 0 }, pin);

        bridge.set_output(0.5).unwrap();
        assert_eq!(bridge.pwm.duty, 500);

        // Same direction: no pin write expected
        bridge.set_output(1.0).unwrap();
        assert_eq!(bridge.pwm.duty, 1000);

        bridge.set_output(-0.25).unwrap();
        assert_eq!(bridge.pwm.duty, 250);

        let (_, mut pin) = bridge.release();
        pin.done();
    }

    #[test]
    fn test_inverted_direction_and_clamp() {
        let expectations = [PinTransaction::set(PinState::Low)];
        let pin = PinMock::new(&expectations);
        let mut bridge = HBridge::new(FakePwm { max: 255, duty: 0 }, pin).inverted(true);

        bridge.set_output(3.0).unwrap();
        assert_eq!(bridge.pwm.duty, 255);

        let (_, mut pin) = bridge.release();
        pin.done();
    }
}
