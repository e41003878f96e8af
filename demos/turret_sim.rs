//! Example: Configuration-driven turret in a simulated loop.
//!
//! This example demonstrates how to:
//! - Parse mechanism configuration from TOML
//! - Build a mechanism around an H-bridge actuator
//! - Tick the mechanism at the configured control period against a plant model
//!
//! Run with: `cargo run --example turret_sim --features std`

use servo_motion::{
    config::parse_config,
    error::Result,
    HBridge, Mechanism, MechanismState,
};

/// PWM channel that remembers the last duty cycle.
struct SimPwm {
    duty: u16,
}

impl embedded_hal::pwm::ErrorType for SimPwm {
    type Error = core::convert::Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        1000
    }

    fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

/// Direction pin that remembers its level.
struct SimDirPin {
    high: bool,
}

impl embedded_hal::digital::ErrorType for SimDirPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for SimDirPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

/// Geared DC motor: full duty reaches `FREE_SPEED` with a first-order lag of `TAU`.
struct Turret {
    position: f64,
    velocity: f64,
}

impl Turret {
    const FREE_SPEED: f64 = 4.0;
    const TAU: f64 = 0.05;

    fn step(&mut self, command: f64, dt: f64) {
        self.velocity += (Self::FREE_SPEED * command - self.velocity) * dt / Self::TAU;
        self.position += self.velocity * dt;
    }
}

fn main() -> Result<()> {
    println!("=== Turret Simulation Example ===\n");

    let toml_content = r#"
control_period_ms = 20.0

[mechanisms.turret]
name = "turret"
max_velocity = 2.0
max_acceleration = 4.0
max_jerk = 20.0
tolerance = 0.01

[mechanisms.turret.gains]
kp = 2.0
ki = 0.5
exponent = 1.0
integrator_min = -0.5
integrator_max = 0.5

[mechanisms.turret.feedforward]
kv = 0.25
ka = 0.0125

[mechanisms.turret.limits]
min = -3.0
max = 3.0
policy = "clamp"

[mechanisms.turret.presets]
home = 0.0
left = 1.0
right = -2.5
"#;

    let config = parse_config(toml_content)?;

    let mut turret = Mechanism::builder()
        .from_config(&config, "turret")?
        .actuator(HBridge::new(SimPwm { duty: 0 }, SimDirPin { high: false }))
        .build()?;

    let mut plant = Turret {
        position: 0.0,
        velocity: 0.0,
    };
    let dt = turret.period();

    println!("Mechanism: {}", turret.name());
    println!("  Control period: {} ms", dt * 1000.0);
    print!("  Presets:");
    for name in turret.preset_names() {
        print!(" {}", name);
    }
    println!("\n");

    for preset in ["left", "right", "home"] {
        turret.move_to_preset(preset)?;

        let plan = turret.profile().plan();
        println!("Move to '{}' (goal {:.3})", preset, turret.goal());
        println!("  Regime: {:?}", plan.regime());
        println!("  Duration: {:.3}s", plan.total_duration());
        println!("  Peak velocity: {:.3}", plan.peak_velocity());

        let mut ticks = 0;
        let mut worst = 0.0_f64;
        while turret.state() == MechanismState::Moving || !turret.at_goal(plant.position) {
            turret.tick(plant.position)?;
            plant.step(turret.last_output(), dt);
            worst = worst.max((turret.reference().position - plant.position).abs());

            ticks += 1;
            if ticks % 10 == 0 {
                println!(
                    "    t={:.2}s phase={:?} ref={:.3} pos={:.3} out={:+.3}",
                    turret.profile().elapsed(),
                    turret.profile().phase(),
                    turret.reference().position,
                    plant.position,
                    turret.last_output()
                );
            }
            if ticks > 1_000 {
                println!("  Did not settle");
                break;
            }
        }

        println!(
            "  Settled at {:.4} after {} ticks, worst tracking error {:.4}\n",
            plant.position, ticks, worst
        );
    }

    // Out-of-range targets are clamped by this configuration
    turret.move_to(10.0)?;
    println!("move_to(10.0) clamped to goal {:.1}", turret.goal());

    turret.stop()?;
    println!("Stopped: state={}", turret.state().name());

    let (pwm, dir) = turret.release().release();
    println!("Bridge released: duty={} dir_high={}", pwm.duty, dir.high);

    println!("\n=== Example Complete ===");

    Ok(())
}
