//! Client command execution.
//!
//! Each command loads what it needs through a fresh [`DeviceRegistry`] or
//! fires a single [`AnimationDispatcher`] call, then prints a summary.

use std::io::Write;

use hoo_adapter_virtual::SimulatedLight;
use hoo_app::ports::{BridgeTransport, Light, Motion};
use hoo_app::services::animation_dispatcher::AnimationDispatcher;
use hoo_app::services::bridge_light::BridgeLight;
use hoo_app::services::device_registry::DeviceRegistry;
use hoo_domain::color::Rgb;
use hoo_domain::error::{DeviceError, NotFoundError};
use hoo_domain::id::LightNumber;

use crate::cli::ClientCommand;

/// Errors surfaced by client commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The bridge call failed or was refused.
    #[error(transparent)]
    Device(#[from] DeviceError),
    /// Writing the summary failed.
    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}

/// Run `command` against the bridge behind `transport`.
///
/// # Errors
///
/// Returns [`CommandError::Device`] when the bridge call fails or the light
/// does not exist, and [`CommandError::Output`] when printing fails.
pub async fn run<T, W>(command: ClientCommand, transport: T, out: &mut W) -> Result<(), CommandError>
where
    T: BridgeTransport + Clone,
    W: Write,
{
    match command {
        ClientCommand::Lights { active } => {
            let mut registry = DeviceRegistry::new(transport);
            registry.load_lights().await?;
            if active {
                for light in registry.active_lights() {
                    writeln!(out, "{}", describe_light(light))?;
                }
            } else {
                for light in registry.lights() {
                    writeln!(out, "{}", describe_light(light))?;
                }
            }
        }
        ClientCommand::Light { number } => {
            let mut registry = DeviceRegistry::new(transport);
            let light = load_light(&mut registry, number).await?;
            light.update().await?;
            writeln!(out, "{}", describe_light(light))?;
        }
        ClientCommand::Motion => {
            let mut registry = DeviceRegistry::new(transport);
            for sensor in registry.load_motion_sensors().await? {
                let presence = if sensor.presence() { "presence" } else { "clear" };
                writeln!(out, "{}: {presence}", sensor.name())?;
            }
        }
        ClientCommand::On { number } => {
            let mut registry = DeviceRegistry::new(transport);
            let light = load_light(&mut registry, number).await?;
            light.turn_on().await?;
            writeln!(out, "{}", describe_light(light))?;
        }
        ClientCommand::Off { number } => {
            let mut registry = DeviceRegistry::new(transport);
            let light = load_light(&mut registry, number).await?;
            light.turn_off().await?;
            writeln!(out, "{}", describe_light(light))?;
        }
        ClientCommand::Toggle { number } => {
            let mut registry = DeviceRegistry::new(transport);
            let light = load_light(&mut registry, number).await?;
            light.toggle().await?;
            writeln!(out, "{}", describe_light(light))?;
        }
        ClientCommand::Transition { number, deciseconds } => {
            let mut registry = DeviceRegistry::new(transport);
            let light = load_light(&mut registry, number).await?;
            light.set_transition_time(deciseconds).await?;
            writeln!(out, "{}", describe_light(light))?;
        }
        ClientCommand::Hsb { number, hue, sat, bri } => {
            let mut registry = DeviceRegistry::new(transport);
            let light = load_light(&mut registry, number).await?;
            light.set_hsb(hue, sat, bri).await?;
            writeln!(out, "{}", describe_light(light))?;
        }
        ClientCommand::Rgb {
            number,
            red,
            green,
            blue,
        } => {
            let mut registry = DeviceRegistry::new(transport);
            let light = load_light(&mut registry, number).await?;
            light.set_color(Rgb::new(red, green, blue)).await?;
            writeln!(out, "{}", describe_light(light))?;
        }
        ClientCommand::Hue { number, value } => {
            let mut registry = DeviceRegistry::new(transport);
            let light = load_light(&mut registry, number).await?;
            light.set_hue(value).await?;
            writeln!(out, "{}", describe_light(light))?;
        }
        ClientCommand::Sat { number, value } => {
            let mut registry = DeviceRegistry::new(transport);
            let light = load_light(&mut registry, number).await?;
            light.set_saturation(value).await?;
            writeln!(out, "{}", describe_light(light))?;
        }
        ClientCommand::Bri { number, value } => {
            let mut registry = DeviceRegistry::new(transport);
            let light = load_light(&mut registry, number).await?;
            light.set_brightness(value).await?;
            writeln!(out, "{}", describe_light(light))?;
        }
        ClientCommand::Rotate {
            transition,
            hold,
            lights,
            hues,
        } => {
            AnimationDispatcher::new(transport)
                .rotate(transition, hold, lights, hues)
                .await?;
            writeln!(out, "rotating")?;
        }
        ClientCommand::Random {
            transition,
            hold,
            lights,
        } => {
            AnimationDispatcher::new(transport)
                .random(transition, hold, lights)
                .await?;
            writeln!(out, "random colours")?;
        }
        ClientCommand::Sleepy {
            transition,
            hold,
            lights,
        } => {
            AnimationDispatcher::new(transport)
                .sleepy(transition, hold, lights)
                .await?;
            writeln!(out, "sleepy colours")?;
        }
        ClientCommand::Stop => {
            AnimationDispatcher::new(transport).stop().await?;
            writeln!(out, "stopped")?;
        }
    }
    Ok(())
}

/// Print `count` freshly simulated lights, numbered from 1.
///
/// # Errors
///
/// Returns [`std::io::Error`] when printing fails.
pub fn simulate<W: Write>(count: u32, out: &mut W) -> std::io::Result<()> {
    for n in 1..=count {
        let light = SimulatedLight::new(format!("Light {n}"), LightNumber::new(n));
        writeln!(out, "{}", describe_light(&light))?;
    }
    Ok(())
}

async fn load_light<T: BridgeTransport + Clone>(
    registry: &mut DeviceRegistry<T>,
    number: LightNumber,
) -> Result<&mut BridgeLight<T>, DeviceError> {
    registry.load_lights().await?;
    registry.light_mut(number).ok_or_else(|| {
        NotFoundError {
            kind: "Light",
            id: number.to_string(),
        }
        .into()
    })
}

/// One-line summary of a light.
fn describe_light(light: &impl Light) -> String {
    let state = light.state();
    let power = if state.on { "on" } else { "off" };
    let reachable = if state.reachable { "" } else { " (unreachable)" };
    format!(
        "{:>3}  {power:<3}  hue {:>5}  sat {:>3}  bri {:>3}  {}{reachable}",
        light.number(),
        state.hue,
        state.saturation,
        state.brightness,
        light.name(),
    )
}
