use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::core::components::{HostedField, ParticlesHost};
use crate::core::system::FieldSignalSet;
use crate::host::lifecycle::activate_hosts;

use super::subscription::{FieldSubscriptions, Signal};

pub struct ResizeSignalsPlugin;

impl Plugin for ResizeSignalsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WindowResized>().add_systems(
            Update,
            resync_on_resize.in_set(FieldSignalSet).after(activate_hosts),
        );
    }
}

/// Recomputes every subscribed host's bounds on each primary-window resize.
/// Unthrottled; only the final size of the frame is applied.
pub fn resync_on_resize(
    mut resized: EventReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut fields: Query<(&ParticlesHost, &FieldSubscriptions, &mut HostedField)>,
) {
    let primary = primary.single().ok();
    let Some(ev) = resized
        .read()
        .filter(|ev| primary.map_or(true, |p| p == ev.window))
        .last()
    else {
        return;
    };
    let window_size = Vec2::new(ev.width, ev.height);
    for (host, subs, mut field) in fields.iter_mut() {
        if !subs.is_subscribed(Signal::Resize) {
            continue;
        }
        let rect = host.area.resolve(window_size);
        if field.size() != rect.size() {
            debug!(size = ?rect.size(), "Particle surface resized");
            field.resize(rect.size());
        }
    }
}
