use bevy::prelude::*;
use bevy::window::{CursorLeft, CursorMoved, PrimaryWindow};

use crate::core::components::{HostedField, ParticlesHost};
use crate::core::config::FieldAppConfig;
use crate::core::system::FieldSignalSet;
use crate::host::lifecycle::{activate_hosts, primary_window_size};

use super::subscription::{FieldSubscriptions, Signal};

pub struct PointerSignalsPlugin;

impl Plugin for PointerSignalsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CursorMoved>()
            .add_event::<CursorLeft>()
            .add_systems(
                Update,
                deliver_pointer_signals
                    .in_set(FieldSignalSet)
                    .after(activate_hosts),
            );
    }
}

/// Last pointer signal of the frame for the primary window.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PointerSignal {
    Moved(Vec2),
    Left,
}

/// Forwards primary-window cursor events to every field subscribed to them.
/// Positions arrive in viewport coordinates and are made container-local by the
/// field. Only the latest signal of the frame matters; a leave in the same frame
/// as a move wins.
pub fn deliver_pointer_signals(
    mut moved: EventReader<CursorMoved>,
    mut left: EventReader<CursorLeft>,
    cfg: Res<FieldAppConfig>,
    primary: Query<Entity, With<PrimaryWindow>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut fields: Query<(&ParticlesHost, &FieldSubscriptions, &mut HostedField)>,
) {
    let primary = primary.single().ok();
    let for_primary = |window: Entity| primary.map_or(true, |p| p == window);
    let mut signal = moved
        .read()
        .filter(|ev| for_primary(ev.window))
        .last()
        .map(|ev| PointerSignal::Moved(ev.position));
    if left.read().any(|ev| for_primary(ev.window)) {
        signal = Some(PointerSignal::Left);
    }
    let Some(signal) = signal else {
        return;
    };
    let window_size = primary_window_size(&windows, &cfg);
    for (host, subs, mut field) in fields.iter_mut() {
        match signal {
            PointerSignal::Moved(pos) if subs.is_subscribed(Signal::PointerMove) => {
                let rect = host.area.resolve(window_size);
                field.pointer_moved(pos, rect);
            }
            PointerSignal::Left if subs.is_subscribed(Signal::PointerLeave) => {
                field.pointer_left();
            }
            _ => {}
        }
    }
}
