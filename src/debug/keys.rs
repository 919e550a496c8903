#[cfg(feature = "debug")]
use super::stats::DebugState;
#[cfg(feature = "debug")]
use crate::core::components::{HostedField, TeardownField};
#[cfg(feature = "debug")]
use bevy::prelude::*;

/// `T` tears down every live field, `L` toggles the periodic stats line.
#[cfg(feature = "debug")]
pub fn debug_key_input_system(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut state: ResMut<DebugState>,
    fields: Query<Entity, With<HostedField>>,
    mut teardown: EventWriter<TeardownField>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.just_pressed(KeyCode::KeyT) {
        for host in fields.iter() {
            teardown.write(TeardownField { host });
        }
        info!("DEBUG teardown requested frame={}", state.frame_counter);
    }
    if keys.just_pressed(KeyCode::KeyL) {
        state.logging_enabled = !state.logging_enabled;
    }
}
