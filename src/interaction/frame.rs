use bevy::prelude::*;

use crate::core::components::HostedField;
use crate::core::system::FieldFrameSet;

use super::subscription::{FieldSubscriptions, Signal};

pub struct FieldFramePlugin;

impl Plugin for FieldFramePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldFrameStats>()
            .add_systems(Update, advance_fields.in_set(FieldFrameSet));
    }
}

/// Totals over every field for the last `Update`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFrameStats {
    pub fields: usize,
    pub particles: usize,
    pub connections: usize,
    pub pointer_links: usize,
    pub frames_total: u64,
}

/// The display-refresh tick: one update of every field with a pending frame.
pub fn advance_fields(
    mut fields: Query<(&FieldSubscriptions, &mut HostedField)>,
    mut stats: ResMut<FieldFrameStats>,
) {
    let mut totals = FieldFrameStats {
        frames_total: stats.frames_total,
        ..default()
    };
    for (subs, mut field) in fields.iter_mut() {
        if !subs.is_subscribed(Signal::Frame) || !field.is_frame_pending() {
            continue;
        }
        if let Some(report) = field.update() {
            totals.fields += 1;
            totals.particles += report.particles;
            totals.connections += report.connections;
            totals.pointer_links += report.pointer_links;
            totals.frames_total += 1;
        }
    }
    *stats = totals;
}
