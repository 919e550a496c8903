use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::components::{HostedField, ParticlesHost};
use crate::core::config::FieldAppConfig;
use crate::core::system::FieldPresentSet;
use crate::host::lifecycle::primary_window_size;

use super::surface::{DrawCommand, LineKind};

/// Gizmo group for particle-to-particle lines (width = `field.line_width`).
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ConnectionGizmos;

/// Gizmo group for particle-to-pointer lines (width = `field.pointer_line_width`).
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct PointerGizmos;

pub struct FieldPresentPlugin;

impl Plugin for FieldPresentPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<ConnectionGizmos>()
            .init_gizmo_group::<PointerGizmos>()
            .add_systems(Startup, sync_stroke_widths)
            .add_systems(
                Update,
                (
                    sync_stroke_widths.run_if(resource_changed::<FieldAppConfig>),
                    present_fields.in_set(FieldPresentSet),
                ),
            );
    }
}

fn sync_stroke_widths(cfg: Res<FieldAppConfig>, mut store: ResMut<GizmoConfigStore>) {
    let (conn, _) = store.config_mut::<ConnectionGizmos>();
    conn.line.width = cfg.field.line_width.max(0.1);
    let (ptr, _) = store.config_mut::<PointerGizmos>();
    ptr.line.width = cfg.field.pointer_line_width.max(0.1);
}

// Ring spacing for filled shapes, in logical pixels.
const DISC_RING_STEP: f32 = 1.0;
const GLOW_RING_STEP: f32 = 2.0;
const HALO_RING_STEP: f32 = 3.0;
// Peak alpha of the outer glow relative to the particle color.
const GLOW_STRENGTH: f32 = 0.35;

fn draw_disc(gizmos: &mut Gizmos, center: Vec2, radius: f32, color: Color, glow: f32) {
    let mut r = radius;
    while r > 0.0 {
        gizmos.circle_2d(center, r, color);
        r -= DISC_RING_STEP;
    }
    let base_alpha = color.alpha();
    let mut g = GLOW_RING_STEP;
    while g <= glow {
        let t = g / glow;
        let a = base_alpha * GLOW_STRENGTH * (1.0 - t) * (1.0 - t);
        gizmos.circle_2d(center, radius + g, color.with_alpha(a));
        g += GLOW_RING_STEP;
    }
}

fn draw_halo(gizmos: &mut Gizmos, center: Vec2, radius: f32, color: Color) {
    let base_alpha = color.alpha();
    let mut r = HALO_RING_STEP;
    while r < radius {
        let a = base_alpha * (1.0 - r / radius);
        gizmos.circle_2d(center, r, color.with_alpha(a));
        r += HALO_RING_STEP;
    }
}

/// Replays every live field's display list. Surface coordinates are offset by the
/// host's on-screen rect and unprojected through the 2D camera.
pub fn present_fields(
    mut gizmos: Gizmos,
    mut connections: Gizmos<ConnectionGizmos>,
    mut pointer_lines: Gizmos<PointerGizmos>,
    cfg: Res<FieldAppConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    fields: Query<(&ParticlesHost, &HostedField)>,
) {
    let Ok((camera, cam_tf)) = camera_q.single() else {
        return;
    };
    let window_size = primary_window_size(&windows, &cfg);
    for (host, field) in fields.iter() {
        let Some(surface) = field.surface() else {
            continue;
        };
        let origin = host.area.resolve(window_size).min;
        let to_world = |p: Vec2| camera.viewport_to_world_2d(cam_tf, origin + p).ok();
        for cmd in surface.commands() {
            match *cmd {
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    kind,
                } => {
                    let (Some(a), Some(b)) = (to_world(from), to_world(to)) else {
                        continue;
                    };
                    match kind {
                        LineKind::Connection => connections.line_2d(a, b, color),
                        LineKind::Pointer => pointer_lines.line_2d(a, b, color),
                    }
                }
                DrawCommand::Disc {
                    center,
                    radius,
                    color,
                    glow,
                } => {
                    if let Some(c) = to_world(center) {
                        draw_disc(&mut gizmos, c, radius, color, glow);
                    }
                }
                DrawCommand::Halo {
                    center,
                    radius,
                    color,
                } => {
                    if let Some(c) = to_world(center) {
                        draw_halo(&mut gizmos, c, radius, color);
                    }
                }
            }
        }
    }
}
