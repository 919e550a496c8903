use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::components::{FieldOverrides, HostedField, ParticlesHost, TeardownField};
use crate::core::config::FieldAppConfig;
use crate::core::system::FieldSignalSet;
use crate::field::ParticleField;
use crate::interaction::subscription::FieldSubscriptions;
use crate::rendering::surface::DisplayList;

use super::motion::{resolve_motion_system, MotionPreference};
use super::registry::{HostCapabilities, HostRegistry};

pub struct HostLifecyclePlugin;

impl Plugin for HostLifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HostRegistry>()
            .add_event::<TeardownField>()
            .add_systems(Startup, resolve_motion_system)
            .add_systems(
                Update,
                (prune_removed_hosts, activate_hosts, handle_teardown_requests)
                    .chain()
                    .in_set(FieldSignalSet),
            )
            .add_systems(Last, teardown_all_on_exit);
    }
}

/// Window size used to resolve host bounds; config size when there is no window
/// (headless).
pub fn primary_window_size(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cfg: &FieldAppConfig,
) -> Vec2 {
    match windows.single() {
        Ok(win) => Vec2::new(win.width(), win.height()),
        Err(_) => Vec2::new(cfg.window.width, cfg.window.height),
    }
}

/// Builds a field on every newly discovered host. Each host is resolved into the
/// registry exactly once; retired hosts are never rebuilt.
pub fn activate_hosts(
    mut commands: Commands,
    cfg: Res<FieldAppConfig>,
    motion: Option<Res<MotionPreference>>,
    mut registry: ResMut<HostRegistry>,
    windows: Query<&Window, With<PrimaryWindow>>,
    hosts: Query<(Entity, &ParticlesHost, Option<&FieldOverrides>), Without<HostedField>>,
    mut announced: Local<bool>,
) {
    if motion.is_some_and(|m| m.reduced) {
        return;
    }
    if !*announced {
        *announced = true;
        if hosts.is_empty() {
            info!("No particle hosts found");
            return;
        }
    }
    let window_size = primary_window_size(&windows, &cfg);
    let mut rng = rand::thread_rng();
    for (entity, host, overrides) in hosts.iter() {
        if registry.contains(entity) {
            continue;
        }
        let caps = HostCapabilities::resolve(&cfg, overrides, window_size.x);
        let rect = host.area.resolve(window_size);
        let field = ParticleField::new(DisplayList::default(), rect.size(), &caps.config, &mut rng);
        let subs = FieldSubscriptions::for_config(&caps.config);
        info!(
            host = ?entity,
            particles = field.particles().len(),
            compact = caps.compact,
            "Particle field initialized ({}x{})",
            rect.width(),
            rect.height()
        );
        registry.register(entity, caps);
        commands.entity(entity).insert((HostedField(field), subs));
    }
}

/// Cancels the frame, disposes every subscription and detaches the surface.
/// Safe to call any number of times.
pub fn teardown_field(field: &mut ParticleField, subs: &mut FieldSubscriptions) -> bool {
    let had_surface = field.teardown();
    let disposed = subs.dispose_all();
    had_surface || disposed > 0
}

pub fn handle_teardown_requests(
    mut commands: Commands,
    mut requests: EventReader<TeardownField>,
    mut registry: ResMut<HostRegistry>,
    mut fields: Query<(&mut HostedField, &mut FieldSubscriptions)>,
) {
    for req in requests.read() {
        let Ok((mut field, mut subs)) = fields.get_mut(req.host) else {
            debug!(host = ?req.host, "Teardown requested for host without a live field");
            continue;
        };
        if teardown_field(&mut field.0, &mut subs) {
            info!(host = ?req.host, "Particle field torn down");
        }
        registry.retire(req.host);
        commands
            .entity(req.host)
            .remove::<(HostedField, FieldSubscriptions)>();
    }
}

/// Forgets hosts that were despawned or lost their `ParticlesHost` marker. A
/// field still attached to a surviving entity is torn down with it.
pub fn prune_removed_hosts(
    mut commands: Commands,
    mut removed: RemovedComponents<ParticlesHost>,
    mut registry: ResMut<HostRegistry>,
    mut fields: Query<(&mut HostedField, &mut FieldSubscriptions)>,
) {
    for host in removed.read() {
        if registry.forget(host).is_none() {
            continue;
        }
        if let Ok((mut field, mut subs)) = fields.get_mut(host) {
            teardown_field(&mut field.0, &mut subs);
            commands
                .entity(host)
                .remove::<(HostedField, FieldSubscriptions)>();
        }
        debug!(host = ?host, "Particle host removed");
    }
}

fn teardown_all_on_exit(
    mut exits: EventReader<AppExit>,
    mut registry: ResMut<HostRegistry>,
    mut fields: Query<(Entity, &mut HostedField, &mut FieldSubscriptions)>,
) {
    if exits.read().next().is_none() {
        return;
    }
    for (entity, mut field, mut subs) in fields.iter_mut() {
        teardown_field(&mut field.0, &mut subs);
        registry.retire(entity);
    }
}
