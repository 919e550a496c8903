use bevy::prelude::*;
use bevy::window::{CursorLeft, CursorMoved, PrimaryWindow, WindowResized};
use particle_field::host::{HostRegistry, HostState, MotionPreference};
use particle_field::interaction::{FieldFrameStats, FieldSubscriptions, Signal};
use particle_field::{
    DrawSurface, FieldAppConfig, FieldOverrides, HostArea, HostedField, ParticleFieldPlugin, ParticlesHost,
    TeardownField,
};

fn app_with_window(width: f32, height: f32) -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(MotionPreference::full());
    app.add_plugins(ParticleFieldPlugin::headless());
    let window = app
        .world_mut()
        .spawn((
            Window {
                resolution: (width, height).into(),
                ..default()
            },
            PrimaryWindow,
        ))
        .id();
    (app, window)
}

fn field(app: &App, host: Entity) -> &HostedField {
    app.world()
        .get::<HostedField>(host)
        .expect("host should carry a field")
}

#[test]
fn every_host_gets_its_own_field() {
    let (mut app, _) = app_with_window(1024.0, 768.0);
    let a = app.world_mut().spawn(ParticlesHost::window()).id();
    let b = app
        .world_mut()
        .spawn((
            ParticlesHost::region(HostArea::Fixed(Rect::new(0.0, 0.0, 200.0, 100.0))),
            FieldOverrides {
                particle_count: Some(7),
                ..default()
            },
        ))
        .id();
    app.update();

    assert_eq!(field(&app, a).particles().len(), 50);
    assert_eq!(field(&app, a).size(), Vec2::new(1024.0, 768.0));
    assert_eq!(field(&app, b).particles().len(), 7);
    assert_eq!(field(&app, b).size(), Vec2::new(200.0, 100.0));

    let registry = app.world().resource::<HostRegistry>();
    assert_eq!(registry.active_count(), 2);

    // First frame is drawn in the same update the host was discovered.
    let stats = *app.world().resource::<FieldFrameStats>();
    assert_eq!(stats.fields, 2);
    assert_eq!(stats.particles, 57);
}

#[test]
fn hosts_spawned_later_are_picked_up() {
    let (mut app, _) = app_with_window(1024.0, 768.0);
    app.update();
    assert_eq!(app.world().resource::<HostRegistry>().len(), 0);

    let host = app.world_mut().spawn(ParticlesHost::window()).id();
    app.update();
    assert!(app.world().get::<HostedField>(host).is_some());
}

#[test]
fn frames_keep_advancing_each_update() {
    let (mut app, _) = app_with_window(800.0, 600.0);
    let host = app.world_mut().spawn(ParticlesHost::window()).id();
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(field(&app, host).frame(), 5);
    assert!(field(&app, host).is_frame_pending());
}

#[test]
fn narrow_window_uses_compact_profile() {
    let (mut app, _) = app_with_window(600.0, 800.0);
    let host = app.world_mut().spawn(ParticlesHost::window()).id();
    app.update();

    let f = field(&app, host);
    assert_eq!(f.particles().len(), 20);
    assert!(!f.config().connections_enabled);
    let subs = app.world().get::<FieldSubscriptions>(host).expect("subscriptions");
    assert!(subs.is_subscribed(Signal::Frame));

    let registry = app.world().resource::<HostRegistry>();
    assert!(registry.get(host).is_some_and(|e| e.capabilities.compact));
}

#[test]
fn reduced_motion_builds_nothing() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(MotionPreference::reduced());
    app.add_plugins(ParticleFieldPlugin::headless());
    let host = app.world_mut().spawn(ParticlesHost::window()).id();
    for _ in 0..3 {
        app.update();
    }
    assert!(app.world().get::<HostedField>(host).is_none());
    assert!(app.world().resource::<HostRegistry>().is_empty());
}

#[test]
fn config_reduced_motion_is_resolved_at_startup() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(FieldAppConfig {
        reduced_motion: Some(true),
        ..default()
    });
    app.add_plugins(ParticleFieldPlugin::headless());
    let host = app.world_mut().spawn(ParticlesHost::window()).id();
    app.update();
    assert!(app.world().resource::<MotionPreference>().reduced);
    assert!(app.world().get::<HostedField>(host).is_none());
}

#[test]
fn pointer_events_reach_subscribed_fields() {
    let (mut app, window) = app_with_window(1000.0, 800.0);
    let full = app.world_mut().spawn(ParticlesHost::window()).id();
    let panel = app
        .world_mut()
        .spawn(ParticlesHost::region(HostArea::Fixed(Rect::new(500.0, 400.0, 900.0, 700.0))))
        .id();
    let no_pointer = app
        .world_mut()
        .spawn((
            ParticlesHost::window(),
            FieldOverrides {
                pointer_enabled: Some(false),
                ..default()
            },
        ))
        .id();
    app.update();

    app.world_mut().send_event(CursorMoved {
        window,
        position: Vec2::new(600.0, 450.0),
        delta: None,
    });
    app.update();
    assert_eq!(field(&app, full).pointer(), Some(Vec2::new(600.0, 450.0)));
    assert_eq!(field(&app, panel).pointer(), Some(Vec2::new(100.0, 50.0)));
    assert_eq!(field(&app, no_pointer).pointer(), None);
    let subs = app.world().get::<FieldSubscriptions>(no_pointer).expect("subscriptions");
    assert!(!subs.is_subscribed(Signal::PointerMove));

    // Outside the panel: the panel loses its pointer, the full-window field follows.
    app.world_mut().send_event(CursorMoved {
        window,
        position: Vec2::new(100.0, 100.0),
        delta: None,
    });
    app.update();
    assert_eq!(field(&app, full).pointer(), Some(Vec2::new(100.0, 100.0)));
    assert_eq!(field(&app, panel).pointer(), None);

    app.world_mut().send_event(CursorLeft { window });
    app.update();
    assert_eq!(field(&app, full).pointer(), None);
}

#[test]
fn leave_in_same_frame_as_move_wins() {
    let (mut app, window) = app_with_window(1000.0, 800.0);
    let host = app.world_mut().spawn(ParticlesHost::window()).id();
    app.update();

    app.world_mut().send_event(CursorMoved {
        window,
        position: Vec2::new(10.0, 10.0),
        delta: None,
    });
    app.world_mut().send_event(CursorLeft { window });
    app.update();
    assert_eq!(field(&app, host).pointer(), None);
}

#[test]
fn resize_resynchronises_surface() {
    let (mut app, window) = app_with_window(1000.0, 800.0);
    let full = app.world_mut().spawn(ParticlesHost::window()).id();
    let half = app
        .world_mut()
        .spawn(ParticlesHost::region(HostArea::Fraction(Rect::new(0.5, 0.0, 1.0, 0.5))))
        .id();
    app.update();
    assert_eq!(field(&app, half).size(), Vec2::new(500.0, 400.0));

    app.world_mut().send_event(WindowResized {
        window,
        width: 640.0,
        height: 480.0,
    });
    app.update();
    assert_eq!(field(&app, full).size(), Vec2::new(640.0, 480.0));
    assert_eq!(field(&app, half).size(), Vec2::new(320.0, 240.0));
    let surface_size = field(&app, full).surface().map(DrawSurface::size);
    assert_eq!(surface_size, Some(Vec2::new(640.0, 480.0)));
    for p in field(&app, full).particles() {
        assert!(p.position.x <= 640.0 && p.position.y <= 480.0);
    }
}

#[test]
fn teardown_event_retires_host_for_good() {
    let (mut app, _) = app_with_window(1000.0, 800.0);
    let host = app.world_mut().spawn(ParticlesHost::window()).id();
    app.update();
    assert!(app.world().get::<HostedField>(host).is_some());

    app.world_mut().send_event(TeardownField { host });
    app.world_mut().send_event(TeardownField { host });
    app.update();
    assert!(app.world().get::<HostedField>(host).is_none());
    assert!(app.world().get::<FieldSubscriptions>(host).is_none());
    let registry = app.world().resource::<HostRegistry>();
    assert_eq!(registry.get(host).map(|e| e.state), Some(HostState::Retired));

    // Still marked as a host, but never rebuilt.
    app.world_mut().send_event(TeardownField { host });
    for _ in 0..3 {
        app.update();
    }
    assert!(app.world().get::<HostedField>(host).is_none());
    assert_eq!(app.world().resource::<FieldFrameStats>().fields, 0);
}

#[test]
fn manual_teardown_disposes_every_subscription() {
    let (mut app, _) = app_with_window(1000.0, 800.0);
    let host = app.world_mut().spawn(ParticlesHost::window()).id();
    app.update();

    let world = app.world_mut();
    let mut entity = world.entity_mut(host);
    let mut subs = entity
        .take::<FieldSubscriptions>()
        .expect("subscriptions present");
    let mut hosted = entity.take::<HostedField>().expect("field present");
    assert_eq!(subs.active_count(), 4);

    assert!(particle_field::host::teardown_field(&mut hosted.0, &mut subs));
    assert!(!particle_field::host::teardown_field(&mut hosted.0, &mut subs));
    assert_eq!(subs.active_count(), 0);
    assert!(hosted.update().is_none());
}

#[test]
fn removed_hosts_are_forgotten() {
    let (mut app, _) = app_with_window(1000.0, 800.0);
    let despawned = app.world_mut().spawn(ParticlesHost::window()).id();
    let demoted = app.world_mut().spawn(ParticlesHost::window()).id();
    app.update();
    assert_eq!(app.world().resource::<HostRegistry>().len(), 2);

    app.world_mut().despawn(despawned);
    app.world_mut().entity_mut(demoted).remove::<ParticlesHost>();
    app.update();

    assert!(app.world().resource::<HostRegistry>().is_empty());
    assert!(app.world().get::<HostedField>(demoted).is_none());
    assert!(app.world().get::<FieldSubscriptions>(demoted).is_none());
}
