use bevy::prelude::*;
use particle_field::core::config::{FieldConfig, SpawnRange};
use particle_field::rendering::palette::parse_hex;
use particle_field::rendering::surface::{DrawCommand, LineKind};
use particle_field::{DisplayList, DrawSurface, Particle, ParticleField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_config() -> FieldConfig {
    FieldConfig {
        pointer_glow_radius: 0.0,
        ..FieldConfig::default()
    }
}

fn still(x: f32, y: f32) -> Particle {
    Particle::new(Vec2::new(x, y), Vec2::ZERO, 2.0, Color::WHITE)
}

fn line_alphas(field: &ParticleField, kind: LineKind) -> Vec<f32> {
    field
        .surface()
        .expect("live surface")
        .lines(kind)
        .filter_map(|c| match c {
            DrawCommand::Line { color, .. } => Some(color.alpha()),
            _ => None,
        })
        .collect()
}

#[test]
fn default_field_matches_reference_look() {
    let mut rng = StdRng::seed_from_u64(1);
    let cfg = FieldConfig::default();
    let field = ParticleField::new(DisplayList::default(), Vec2::new(1024.0, 768.0), &cfg, &mut rng);
    assert_eq!(field.particles().len(), 50);
    assert!(field.is_running() && field.is_frame_pending());

    let palette: Vec<Color> = ["#00ffff", "#a855f7", "#ff00ff"]
        .iter()
        .map(|h| parse_hex(h).expect("palette hex"))
        .collect();
    for p in field.particles() {
        assert!(SpawnRange::new(2.0, 4.0).contains(p.radius), "radius {}", p.radius);
        let speed = p.velocity.length();
        assert!(speed >= 0.5 - 1e-4 && speed <= 2.0 + 1e-4, "speed {speed}");
        assert!(palette.contains(&p.color));
        assert!(p.position.x >= 0.0 && p.position.x <= 1024.0);
        assert!(p.position.y >= 0.0 && p.position.y <= 768.0);
    }
}

#[test]
fn particles_stay_inside_surface_over_many_frames() {
    let mut rng = StdRng::seed_from_u64(99);
    let cfg = FieldConfig {
        speed_range: SpawnRange::new(5.0, 12.0),
        ..quiet_config()
    };
    let size = Vec2::new(320.0, 200.0);
    let mut field = ParticleField::new(DisplayList::default(), size, &cfg, &mut rng);
    field.pointer_moved(Vec2::new(160.0, 100.0), Rect::from_corners(Vec2::ZERO, size));
    for _ in 0..600 {
        field.update().expect("frame scheduled");
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x <= size.x, "x {}", p.position.x);
            assert!(p.position.y >= 0.0 && p.position.y <= size.y, "y {}", p.position.y);
        }
    }
    assert_eq!(field.frame(), 600);
}

#[test]
fn right_edge_crossing_flips_velocity_once() {
    let cfg = FieldConfig {
        connections_enabled: false,
        pointer_enabled: false,
        ..quiet_config()
    };
    let p = Particle::new(Vec2::new(399.5, 50.0), Vec2::new(1.0, 0.0), 2.0, Color::WHITE);
    let mut field = ParticleField::with_particles(DisplayList::default(), Vec2::new(400.0, 400.0), &cfg, vec![p]);
    field.start();

    field.update();
    assert_eq!(field.particles()[0].velocity.x, -1.0);
    assert_eq!(field.particles()[0].position.x, 400.0);

    field.update();
    assert_eq!(field.particles()[0].velocity.x, -1.0);
    assert_eq!(field.particles()[0].position.x, 399.0);
}

#[test]
fn particle_left_outside_after_shrink_is_pulled_back_without_bouncing_twice() {
    let cfg = FieldConfig {
        pointer_enabled: false,
        ..quiet_config()
    };
    let p = Particle::new(Vec2::new(350.0, 50.0), Vec2::new(-1.0, 0.0), 2.0, Color::WHITE);
    let mut field = ParticleField::with_particles(DisplayList::default(), Vec2::new(400.0, 400.0), &cfg, vec![p]);
    field.start();
    field.resize(Vec2::new(200.0, 400.0));
    field.update();
    // Already heading inwards: clamped, not reflected.
    assert_eq!(field.particles()[0].velocity.x, -1.0);
    assert_eq!(field.particles()[0].position.x, 200.0);
}

#[test]
fn connection_opacity_fades_with_distance() {
    let cfg = FieldConfig {
        pointer_enabled: false,
        ..quiet_config()
    };
    let mut field = ParticleField::with_particles(
        DisplayList::default(),
        Vec2::new(500.0, 500.0),
        &cfg,
        vec![still(100.0, 100.0), still(200.0, 100.0)],
    );
    field.start();
    let report = field.update().expect("frame");
    assert_eq!(report.connections, 1);
    let alphas = line_alphas(&field, LineKind::Connection);
    assert_eq!(alphas.len(), 1);
    assert!((alphas[0] - 0.2 / 3.0).abs() < 1e-3, "alpha {}", alphas[0]);
}

#[test]
fn no_connection_at_or_beyond_reach() {
    let cfg = FieldConfig {
        pointer_enabled: false,
        ..quiet_config()
    };
    let mut field = ParticleField::with_particles(
        DisplayList::default(),
        Vec2::new(500.0, 500.0),
        &cfg,
        vec![still(100.0, 100.0), still(250.0, 100.0), still(100.0, 300.0)],
    );
    field.start();
    let report = field.update().expect("frame");
    assert_eq!(report.connections, 0);
    assert!(line_alphas(&field, LineKind::Connection).is_empty());
    assert_eq!(field.surface().map(|s| s.discs().count()), Some(3));
}

#[test]
fn connections_disabled_draws_only_particles() {
    let cfg = FieldConfig {
        connections_enabled: false,
        pointer_enabled: false,
        ..quiet_config()
    };
    let mut field = ParticleField::with_particles(
        DisplayList::default(),
        Vec2::new(500.0, 500.0),
        &cfg,
        vec![still(100.0, 100.0), still(101.0, 100.0)],
    );
    field.start();
    field.update();
    let surface = field.surface().expect("surface");
    assert_eq!(surface.lines(LineKind::Connection).count(), 0);
    assert_eq!(surface.discs().count(), 2);
}

#[test]
fn pointer_repels_and_links_nearby_particle() {
    let cfg = FieldConfig {
        connections_enabled: false,
        ..quiet_config()
    };
    let mut field = ParticleField::with_particles(
        DisplayList::default(),
        Vec2::new(500.0, 500.0),
        &cfg,
        vec![still(150.0, 100.0)],
    );
    field.start();
    field.pointer_moved(Vec2::new(100.0, 100.0), Rect::new(0.0, 0.0, 500.0, 500.0));
    let report = field.update().expect("frame");
    assert_eq!(report.pointer_links, 1);

    let v = field.particles()[0].velocity;
    assert!((v.x - 0.375).abs() < 1e-5, "vx {}", v.x);
    assert!(v.y.abs() < 1e-6);

    // (1 - 50/200) * 0.5
    let alphas = line_alphas(&field, LineKind::Pointer);
    assert_eq!(alphas.len(), 1);
    assert!((alphas[0] - 0.375).abs() < 1e-3);
}

#[test]
fn pointer_is_container_local_and_leaves_outside() {
    let mut rng = StdRng::seed_from_u64(3);
    let container = Rect::new(100.0, 50.0, 300.0, 250.0);
    let mut field = ParticleField::new(DisplayList::default(), container.size(), &quiet_config(), &mut rng);

    field.pointer_moved(Vec2::new(150.0, 100.0), container);
    assert_eq!(field.pointer(), Some(Vec2::new(50.0, 50.0)));

    field.pointer_moved(Vec2::new(10.0, 10.0), container);
    assert_eq!(field.pointer(), None);

    field.pointer_moved(Vec2::new(150.0, 100.0), container);
    field.pointer_left();
    assert_eq!(field.pointer(), None);
}

#[test]
fn pointer_on_top_of_particle_pushes_along_x() {
    let cfg = FieldConfig {
        connections_enabled: false,
        ..quiet_config()
    };
    let mut field = ParticleField::with_particles(
        DisplayList::default(),
        Vec2::new(500.0, 500.0),
        &cfg,
        vec![still(100.0, 100.0)],
    );
    field.start();
    field.pointer_moved(Vec2::new(100.0, 100.0), Rect::new(0.0, 0.0, 500.0, 500.0));
    field.update();
    let v = field.particles()[0].velocity;
    assert!((v.x - 0.5).abs() < 1e-5 && v.y == 0.0, "velocity {v:?}");
}

#[test]
fn teardown_stops_drawing_and_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut field = ParticleField::new(DisplayList::default(), Vec2::new(300.0, 300.0), &FieldConfig::default(), &mut rng);
    field.update().expect("first frame");
    let drawn_frames = field.frame();

    assert!(field.teardown());
    assert!(!field.teardown());
    assert!(!field.is_frame_pending());
    assert!(field.is_torn_down());
    assert!(field.update().is_none());
    assert_eq!(field.frame(), drawn_frames);

    // A torn down field cannot be restarted.
    field.start();
    assert!(!field.is_running());
    assert!(field.update().is_none());
}

#[test]
fn stopped_surface_keeps_revision_after_teardown() {
    let mut surface = DisplayList::default();
    surface.resize(Vec2::new(10.0, 10.0));
    let before = surface.revision();
    let mut rng = StdRng::seed_from_u64(5);
    let mut field = ParticleField::new(surface, Vec2::new(100.0, 100.0), &quiet_config(), &mut rng);
    field.update();
    let after_frame = field.surface().map(|s| s.revision()).unwrap_or_default();
    assert!(after_frame > before);
    field.teardown();
    for _ in 0..5 {
        assert!(field.update().is_none());
    }
    assert!(field.surface().is_none());
}

#[test]
fn zero_sized_surface_keeps_everything_at_origin() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut field = ParticleField::new(DisplayList::default(), Vec2::ZERO, &quiet_config(), &mut rng);
    for _ in 0..10 {
        field.update();
    }
    assert!(field.particles().iter().all(|p| p.position == Vec2::ZERO));
}

#[test]
fn live_config_changes_style_but_not_particles() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut field = ParticleField::new(DisplayList::default(), Vec2::new(400.0, 400.0), &FieldConfig::default(), &mut rng);
    let before: Vec<f32> = field.particles().iter().map(|p| p.radius).collect();
    field.apply_live_config(&FieldConfig {
        particle_count: 5,
        connection_color: "#ff0000".into(),
        ..FieldConfig::default()
    });
    assert_eq!(field.particles().len(), 50);
    assert_eq!(field.particles().iter().map(|p| p.radius).collect::<Vec<_>>(), before);
    assert_eq!(field.style().connection, Color::srgb(1.0, 0.0, 0.0));
}
