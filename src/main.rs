use bevy::prelude::*;
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use particle_field::interaction::session::ConfigReloadSettings;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use particle_field::core::config::{ConfigLoadReport, ConfigOverrides};
use particle_field::{FieldAppConfig, FieldOverrides, HostArea, ParticleFieldPlugin, ParticlesHost};

/// Ambient particle background demo.
#[derive(Parser, Debug)]
#[command(name = "particle_field", version)]
struct Args {
    /// RON config layers, merged in order (later files win).
    #[arg(long = "config", value_name = "PATH")]
    configs: Vec<String>,
    /// Behave as if the platform asked for reduced motion (no field is built).
    #[arg(long)]
    reduced_motion: bool,
    /// Override `field.particle_count`.
    #[arg(long, value_name = "N")]
    particles: Option<usize>,
    /// Exit after this many seconds (0 disables).
    #[arg(long, value_name = "SECS")]
    auto_close: Option<f32>,
    /// Also spawn a smaller side panel host with its own field.
    #[arg(long)]
    panel: bool,
}

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_LAYERS: [&str; 2] = ["assets/config/field.ron", "assets/config/field.local.ron"];

/// Config layers in merge order, as given on the command line or the defaults.
#[cfg(not(target_arch = "wasm32"))]
fn config_layers(args: &Args) -> Vec<String> {
    if args.configs.is_empty() {
        DEFAULT_LAYERS.iter().map(|s| s.to_string()).collect()
    } else {
        args.configs.clone()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(args: &Args) -> (FieldAppConfig, ConfigLoadReport) {
    let layers = config_layers(args);
    let (cfg, used, mut errors) = FieldAppConfig::load_layered(&layers);
    if args.configs.is_empty() {
        // The local overlay is optional.
        errors.retain(|e| !e.starts_with(DEFAULT_LAYERS[1]));
    }
    (cfg, ConfigLoadReport { used, errors })
}

#[cfg(target_arch = "wasm32")]
fn load_config(_args: &Args) -> (FieldAppConfig, ConfigLoadReport) {
    match FieldAppConfig::from_ron_str(include_str!("../assets/config/field.ron")) {
        Ok(cfg) => (cfg, ConfigLoadReport::default()),
        Err(e) => (
            FieldAppConfig::default(),
            ConfigLoadReport {
                used: Vec::new(),
                errors: vec![format!("embedded config: {e}")],
            },
        ),
    }
}

fn spawn_hosts(mut commands: Commands, panel: Res<PanelHost>) {
    commands.spawn((Name::new("particles-hero"), ParticlesHost::window()));
    if panel.0 {
        commands.spawn((
            Name::new("particles-panel"),
            ParticlesHost::region(HostArea::Fraction(Rect::new(0.65, 0.1, 0.95, 0.5))),
            FieldOverrides {
                particle_count: Some(15),
                palette: Some(vec!["#ff00ff".into()]),
                ..Default::default()
            },
        ));
    }
}

#[derive(Resource)]
struct PanelHost(bool);

fn main() -> anyhow::Result<()> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    #[cfg(not(target_arch = "wasm32"))]
    let args = Args::parse();
    #[cfg(target_arch = "wasm32")]
    let args = Args::try_parse_from(["particle_field"])?;

    let (mut cfg, report) = load_config(&args);
    let overrides = ConfigOverrides {
        reduced_motion: args.reduced_motion.then_some(true),
        particle_count: args.particles,
        auto_close: args.auto_close,
    };
    overrides.apply(&mut cfg);

    let mut app = App::new();
    app.insert_resource(cfg.clone())
        .insert_resource(report)
        .insert_resource(overrides)
        .insert_resource(PanelHost(args.panel));
    // Hot reload watches the same layers the app started from.
    #[cfg(not(target_arch = "wasm32"))]
    app.insert_resource(ConfigReloadSettings {
        paths: config_layers(&args).into_iter().map(PathBuf::from).collect(),
        ..default()
    });

    let exit = app
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ParticleFieldPlugin::default())
        .add_systems(Startup, spawn_hosts)
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("app exited with code {code}"),
    }
}
