use bevy::prelude::*;

/// Page background behind the particles.
pub const BACKDROP: Color = Color::srgb(0.02, 0.02, 0.06);

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKDROP))
            .add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    // Bevy 0.16+: spawn Camera2d component directly; Required Components supply defaults.
    commands.spawn(Camera2d);
}
