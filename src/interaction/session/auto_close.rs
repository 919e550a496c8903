use crate::core::config::FieldAppConfig;
use bevy::prelude::*;

/// Countdown armed from `window.autoClose` (seconds, 0 disables).
#[derive(Resource, Deref, DerefMut)]
pub struct AutoCloseTimer(Timer);

/// Exits the app once the countdown runs out. Used for unattended demo runs;
/// the exit also tears every field down (see `host::lifecycle`).
pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_auto_close)
            .add_systems(Update, tick_auto_close);
    }
}

fn arm_auto_close(mut commands: Commands, cfg: Res<FieldAppConfig>) {
    let secs = cfg.window.auto_close;
    if secs <= 0.0 {
        return;
    }
    info!(seconds = secs, "Particle background will close after {secs}s");
    commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
}

fn tick_auto_close(
    time: Res<Time>,
    timer: Option<ResMut<AutoCloseTimer>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    if timer.tick(time.delta()).just_finished() {
        info!("Auto close elapsed, exiting");
        exit.write(AppExit::Success);
    }
}
