pub mod camera;
pub mod config;
pub mod driver;
pub mod drones;
pub mod fleet;
pub mod formation;
pub mod hud;
pub mod scene;
pub mod tween;

use bevy::prelude::*;
use bevy::window::WindowResized;

// Re-exports for convenience in tests and integration users.
pub use camera::{OrbitCamera, OrbitCameraPlugin};
pub use config::{ConfigError, SimulationConfig, SpinTiming};
pub use driver::{AnimationDriver, DriverState};
pub use drones::{Drone, DroneBody, DroneModel, PartShape, Propeller, build_drone};
pub use fleet::{Fleet, FormationOutcome, SetFormation};
pub use formation::{Formation, FormationError, compute_position, compute_position_by_name};
pub use hud::{UiCapture, format_hud};
pub use scene::{MainCamera, Viewport};
pub use tween::{PositionTween, TweenPlugin};

/// Everything except windowing and rendering: the host app supplies those
/// (`DefaultPlugins` in the viewer, `MinimalPlugins` plus mesh and material
/// asset storage in tests).
#[derive(Default)]
pub struct DroneFormationPlugin {
	pub config: SimulationConfig,
}

impl DroneFormationPlugin {
	pub fn new(config: SimulationConfig) -> Self {
		Self { config }
	}
}

impl Plugin for DroneFormationPlugin {
	fn build(&self, app: &mut App) {
		app.insert_resource(self.config.clone())
			.insert_resource(Viewport::from(&self.config))
			.insert_resource(Fleet::new(self.config.initial_formation))
			.init_resource::<AnimationDriver>()
			.init_resource::<UiCapture>()
			.add_message::<SetFormation>()
			.add_message::<FormationOutcome>()
			.add_message::<WindowResized>()
			.add_plugins((TweenPlugin, OrbitCameraPlugin))
			.add_systems(Startup, (scene::setup_scene, fleet::setup_fleet).chain())
			.add_systems(
				Update,
				(
					fleet::formation_hotkeys.run_if(hud::keyboard_free),
					fleet::apply_formation_requests,
					scene::on_window_resize,
					driver::stop_on_exit,
					driver::spin_propellers.run_if(driver::driver_running),
					driver::sync_camera_activity,
				)
					.chain(),
			);
	}
}
