use bevy::prelude::*;

use crate::config::{SimulationConfig, SpinTiming};
use crate::drones::Propeller;
use crate::scene::MainCamera;

// Frame rate at which `SpinTiming::PerSecond` matches `PerFrame`.
const REFERENCE_FPS: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
	#[default]
	Running,
	Stopped,
}

/// Per-frame loop state. Runs from startup until stopped; stopping is final.
#[derive(Resource, Debug, Default)]
pub struct AnimationDriver {
	state: DriverState,
	frames: u64,
}

impl AnimationDriver {
	pub fn state(&self) -> DriverState {
		self.state
	}

	pub fn is_running(&self) -> bool {
		self.state == DriverState::Running
	}

	pub fn frames(&self) -> u64 {
		self.frames
	}

	pub fn stop(&mut self) {
		if self.state == DriverState::Running {
			info!("Animation driver stopped after {} frames", self.frames);
		}
		self.state = DriverState::Stopped;
	}
}

pub fn driver_running(driver: Res<AnimationDriver>) -> bool {
	driver.is_running()
}

pub fn spin_increment(config: &SimulationConfig, delta_secs: f32) -> f32 {
	match config.spin_timing {
		SpinTiming::PerFrame => config.spin_per_frame,
		SpinTiming::PerSecond => config.spin_per_frame * delta_secs * REFERENCE_FPS,
	}
}

pub fn spin_propellers(
	time: Res<Time>,
	config: Res<SimulationConfig>,
	mut driver: ResMut<AnimationDriver>,
	mut q: Query<(&mut Propeller, &mut Transform)>,
) {
	let step = spin_increment(&config, time.delta_secs());
	for (mut propeller, mut transform) in &mut q {
		propeller.advance(step);
		transform.rotation = propeller.rotation();
	}
	driver.frames += 1;
}

pub fn stop_on_exit(mut exits: MessageReader<AppExit>, mut driver: ResMut<AnimationDriver>) {
	if exits.read().next().is_some() {
		driver.stop();
	}
}

// A stopped driver renders nothing further.
pub fn sync_camera_activity(driver: Res<AnimationDriver>, mut cameras: Query<&mut Camera, With<MainCamera>>) {
	if !driver.is_changed() {
		return;
	}
	let running = driver.is_running();
	for mut camera in &mut cameras {
		// `frames` changes every frame; only touch the camera on a state flip.
		if camera.is_active != running {
			camera.is_active = running;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stop_is_terminal() {
		let mut d = AnimationDriver::default();
		assert!(d.is_running());
		d.stop();
		d.stop();
		assert_eq!(d.state(), DriverState::Stopped);
	}

	#[test]
	fn per_frame_ignores_frame_time() {
		let config = SimulationConfig::default();
		assert_eq!(spin_increment(&config, 0.5), 0.1);
		assert_eq!(spin_increment(&config, 0.0), 0.1);
	}

	#[test]
	fn per_second_scales_with_frame_time() {
		let config = SimulationConfig { spin_timing: SpinTiming::PerSecond, ..Default::default() };
		assert!((spin_increment(&config, 1.0 / 60.0) - 0.1).abs() < 1e-6);
		assert!((spin_increment(&config, 1.0 / 30.0) - 0.2).abs() < 1e-6);
	}
}
