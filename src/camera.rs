use std::f32::consts::FRAC_PI_2;

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;

use crate::hud::pointer_free;

const ROTATE_SPEED: f32 = 0.005; // radians per pixel of drag
const ZOOM_STEP: f32 = 0.95;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
const MIN_RADIUS: f32 = 1.0;
const MAX_RADIUS: f32 = 500.0;
const SETTLED: f32 = 1e-5;

/// Orbit controls around a focus point with damped motion.
///
/// Input accumulates into pending deltas. Each frame applies `damping` of what
/// is pending and keeps the rest, so the camera glides to a stop after the
/// user lets go.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
	pub focus: Vec3,
	pub yaw: f32,
	pub pitch: f32,
	pub radius: f32,
	pub damping: f32,
	pending_yaw: f32,
	pending_pitch: f32,
	pending_zoom: f32,
}

impl OrbitCamera {
	pub fn new(eye: Vec3, focus: Vec3, damping: f32) -> Self {
		let offset = eye - focus;
		let radius = offset.length().clamp(MIN_RADIUS, MAX_RADIUS);
		Self {
			focus,
			yaw: offset.x.atan2(offset.z),
			pitch: (offset.y / offset.length().max(f32::EPSILON)).clamp(-1.0, 1.0).asin(),
			radius,
			damping: damping.clamp(f32::EPSILON, 1.0),
			pending_yaw: 0.0,
			pending_pitch: 0.0,
			pending_zoom: 0.0,
		}
	}

	pub fn eye(&self) -> Vec3 {
		let (sy, cy) = self.yaw.sin_cos();
		let (sp, cp) = self.pitch.sin_cos();
		self.focus + Vec3::new(cp * sy, sp, cp * cy) * self.radius
	}

	/// Queues a drag of `delta` pixels.
	pub fn rotate(&mut self, delta: Vec2) {
		self.pending_yaw -= delta.x * ROTATE_SPEED;
		self.pending_pitch += delta.y * ROTATE_SPEED;
	}

	/// Queues a zoom; positive `lines` moves closer.
	pub fn zoom(&mut self, lines: f32) {
		self.pending_zoom += lines;
	}

	pub fn is_settled(&self) -> bool {
		self.pending_yaw.abs() < SETTLED && self.pending_pitch.abs() < SETTLED && self.pending_zoom.abs() < SETTLED
	}

	pub fn step(&mut self) {
		let d = self.damping;
		self.yaw += self.pending_yaw * d;
		self.pitch = (self.pitch + self.pending_pitch * d).clamp(-PITCH_LIMIT, PITCH_LIMIT);
		self.radius = (self.radius * ZOOM_STEP.powf(self.pending_zoom * d)).clamp(MIN_RADIUS, MAX_RADIUS);
		self.pending_yaw *= 1.0 - d;
		self.pending_pitch *= 1.0 - d;
		self.pending_zoom *= 1.0 - d;
		if self.is_settled() {
			self.pending_yaw = 0.0;
			self.pending_pitch = 0.0;
			self.pending_zoom = 0.0;
		}
	}

	pub fn transform(&self) -> Transform {
		Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
	}
}

pub fn orbit_camera_input(
	buttons: Res<ButtonInput<MouseButton>>,
	motion: Res<AccumulatedMouseMotion>,
	scroll: Res<AccumulatedMouseScroll>,
	mut q: Query<&mut OrbitCamera>,
) {
	for mut orbit in &mut q {
		if buttons.pressed(MouseButton::Left) && motion.delta != Vec2::ZERO {
			orbit.rotate(motion.delta);
		}
		if scroll.delta.y != 0.0 {
			orbit.zoom(scroll.delta.y);
		}
	}
}

pub fn apply_orbit_camera(mut q: Query<(&mut OrbitCamera, &mut Transform)>) {
	for (mut orbit, mut transform) in &mut q {
		if orbit.is_settled() {
			continue;
		}
		orbit.step();
		*transform = orbit.transform();
	}
}

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
	fn build(&self, app: &mut App) {
		app.add_systems(Update, (orbit_camera_input.run_if(pointer_free), apply_orbit_camera).chain());
	}
}
