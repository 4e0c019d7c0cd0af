use bevy::math::curve::{Curve, easing::EaseFunction};
use bevy::prelude::*;

/// `power2.inOut`: quadratic acceleration then deceleration.
pub const DEFAULT_EASE: EaseFunction = EaseFunction::QuadraticInOut;

/// Fire-and-forget translation tween.
///
/// The start point is read from the entity's `Transform` on the first step,
/// so a tween can be attached without knowing where the entity currently is.
/// Inserting a new `PositionTween` replaces the old one, which retargets the
/// motion from wherever the entity happens to be instead of stacking.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PositionTween {
	target: Vec3,
	start: Option<Vec3>,
	elapsed: f32,
	duration: f32,
	ease: EaseFunction,
}

impl PositionTween {
	pub fn to(target: Vec3, duration: f32) -> Self {
		Self::with_ease(target, duration, DEFAULT_EASE)
	}

	pub fn with_ease(target: Vec3, duration: f32, ease: EaseFunction) -> Self {
		Self { target, start: None, elapsed: 0.0, duration, ease }
	}

	pub fn target(&self) -> Vec3 {
		self.target
	}

	pub fn progress(&self) -> f32 {
		if self.duration <= 0.0 {
			return if self.start.is_some() { 1.0 } else { 0.0 };
		}
		(self.elapsed / self.duration).clamp(0.0, 1.0)
	}

	pub fn is_finished(&self) -> bool {
		self.start.is_some() && self.progress() >= 1.0
	}

	/// Advances by `dt` seconds from `current` and returns the new position.
	pub fn step(&mut self, current: Vec3, dt: f32) -> Vec3 {
		let start = *self.start.get_or_insert(current);
		self.elapsed += dt.max(0.0);
		let eased = self.ease.sample_clamped(self.progress());
		start.lerp(self.target, eased)
	}
}

pub fn advance_position_tweens(time: Res<Time>, mut q: Query<(&mut Transform, &mut PositionTween)>) {
	let dt = time.delta_secs();
	for (mut transform, mut tween) in &mut q {
		if tween.is_finished() {
			continue;
		}
		transform.translation = tween.step(transform.translation, dt);
	}
}

pub struct TweenPlugin;

impl Plugin for TweenPlugin {
	fn build(&self, app: &mut App) {
		app.add_systems(Update, advance_position_tweens);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn reaches_target_after_duration() {
		let mut t = PositionTween::to(Vec3::new(4.0, 2.0, 0.0), 1.0);
		let mut p = Vec3::ZERO;
		for _ in 0..10 {
			p = t.step(p, 0.1);
		}
		assert!(t.is_finished());
		assert!(p.abs_diff_eq(Vec3::new(4.0, 2.0, 0.0), 1e-5));
	}

	#[test]
	fn eases_in_and_out() {
		let mut t = PositionTween::to(Vec3::X * 10.0, 1.0);
		let quarter = t.step(Vec3::ZERO, 0.25);
		// Quadratic in-out sits at 2 * 0.25^2 = 0.125 a quarter of the way in.
		assert_relative_eq!(quarter.x, 1.25, epsilon = 1e-4);
		let half = t.step(quarter, 0.25);
		assert_relative_eq!(half.x, 5.0, epsilon = 1e-4);
		assert!(!t.is_finished());
	}

	#[test]
	fn start_is_captured_once() {
		let mut t = PositionTween::to(Vec3::X, 1.0);
		let first = t.step(Vec3::ZERO, 0.5);
		// Feeding a different "current" must not move the start point.
		let second = t.step(Vec3::splat(100.0), 0.0);
		assert_eq!(first, second);
	}

	#[test]
	fn zero_duration_snaps() {
		let mut t = PositionTween::to(Vec3::Y, 0.0);
		assert_eq!(t.progress(), 0.0);
		assert_eq!(t.step(Vec3::ZERO, 0.0), Vec3::Y);
		assert!(t.is_finished());
	}
}
