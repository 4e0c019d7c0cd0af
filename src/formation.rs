use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SPACING: f32 = 2.0;
pub const CRUISE_HEIGHT: f32 = 2.0;
pub const WAVE_PHASE_STEP: f32 = 0.5;
pub const WAVE_AMPLITUDE: f32 = 2.0;
pub const SPIRAL_BASE_RADIUS: f32 = 2.0;
pub const SPIRAL_RADIUS_STEP: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormationError {
	#[error("Unknown formation: {0:?} (expected grid, wave or spiral)")]
	Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formation {
	#[default]
	Grid,
	Wave,
	Spiral,
}

impl Formation {
	pub const ALL: [Formation; 3] = [Formation::Grid, Formation::Wave, Formation::Spiral];

	pub fn name(self) -> &'static str {
		match self {
			Formation::Grid => "grid",
			Formation::Wave => "wave",
			Formation::Spiral => "spiral",
		}
	}
}

impl fmt::Display for Formation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Formation {
	type Err = FormationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let name = s.trim();
		Formation::ALL
			.into_iter()
			.find(|f| f.name() == name)
			.ok_or_else(|| FormationError::Unknown(name.to_string()))
	}
}

/// Side length of the square lattice used by [`Formation::Grid`].
pub fn grid_size(total: usize) -> usize {
	((total as f32).sqrt().ceil() as usize).max(1)
}

/// Target position of drone `index` out of `total` for `formation`.
///
/// Depends only on its arguments, so repeated calls agree.
pub fn compute_position(formation: Formation, index: usize, total: usize) -> Vec3 {
	let i = index as f32;
	match formation {
		Formation::Grid => {
			let size = grid_size(total);
			let half = size as f32 / 2.0;
			let col = (index % size) as f32;
			let row = (index / size) as f32;
			Vec3::new((col - half + 0.5) * SPACING, CRUISE_HEIGHT, (row - half + 0.5) * SPACING)
		}
		Formation::Wave => {
			let x = (i - total as f32 / 2.0 + 0.5) * SPACING;
			let y = (i * WAVE_PHASE_STEP).sin() * WAVE_AMPLITUDE + CRUISE_HEIGHT;
			Vec3::new(x, y, 0.0)
		}
		Formation::Spiral => {
			let angle = i * (TAU / total.max(1) as f32);
			let radius = SPIRAL_BASE_RADIUS + i * SPIRAL_RADIUS_STEP;
			Vec3::new(angle.cos() * radius, CRUISE_HEIGHT, angle.sin() * radius)
		}
	}
}

// Unknown names yield no position at all.
pub fn compute_position_by_name(name: &str, index: usize, total: usize) -> Option<Vec3> {
	name.parse::<Formation>().ok().map(|f| compute_position(f, index, total))
}
