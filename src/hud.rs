use bevy::prelude::*;

use crate::driver::DriverState;
use crate::formation::Formation;

pub const PANEL_HEADING: &str = "Formations";
pub const FORMATION_INPUT_HINT: &str = "Formation name (grid, wave, spiral)…";
pub const FORMATION_SUBMIT_LABEL: &str = "Apply";
pub const HOTKEY_HINT: &str = "Keys 1/2/3 switch formation · drag to orbit · scroll to zoom";

/// Whether the overlay UI currently owns keyboard or pointer input. The
/// viewer refreshes it from egui each frame; scene controls stand down while
/// a flag is set.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiCapture {
	pub keyboard: bool,
	pub pointer: bool,
}

pub fn keyboard_free(capture: Option<Res<UiCapture>>) -> bool {
	capture.is_none_or(|c| !c.keyboard)
}

pub fn pointer_free(capture: Option<Res<UiCapture>>) -> bool {
	capture.is_none_or(|c| !c.pointer)
}

pub fn formation_button_label(f: Formation) -> &'static str {
	match f {
		Formation::Grid => "Grid",
		Formation::Wave => "Wave",
		Formation::Spiral => "Spiral",
	}
}

pub fn format_hud(formation: Formation, drone_count: usize, driver: DriverState) -> String {
	let state = match driver {
		DriverState::Running => "Running",
		DriverState::Stopped => "Stopped",
	};
	format!("Formation: {} | Drones: {} | {}", formation, drone_count, state)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hud_format() {
		let s = format_hud(Formation::Spiral, 9, DriverState::Running);
		assert!(s.contains("Formation: spiral"));
		assert!(s.contains("Drones: 9"));
		assert!(s.contains("Running"));
	}

	#[test]
	fn every_formation_has_a_button() {
		let labels: Vec<_> = Formation::ALL.into_iter().map(formation_button_label).collect();
		assert_eq!(labels, ["Grid", "Wave", "Spiral"]);
	}

	#[test]
	fn capture_flags_gate_independently() {
		let mut world = World::new();
		assert!(world.run_system_cached(keyboard_free).unwrap());
		assert!(world.run_system_cached(pointer_free).unwrap());

		world.insert_resource(UiCapture { keyboard: true, pointer: false });
		assert!(!world.run_system_cached(keyboard_free).unwrap());
		assert!(world.run_system_cached(pointer_free).unwrap());

		world.insert_resource(UiCapture { keyboard: false, pointer: true });
		assert!(world.run_system_cached(keyboard_free).unwrap());
		assert!(!world.run_system_cached(pointer_free).unwrap());
	}
}
