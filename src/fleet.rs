use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::drones::{DroneAssets, DroneModel, build_drone, spawn_drone};
use crate::formation::{Formation, FormationError, compute_position};
use crate::tween::PositionTween;

/// Request to switch formation by name. Names are checked when handled.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct SetFormation(pub String);

impl SetFormation {
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}
}

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum FormationOutcome {
	Applied(Formation),
	Rejected(FormationError),
}

/// Drones in creation order plus the formation they are flying.
#[derive(Resource, Debug, Default)]
pub struct Fleet {
	drones: Vec<Entity>,
	formation: Formation,
}

impl Fleet {
	pub fn new(formation: Formation) -> Self {
		Self { drones: Vec::new(), formation }
	}

	pub fn drones(&self) -> &[Entity] {
		&self.drones
	}

	pub fn formation(&self) -> Formation {
		self.formation
	}

	pub fn len(&self) -> usize {
		self.drones.len()
	}

	pub fn is_empty(&self) -> bool {
		self.drones.is_empty()
	}

	pub fn targets(&self) -> Vec<Vec3> {
		let total = self.drones.len();
		(0..total).map(|i| compute_position(self.formation, i, total)).collect()
	}
}

pub fn create_drones(
	commands: &mut Commands,
	model: &DroneModel,
	assets: &DroneAssets,
	fleet: &mut Fleet,
	count: usize,
	tween_secs: f32,
) {
	for _ in 0..count {
		let index = fleet.drones.len();
		let drone = spawn_drone(commands, model, assets, index);
		fleet.drones.push(drone);
	}
	info!("Created {} drones ({} total)", count, fleet.drones.len());
	update_formation(commands, fleet, tween_secs);
}

// Every drone gets its own tween; a new one replaces any in flight.
pub fn update_formation(commands: &mut Commands, fleet: &Fleet, tween_secs: f32) {
	for (drone, target) in fleet.drones.iter().zip(fleet.targets()) {
		commands.entity(*drone).insert(PositionTween::to(target, tween_secs));
	}
}

pub fn setup_fleet(
	mut commands: Commands,
	config: Res<SimulationConfig>,
	mut fleet: ResMut<Fleet>,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
) {
	let model = build_drone();
	let assets = DroneAssets::new(&model, &mut meshes, &mut materials);
	fleet.formation = config.initial_formation;
	create_drones(
		&mut commands,
		&model,
		&assets,
		&mut fleet,
		config.drone_count,
		config.tween_duration_secs,
	);
	commands.insert_resource(assets);
}

pub fn apply_formation_requests(
	mut commands: Commands,
	mut requests: MessageReader<SetFormation>,
	mut outcomes: MessageWriter<FormationOutcome>,
	mut fleet: ResMut<Fleet>,
	config: Res<SimulationConfig>,
) {
	for SetFormation(name) in requests.read() {
		match name.parse::<Formation>() {
			Ok(formation) => {
				fleet.formation = formation;
				update_formation(&mut commands, &fleet, config.tween_duration_secs);
				info!("Formation set to {}", formation);
				outcomes.write(FormationOutcome::Applied(formation));
			}
			Err(e) => {
				// Drones keep flying the current formation.
				warn!("{}", e);
				outcomes.write(FormationOutcome::Rejected(e));
			}
		}
	}
}

pub fn formation_hotkeys(keys: Res<ButtonInput<KeyCode>>, mut requests: MessageWriter<SetFormation>) {
	let bindings = [
		(KeyCode::Digit1, Formation::Grid),
		(KeyCode::Digit2, Formation::Wave),
		(KeyCode::Digit3, Formation::Spiral),
	];
	for (key, formation) in bindings {
		if keys.just_pressed(key) {
			requests.write(SetFormation::new(formation.name()));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn targets_follow_creation_order() {
		let mut world = World::new();
		let mut fleet = Fleet::new(Formation::Spiral);
		fleet.drones = (0..4).map(|_| world.spawn_empty().id()).collect();
		let targets = fleet.targets();
		assert_eq!(targets.len(), 4);
		for (i, t) in targets.iter().enumerate() {
			assert_eq!(*t, compute_position(Formation::Spiral, i, 4));
		}
	}

	#[test]
	fn empty_fleet_has_no_targets() {
		let fleet = Fleet::default();
		assert!(fleet.is_empty());
		assert!(fleet.targets().is_empty());
		assert_eq!(fleet.formation(), Formation::Grid);
	}
}
