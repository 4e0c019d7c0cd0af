use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

pub const BODY_SIZE: Vec3 = Vec3::new(1.0, 0.5, 1.0);
pub const PROPELLER_RADIUS: f32 = 0.2;
pub const PROPELLER_HEIGHT: f32 = 0.1;
pub const PROPELLER_SEGMENTS: u32 = 8;

// Creation order of the rotors; child index = slot + 1.
pub const PROPELLER_OFFSETS: [Vec3; 4] = [
	Vec3::new(-0.5, 0.5, -0.5),
	Vec3::new(0.5, 0.5, -0.5),
	Vec3::new(-0.5, 0.5, 0.5),
	Vec3::new(0.5, 0.5, 0.5),
];

const BODY_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);
const PROPELLER_COLOR: Color = Color::BLACK;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartRole {
	Body,
	Propeller,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum PartShape {
	Box { size: Vec3 },
	Cylinder { radius: f32, height: f32, segments: u32 },
}

impl PartShape {
	pub fn to_mesh(self) -> Mesh {
		match self {
			PartShape::Box { size } => Cuboid::from_size(size).mesh().build(),
			PartShape::Cylinder { radius, height, segments } => {
				Cylinder::new(radius, height).mesh().resolution(segments).build()
			}
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DronePart {
	pub role: PartRole,
	pub shape: PartShape,
	pub offset: Vec3,
	pub rotation: Quat,
	pub color: Color,
}

/// Static geometry of one drone: the body first, then the four rotors.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneModel {
	parts: [DronePart; 5],
}

impl DroneModel {
	pub fn parts(&self) -> &[DronePart; 5] {
		&self.parts
	}

	pub fn body(&self) -> &DronePart {
		&self.parts[0]
	}

	pub fn propellers(&self) -> &[DronePart] {
		&self.parts[1..]
	}
}

impl Default for DroneModel {
	fn default() -> Self {
		build_drone()
	}
}

pub fn build_drone() -> DroneModel {
	let body = DronePart {
		role: PartRole::Body,
		shape: PartShape::Box { size: BODY_SIZE },
		offset: Vec3::ZERO,
		rotation: Quat::IDENTITY,
		color: BODY_COLOR,
	};
	let rotor = |offset: Vec3| DronePart {
		role: PartRole::Propeller,
		shape: PartShape::Cylinder {
			radius: PROPELLER_RADIUS,
			height: PROPELLER_HEIGHT,
			segments: PROPELLER_SEGMENTS,
		},
		offset,
		rotation: Quat::from_rotation_x(FRAC_PI_2),
		color: PROPELLER_COLOR,
	};
	DroneModel {
		parts: [
			body,
			rotor(PROPELLER_OFFSETS[0]),
			rotor(PROPELLER_OFFSETS[1]),
			rotor(PROPELLER_OFFSETS[2]),
			rotor(PROPELLER_OFFSETS[3]),
		],
	}
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drone {
	/// Formation slot; equals creation order.
	pub index: usize,
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DroneBody;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Propeller {
	pub slot: usize,
	pub spin: f32,
}

impl Propeller {
	pub fn new(slot: usize) -> Self {
		Self { slot, spin: 0.0 }
	}

	// Lie flat about X, then spin about the rotor's own Z.
	pub fn rotation(&self) -> Quat {
		Quat::from_rotation_x(FRAC_PI_2) * Quat::from_rotation_z(self.spin)
	}

	pub fn advance(&mut self, radians: f32) {
		self.spin = (self.spin + radians).rem_euclid(std::f32::consts::TAU);
	}
}

/// Mesh and material handles shared by every drone, one pair per part.
#[derive(Resource, Debug, Clone)]
pub struct DroneAssets {
	parts: Vec<(Handle<Mesh>, Handle<StandardMaterial>)>,
}

impl DroneAssets {
	pub fn new(
		model: &DroneModel,
		meshes: &mut Assets<Mesh>,
		materials: &mut Assets<StandardMaterial>,
	) -> Self {
		let body_mesh = meshes.add(model.body().shape.to_mesh());
		let body_material = materials.add(StandardMaterial::from(model.body().color));
		// The rotors share one mesh and one material.
		let rotor = &model.propellers()[0];
		let rotor_mesh = meshes.add(rotor.shape.to_mesh());
		let rotor_material = materials.add(StandardMaterial::from(rotor.color));
		let mut parts = vec![(body_mesh, body_material)];
		parts.extend(model.propellers().iter().map(|_| (rotor_mesh.clone(), rotor_material.clone())));
		Self { parts }
	}
}

pub fn spawn_drone(commands: &mut Commands, model: &DroneModel, assets: &DroneAssets, index: usize) -> Entity {
	commands
		.spawn((Drone { index }, Transform::default(), Visibility::default()))
		.with_children(|parent| {
			let mut slot = 0;
			for (part, (mesh, material)) in model.parts().iter().zip(&assets.parts) {
				let transform = Transform::from_translation(part.offset).with_rotation(part.rotation);
				let mut child = parent.spawn((
					Mesh3d(mesh.clone()),
					MeshMaterial3d(material.clone()),
					transform,
					part.shape,
				));
				match part.role {
					PartRole::Body => {
						child.insert(DroneBody);
					}
					PartRole::Propeller => {
						child.insert(Propeller::new(slot));
						slot += 1;
					}
				}
			}
		})
		.id()
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn model_has_body_then_four_rotors() {
		let model = build_drone();
		assert_eq!(model.parts().len(), 5);
		assert_eq!(model.body().role, PartRole::Body);
		assert_eq!(model.body().shape, PartShape::Box { size: Vec3::new(1.0, 0.5, 1.0) });
		for (part, offset) in model.propellers().iter().zip(PROPELLER_OFFSETS) {
			assert_eq!(part.role, PartRole::Propeller);
			assert_eq!(part.offset, offset);
			assert!(matches!(part.shape, PartShape::Cylinder { radius, height, segments: 8 }
				if radius == 0.2 && height == 0.1));
		}
	}

	#[test]
	fn rotors_lie_flat() {
		let model = build_drone();
		for part in model.propellers() {
			assert!(part.rotation.abs_diff_eq(Quat::from_rotation_x(FRAC_PI_2), 1e-6));
		}
	}

	#[test]
	fn spin_keeps_rotor_axis_horizontal() {
		let mut p = Propeller::new(0);
		p.advance(0.1);
		p.advance(0.1);
		assert_relative_eq!(p.spin, 0.2, epsilon = 1e-6);
		let axis = p.rotation() * Vec3::Y;
		assert_relative_eq!(axis.y, 0.0, epsilon = 1e-6);
		assert_relative_eq!(axis.z, 0.2f32.cos(), epsilon = 1e-6);
	}

	#[test]
	fn spawned_drone_children_follow_model_order() {
		let mut world = World::new();
		let mut meshes = Assets::<Mesh>::default();
		let mut materials = Assets::<StandardMaterial>::default();
		let model = build_drone();
		let assets = DroneAssets::new(&model, &mut meshes, &mut materials);

		let mut queue = bevy::ecs::world::CommandQueue::default();
		let drone = {
			let mut commands = Commands::new(&mut queue, &world);
			spawn_drone(&mut commands, &model, &assets, 3)
		};
		queue.apply(&mut world);

		assert_eq!(world.get::<Drone>(drone), Some(&Drone { index: 3 }));
		let children: Vec<Entity> = world.get::<Children>(drone).expect("drone has children").to_vec();
		assert_eq!(children.len(), 5);
		assert!(world.get::<DroneBody>(children[0]).is_some());
		assert!(matches!(world.get::<PartShape>(children[0]), Some(PartShape::Box { .. })));
		for (slot, child) in children[1..].iter().enumerate() {
			let prop = world.get::<Propeller>(*child).expect("rotor child");
			assert_eq!(prop.slot, slot);
			assert!(matches!(world.get::<PartShape>(*child), Some(PartShape::Cylinder { .. })));
			let t = world.get::<Transform>(*child).expect("rotor transform");
			assert_eq!(t.translation, PROPELLER_OFFSETS[slot]);
		}
	}
}
