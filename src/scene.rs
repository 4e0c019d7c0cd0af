use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::camera::OrbitCamera;
use crate::config::SimulationConfig;

pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 10.0, 20.0);
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const DIRECTIONAL_INTENSITY: f32 = 0.8;
pub const DIRECTIONAL_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
// Unit intensities mapped onto bevy's physical light units.
const AMBIENT_BRIGHTNESS_SCALE: f32 = 1000.0;
const DIRECTIONAL_LUX_SCALE: f32 = 10_000.0;

pub const GROUND_SIZE: f32 = 50.0;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MainCamera;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Ground;

/// Size of the render surface in logical pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
	pub width: f32,
	pub height: f32,
}

impl Viewport {
	pub fn new(width: f32, height: f32) -> Self {
		Self { width, height }
	}

	pub fn aspect_ratio(&self) -> f32 {
		self.width / self.height
	}
}

impl From<&SimulationConfig> for Viewport {
	fn from(config: &SimulationConfig) -> Self {
		Self::new(config.window_width as f32, config.window_height as f32)
	}
}

pub fn setup_scene(
	mut commands: Commands,
	viewport: Res<Viewport>,
	config: Res<SimulationConfig>,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
) {
	commands.spawn((
		Camera3d::default(),
		Projection::Perspective(PerspectiveProjection {
			fov: CAMERA_FOV_DEGREES.to_radians(),
			aspect_ratio: viewport.aspect_ratio(),
			near: CAMERA_NEAR,
			far: CAMERA_FAR,
			..default()
		}),
		Transform::from_translation(CAMERA_EYE).looking_at(Vec3::ZERO, Vec3::Y),
		OrbitCamera::new(CAMERA_EYE, Vec3::ZERO, config.orbit_damping),
		AmbientLight {
			brightness: AMBIENT_INTENSITY * AMBIENT_BRIGHTNESS_SCALE,
			..default()
		},
		MainCamera,
	));

	commands.spawn((
		DirectionalLight {
			illuminance: DIRECTIONAL_INTENSITY * DIRECTIONAL_LUX_SCALE,
			..default()
		},
		Transform::from_translation(DIRECTIONAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
	));

	// Plane3d already faces +Y, so no extra rotation is needed to lay it flat.
	let ground_mesh = Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE).build();
	commands.spawn((
		Mesh3d(meshes.add(ground_mesh)),
		MeshMaterial3d(materials.add(StandardMaterial {
			base_color: Color::srgb_u8(0x80, 0x80, 0x80),
			double_sided: true,
			cull_mode: None,
			..default()
		})),
		Transform::default(),
		Ground,
	));
	debug!("Scene ready at {}x{}", viewport.width, viewport.height);
}

pub fn on_window_resize(
	mut resized: MessageReader<WindowResized>,
	mut viewport: ResMut<Viewport>,
	mut cameras: Query<&mut Projection, With<MainCamera>>,
) {
	for ev in resized.read() {
		if ev.width <= 0.0 || ev.height <= 0.0 {
			continue;
		}
		*viewport = Viewport::new(ev.width, ev.height);
		for mut projection in &mut cameras {
			if let Projection::Perspective(perspective) = &mut *projection {
				perspective.aspect_ratio = viewport.aspect_ratio();
			}
		}
		debug!("Viewport resized to {}x{}", ev.width, ev.height);
	}
}
