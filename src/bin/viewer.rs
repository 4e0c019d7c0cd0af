use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use drone_formations::hud::{
	FORMATION_INPUT_HINT, FORMATION_SUBMIT_LABEL, HOTKEY_HINT, PANEL_HEADING, formation_button_label,
};
use drone_formations::*;

const TOAST_SECS: f32 = 2.5;

// ---------- Resources ----------
#[derive(Resource, Default)]
struct UiState {
	formation_input: String,
	toast: Option<(String, f32)>, // (message, remaining_seconds)
}

// ---------- Entry ----------
fn main() -> Result<(), ConfigError> {
	let config = match std::env::args().nth(1) {
		Some(path) => SimulationConfig::load(path)?,
		None => SimulationConfig::default(),
	};

	App::new()
		.add_plugins(
			DefaultPlugins
				.set(WindowPlugin {
					primary_window: Some(Window {
						title: config.window_title.clone(),
						resolution: (config.window_width, config.window_height).into(),
						fit_canvas_to_parent: true,
						..Default::default()
					}),
					..Default::default()
				})
				.set(LogPlugin {
					filter: config.log_filter.clone(),
					..Default::default()
				}),
		)
		.add_plugins(EguiPlugin::default())
		.add_plugins(DroneFormationPlugin::new(config))
		.init_resource::<UiState>()
		.add_systems(Update, (collect_formation_outcomes, update_toast_timer))
		.add_systems(EguiPrimaryContextPass, (draw_ui, record_ui_capture).chain())
		.run();
	Ok(())
}

fn set_toast(ui: &mut UiState, msg: impl Into<String>) {
	ui.toast = Some((msg.into(), TOAST_SECS));
}

// ---------- Systems: Toast ----------
fn collect_formation_outcomes(mut outcomes: MessageReader<FormationOutcome>, mut ui: ResMut<UiState>) {
	for outcome in outcomes.read() {
		match outcome {
			FormationOutcome::Applied(f) => set_toast(&mut ui, format!("Flying {}", f)),
			FormationOutcome::Rejected(e) => set_toast(&mut ui, e.to_string()),
		}
	}
}

fn update_toast_timer(time: Res<Time>, mut ui: ResMut<UiState>) {
	if let Some((_, ref mut remaining)) = ui.toast {
		*remaining -= time.delta_secs();
		if *remaining <= 0.0 {
			ui.toast = None;
		}
	}
}

// ---------- Systems: UI ----------
fn draw_ui(
	mut egui_ctx: EguiContexts,
	mut ui: ResMut<UiState>,
	fleet: Res<Fleet>,
	driver: Res<AnimationDriver>,
	mut requests: MessageWriter<SetFormation>,
) {
	let Ok(ctx) = egui_ctx.ctx_mut() else {
		return;
	};

	egui::TopBottomPanel::top("top_hud").show(&*ctx, |ui_top| {
		ui_top.horizontal(|ui_row| {
			ui_row.label(format_hud(fleet.formation(), fleet.len(), driver.state()));
			if let Some((ref msg, _)) = ui.toast {
				ui_row.separator();
				ui_row.colored_label(egui::Color32::YELLOW, msg);
			}
		});
	});

	egui::SidePanel::left("formation_panel")
		.resizable(false)
		.default_width(200.0)
		.show(&*ctx, |ui_side| {
			ui_side.heading(PANEL_HEADING);
			for f in Formation::ALL {
				let selected = fleet.formation() == f;
				if ui_side.selectable_label(selected, formation_button_label(f)).clicked() {
					requests.write(SetFormation::new(f.name()));
				}
			}
			ui_side.separator();
			let response = ui_side.add(
				egui::TextEdit::singleline(&mut ui.formation_input).hint_text(FORMATION_INPUT_HINT),
			);
			let submit_clicked = ui_side.button(FORMATION_SUBMIT_LABEL).clicked();
			let enter_pressed = response.lost_focus() && response.ctx.input(|i| i.key_pressed(egui::Key::Enter));
			if (submit_clicked || enter_pressed) && !ui.formation_input.trim().is_empty() {
				requests.write(SetFormation::new(ui.formation_input.trim()));
				ui.formation_input.clear();
			}
			ui_side.separator();
			ui_side.small(HOTKEY_HINT);
		});
}

// Read after the panels are laid out; scene controls consult it next frame.
fn record_ui_capture(mut egui_ctx: EguiContexts, mut capture: ResMut<UiCapture>) {
	let Ok(ctx) = egui_ctx.ctx_mut() else {
		return;
	};
	capture.set_if_neq(UiCapture {
		keyboard: ctx.wants_keyboard_input(),
		pointer: ctx.wants_pointer_input() || ctx.is_pointer_over_area(),
	});
}
