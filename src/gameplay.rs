use std::time::Duration;

use clipboard_rs::{Clipboard, ClipboardContext};
use macroquad::prelude::{BLUE, GRAY, GREEN, ORANGE, RED, WHITE, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use water_fill::config::FillerConfig;
use water_fill::errors::ConfigError;
use water_fill::model::{FillState, FluidContainer, FluidPacket};
use water_fill::palette::{self, WATER_COLORS};
use water_fill::playback::{FillPlayer, PlaybackStatus};
use water_fill::wizard::{SetupStep, SetupWizard};

use crate::controls::{Button, ControlAction, HitItem};
use crate::renderer::Renderer;

const MAX_COLUMNS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Generation {
    Idle,
    /// Waiting for the "generating" screen to be drawn once.
    Requested,
    Drawn,
}

/// Empty versions of the tubes that will be filled.
fn structure_preview(wizard: &SetupWizard) -> FillState<String> {
    FillState::new(wizard.fillable_tubes(), wizard.capacity())
}

pub struct FillApp {
    config: FillerConfig,
    wizard: SetupWizard,
    player: Option<FillPlayer<String>>,
    generation: Generation,
    rng: StdRng,
    renderer: Renderer,
}

impl FillApp {
    pub fn new(config: FillerConfig) -> Result<Self, ConfigError> {
        let wizard = SetupWizard::new(&config)?;
        let rng = match config.seed {
            Some(seed) => {
                info!("Using fixed fill seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            wizard,
            config,
            player: None,
            generation: Generation::Idle,
            rng,
            renderer: Renderer::new(),
        })
    }

    pub fn is_playback(&self) -> bool {
        self.player.is_some() && self.generation == Generation::Idle
    }

    pub fn handle_click(&mut self, x: f32, y: f32) {
        let Some(hit) = self.renderer.get_hit_test_registry().hit_test(x, y) else {
            return;
        };
        let action = match hit.item {
            HitItem::Button { function } => function,
            HitItem::Swatch { index } => ControlAction::ToggleColor(index),
        };
        self.handle_action(action);
    }

    pub fn handle_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::IncreaseTotal => self.wizard.change_total(1),
            ControlAction::DecreaseTotal => self.wizard.change_total(-1),
            ControlAction::IncreaseEmpty => self.wizard.change_empty(1),
            ControlAction::DecreaseEmpty => self.wizard.change_empty(-1),
            ControlAction::ContinueToColors => self.wizard.continue_to_colors(),
            ControlAction::BackToStructure => self.wizard.back_to_structure(),
            ControlAction::ToggleColor(index) => {
                if let Some(swatch) = WATER_COLORS.get(index)
                    && let Err(err) = self.wizard.toggle_color(swatch.name)
                {
                    warn!("{}", err);
                }
            }
            ControlAction::ResetColors => self.wizard.reset_colors(),
            ControlAction::GenerateFill => {
                if self.wizard.is_color_selection_complete() {
                    self.player = None;
                    self.generation = Generation::Requested;
                }
            }
            ControlAction::BackToSetup => {
                self.player = None;
                self.generation = Generation::Idle;
                self.wizard.back_to_setup();
            }
            ControlAction::CopyState => self.copy_state(),
            ControlAction::GoToStart
            | ControlAction::StepBackward
            | ControlAction::TogglePlay
            | ControlAction::StepForward
            | ControlAction::GoToEnd => {
                if let Some(player) = self.player.as_mut() {
                    match action {
                        ControlAction::GoToStart => player.go_to_start(),
                        ControlAction::StepBackward => player.step_backward(),
                        ControlAction::TogglePlay => player.toggle_play(),
                        ControlAction::StepForward => player.step_forward(),
                        ControlAction::GoToEnd => player.go_to_end(),
                        _ => {}
                    }
                }
            }
        }
    }

    /// Per-frame work: deferred fill generation and autoplay.
    pub fn update(&mut self, dt: f32) {
        if self.generation == Generation::Drawn {
            self.generation = Generation::Idle;
            match self.wizard.generate_fill(&mut self.rng) {
                Ok(result) => {
                    self.player = Some(FillPlayer::new(result, self.config.autoplay_interval()));
                }
                Err(err) => warn!("{}", err),
            }
        }
        if let Some(player) = self.player.as_mut() {
            player.update(Duration::from_secs_f32(dt.max(0.0)));
        }
    }

    pub fn render(&mut self) {
        let layout = self.renderer.begin_frame();
        if self.generation != Generation::Idle {
            self.renderer.render_text("Generating fill...", layout.status, WHITE);
            if self.generation == Generation::Requested {
                self.generation = Generation::Drawn;
            }
            return;
        }
        match self.wizard.step() {
            SetupStep::Structure => self.render_structure(&layout),
            SetupStep::Colors => self.render_colors(&layout),
            SetupStep::Filling => self.render_playback(&layout),
        }
    }

    fn render_structure(&mut self, layout: &crate::renderer::Layout) {
        let w = &self.wizard;
        let buttons = [
            Button::new("Tubes -", ControlAction::DecreaseTotal, RED).enabled(w.total_tubes() > 2),
            Button::new("Tubes +", ControlAction::IncreaseTotal, GREEN)
                .enabled(w.total_tubes() < palette::len()),
            Button::new("Empty -", ControlAction::DecreaseEmpty, RED).enabled(w.empty_tubes() > 0),
            Button::new("Empty +", ControlAction::IncreaseEmpty, GREEN)
                .enabled(w.empty_tubes() + 1 < w.total_tubes()),
            Button::new("Next", ControlAction::ContinueToColors, BLUE),
        ];
        let status = format!(
            "{} tubes, {} empty, {} to fill",
            w.total_tubes(),
            w.empty_tubes(),
            w.fillable_tubes()
        );
        let preview = structure_preview(w);
        self.renderer.render_button_lineup(&buttons, layout.buttons);
        self.renderer.render_text(&status, layout.status, WHITE);
        let containers: Vec<_> = preview.fluid_containers.iter().collect();
        self.renderer
            .render_container_grid(&containers, None, MAX_COLUMNS, layout.content);
    }

    fn render_colors(&mut self, layout: &crate::renderer::Layout) {
        let w = &self.wizard;
        let buttons = [
            Button::new("Back", ControlAction::BackToStructure, GRAY),
            Button::new("Clear", ControlAction::ResetColors, ORANGE),
            Button::new("Generate", ControlAction::GenerateFill, BLUE)
                .enabled(w.is_color_selection_complete()),
        ];
        let status = format!(
            "Colours selected: {}/{}",
            w.selected_colors().len(),
            w.fillable_tubes()
        );
        let preview: Vec<FluidContainer<String>> = (0..w.fillable_tubes())
            .map(|i| {
                let mut tube = FluidContainer::new(w.capacity());
                if let Some(name) = w.selected_colors().get(i) {
                    while tube.add_fluid(FluidPacket::new(name.clone())) {}
                }
                tube
            })
            .collect();
        let selected: Vec<bool> = WATER_COLORS.iter().map(|c| w.is_selected(c.name)).collect();

        self.renderer.render_button_lineup(&buttons, layout.buttons);
        self.renderer.render_text(&status, layout.status, WHITE);
        let containers: Vec<_> = preview.iter().collect();
        self.renderer
            .render_container_grid(&containers, None, MAX_COLUMNS, layout.content);
        self.renderer
            .render_color_swatches(&WATER_COLORS, &selected, layout.footer);
    }

    fn render_playback(&mut self, layout: &crate::renderer::Layout) {
        let Some(player) = self.player.as_ref() else {
            return;
        };
        let buttons = [
            Button::new("Setup", ControlAction::BackToSetup, GRAY),
            Button::new("<<", ControlAction::GoToStart, BLUE).enabled(!player.is_first_step()),
            Button::new("<", ControlAction::StepBackward, BLUE).enabled(!player.is_first_step()),
            Button::new(
                if player.is_playing() { "Pause" } else { "Play" },
                ControlAction::TogglePlay,
                GREEN,
            )
            .enabled(player.can_play()),
            Button::new(">", ControlAction::StepForward, BLUE).enabled(!player.is_final_step()),
            Button::new(">>", ControlAction::GoToEnd, BLUE).enabled(!player.is_final_step()),
            Button::new("Copy", ControlAction::CopyState, ORANGE),
        ];
        let status = match player.status() {
            PlaybackStatus::Initial => "Initial state - step forward to watch the fill".to_string(),
            PlaybackStatus::Complete => format!(
                "All tubes full, one colour each ({} iterations)",
                player.result().events.len()
            ),
            PlaybackStatus::Deposit {
                iteration,
                color,
                tube_number,
            } => format!("Iteration {}: {} -> tube {}", iteration, color, tube_number),
        };
        let target = if player.is_first_step() {
            None
        } else {
            player.current_event().map(|e| e.tube_index)
        };
        let containers: Vec<_> = player
            .current_state()
            .map(|s| s.fluid_containers.iter().collect())
            .unwrap_or_default();
        let progress = player.progress();

        self.renderer.render_button_lineup(&buttons, layout.buttons);
        self.renderer.render_text(&status, layout.status, WHITE);
        self.renderer
            .render_container_grid(&containers, target, MAX_COLUMNS, layout.content);
        self.renderer.render_progress_bar(progress, layout.footer);
    }

    fn copy_state(&self) {
        let Some(player) = self.player.as_ref() else {
            return;
        };
        let snapshot = player
            .current_state()
            .map(FillState::get_text_representation)
            .unwrap_or_default();
        let text = format!(
            "{}\n\n{}",
            snapshot,
            player.result().get_event_log_representation()
        );
        match ClipboardContext::new() {
            Ok(ctx) => {
                if let Err(err) = ctx.set_text(text) {
                    warn!("Failed to copy to clipboard: {}", err);
                }
            }
            Err(err) => warn!("Clipboard unavailable: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_app() -> FillApp {
        let config = FillerConfig {
            seed: Some(3),
            ..FillerConfig::default()
        };
        FillApp::new(config).unwrap()
    }

    fn pick_two_colors(app: &mut FillApp) {
        app.handle_action(ControlAction::ContinueToColors);
        app.handle_action(ControlAction::ToggleColor(0));
        app.handle_action(ControlAction::ToggleColor(1));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = FillerConfig {
            total_tubes: 2,
            empty_tubes: 3,
            ..FillerConfig::default()
        };
        assert!(matches!(FillApp::new(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn structure_preview_shows_only_fillable_tubes() {
        let mut app = seeded_app();
        app.handle_action(ControlAction::IncreaseTotal);
        app.handle_action(ControlAction::IncreaseEmpty);
        let preview = structure_preview(&app.wizard);
        assert_eq!(preview.fluid_containers.len(), 2);
        assert!(preview.fluid_containers.iter().all(|t| t.is_empty() && t.get_capacity() == 4));
    }

    #[test]
    fn generate_waits_for_incomplete_selection() {
        let mut app = seeded_app();
        app.handle_action(ControlAction::ContinueToColors);
        app.handle_action(ControlAction::ToggleColor(0));
        app.handle_action(ControlAction::GenerateFill);
        assert_eq!(app.generation, Generation::Idle);
    }

    #[test]
    fn fill_runs_only_after_generating_frame() {
        let mut app = seeded_app();
        pick_two_colors(&mut app);
        app.handle_action(ControlAction::GenerateFill);
        assert_eq!(app.generation, Generation::Requested);

        // Nothing runs until the generating screen has been drawn.
        app.update(0.0);
        assert!(app.player.is_none());
        assert!(!app.is_playback());

        app.generation = Generation::Drawn;
        app.update(0.0);
        assert_eq!(app.generation, Generation::Idle);
        assert!(app.is_playback());
        assert_eq!(app.wizard.step(), SetupStep::Filling);
        let player = app.player.as_ref().unwrap();
        assert_eq!(player.result().events.len(), 8);
        assert_eq!(player.result().selected_colors, ["red", "blue"]);
    }

    #[test]
    fn playback_keys_drive_the_player() {
        let mut app = seeded_app();
        pick_two_colors(&mut app);
        app.handle_action(ControlAction::GenerateFill);
        app.generation = Generation::Drawn;
        app.update(0.0);

        app.handle_action(ControlAction::StepForward);
        app.handle_action(ControlAction::StepForward);
        assert_eq!(app.player.as_ref().unwrap().current_step(), 2);
        app.handle_action(ControlAction::GoToEnd);
        assert!(app.player.as_ref().unwrap().is_final_step());
        app.handle_action(ControlAction::TogglePlay);
        app.update(1.0);
        assert_eq!(app.player.as_ref().unwrap().current_step(), 1);
    }

    #[test]
    fn back_to_setup_drops_the_run() {
        let mut app = seeded_app();
        pick_two_colors(&mut app);
        app.handle_action(ControlAction::GenerateFill);
        app.generation = Generation::Drawn;
        app.update(0.0);
        assert!(app.player.is_some());

        app.handle_action(ControlAction::BackToSetup);
        assert!(app.player.is_none());
        assert_eq!(app.generation, Generation::Idle);
        assert_eq!(app.wizard.step(), SetupStep::Colors);
        assert_eq!(app.wizard.selected_colors(), ["red".to_string(), "blue".to_string()]);
    }
}
