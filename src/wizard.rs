use macroquad::prelude::info;
use rand::Rng;

use crate::config::FillerConfig;
use crate::errors::{ConfigError, SetupError};
use crate::filler::{FillResult, simulate_with_rng};
use crate::palette;

const MIN_TOTAL_TUBES: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SetupStep {
    Structure,
    Colors,
    Filling,
}

/// Holds the tube layout and colour choice that feed the fill engine.
#[derive(Clone, Debug)]
pub struct SetupWizard {
    step: SetupStep,
    total_tubes: usize,
    empty_tubes: usize,
    selected_colors: Vec<String>,
    capacity: usize,
}

fn clamp_delta(value: usize, delta: isize, min: usize, max: usize) -> usize {
    let moved = if delta.is_negative() {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta as usize)
    };
    moved.clamp(min, max.max(min))
}

impl SetupWizard {
    pub fn new(config: &FillerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            step: SetupStep::Structure,
            total_tubes: config.total_tubes,
            empty_tubes: config.empty_tubes,
            selected_colors: Vec::new(),
            capacity: config.capacity,
        })
    }

    pub fn step(&self) -> SetupStep {
        self.step
    }

    pub fn total_tubes(&self) -> usize {
        self.total_tubes
    }

    pub fn empty_tubes(&self) -> usize {
        self.empty_tubes
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn fillable_tubes(&self) -> usize {
        self.total_tubes.saturating_sub(self.empty_tubes)
    }

    pub fn selected_colors(&self) -> &[String] {
        &self.selected_colors
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected_colors.iter().any(|c| c == name)
    }

    pub fn is_color_selection_complete(&self) -> bool {
        self.selected_colors.len() == self.fillable_tubes()
    }

    pub fn change_total(&mut self, delta: isize) {
        self.total_tubes = clamp_delta(self.total_tubes, delta, MIN_TOTAL_TUBES, palette::len());
        self.empty_tubes = self.empty_tubes.min(self.total_tubes.saturating_sub(1));
    }

    pub fn change_empty(&mut self, delta: isize) {
        self.empty_tubes = clamp_delta(self.empty_tubes, delta, 0, self.total_tubes.saturating_sub(1));
    }

    pub fn continue_to_colors(&mut self) {
        let fillable = self.fillable_tubes();
        self.selected_colors.truncate(fillable);
        self.step = SetupStep::Colors;
    }

    pub fn back_to_structure(&mut self) {
        self.step = SetupStep::Structure;
    }

    /// Deselects a chosen colour, or appends it while there is a free tube.
    /// Returns whether the selection changed.
    pub fn toggle_color(&mut self, name: &str) -> Result<bool, SetupError> {
        if !palette::contains(name) {
            return Err(SetupError::UnknownColor(name.to_string()));
        }
        if self.is_selected(name) {
            self.selected_colors.retain(|c| c != name);
            return Ok(true);
        }
        if self.selected_colors.len() >= self.fillable_tubes() {
            return Ok(false);
        }
        self.selected_colors.push(name.to_string());
        Ok(true)
    }

    pub fn reset_colors(&mut self) {
        self.selected_colors.clear();
    }

    pub fn generate_fill<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<FillResult<String>, SetupError> {
        if !self.is_color_selection_complete() {
            return Err(SetupError::ColorCountMismatch {
                selected: self.selected_colors.len(),
                fillable: self.fillable_tubes(),
            });
        }
        let result = simulate_with_rng(&self.selected_colors, self.capacity, rng);
        info!(
            "Generated fill for {} tubes ({} empty) in {} iterations.",
            self.total_tubes,
            self.empty_tubes,
            result.events.len()
        );
        self.step = SetupStep::Filling;
        Ok(result)
    }

    pub fn back_to_setup(&mut self) {
        self.step = SetupStep::Colors;
    }
}
