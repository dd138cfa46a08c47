// SPDX-License-Identifier: GPL-3.0-only

//! Planting calibration handlers

use crate::app::state::{AppModel, Message};
use crate::planting::CROP_PRESETS;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use tracing::{error, info};

impl AppModel {
    pub(crate) fn handle_select_crop_preset(
        &mut self,
        index: usize,
    ) -> Task<cosmic::Action<Message>> {
        if let Some(preset) = CROP_PRESETS.get(index) {
            self.planting.select_preset(*preset);
        }
        Task::none()
    }

    pub(crate) fn handle_set_spacing(&mut self, cm: u32) -> Task<cosmic::Action<Message>> {
        self.planting.set_spacing(cm);
        Task::none()
    }

    pub(crate) fn handle_reset_planting(&mut self) -> Task<cosmic::Action<Message>> {
        self.planting.reset();
        Task::none()
    }

    pub(crate) fn handle_save_planting(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.planting_spacing_cm = self.planting.spacing_cm();
        self.config.planting_crop = self.planting.active_crop().map(str::to_string);
        info!(
            spacing_cm = self.config.planting_spacing_cm,
            crop = ?self.config.planting_crop,
            "Saving planting configuration"
        );

        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, "Failed to save planting configuration");
        }
        Task::none()
    }

    /// Whether the calibration differs from the saved configuration
    pub fn planting_unsaved(&self) -> bool {
        self.planting.spacing_cm() != self.config.planting_spacing_cm
            || self.planting.active_crop() != self.config.planting_crop.as_deref()
    }
}
