// SPDX-License-Identifier: GPL-3.0-only

//! System handlers
//!
//! Handles navigation, the context drawer, settings and external URLs.

use crate::app::state::{AppModel, ContextPage, Message, Page};
use crate::backends::camera::types::CameraDevice;
use crate::capture::CaptureFlow;
use crate::config::{AppTheme, Config};
use crate::fl;
use crate::planting::SpacingCalibration;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use tracing::{error, info};

impl AppModel {
    // =========================================================================
    // Navigation Handlers
    // =========================================================================

    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(url = %url, error = %err, "Failed to open URL");
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    /// In-page navigation ("Back to Dashboard", module cards)
    pub(crate) fn handle_navigate(&mut self, page: Page) -> Task<cosmic::Action<Message>> {
        let previous = self.active_page();
        let target = self
            .nav
            .iter()
            .find(|&id| self.nav.data::<Page>(id) == Some(&page));
        if let Some(id) = target {
            self.nav.activate(id);
        }
        self.handle_page_change(previous)
    }

    /// Called after the active sidebar entry changed
    pub(crate) fn handle_page_change(&mut self, previous: Page) -> Task<cosmic::Action<Message>> {
        let current = self.active_page();
        if previous == current {
            return Task::none();
        }
        info!(from = ?previous, to = ?current, "Page changed");

        if previous == Page::Weeding {
            // The old flow is torn down on drop; its late completions carry
            // tickets the fresh flow never issued
            self.capture = CaptureFlow::new();
            self.display = None;
            self.report_status = None;
        }
        Task::none()
    }

    // =========================================================================
    // Settings Handlers
    // =========================================================================

    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        // An unsaved calibration is kept; otherwise follow the new values
        if !self.planting_unsaved() {
            self.planting =
                SpacingCalibration::restore(config.planting_spacing_cm, config.planting_crop.as_deref());
        }
        self.config = config;
        Task::none()
    }

    pub(crate) fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(&app_theme) = AppTheme::ALL.get(index) else {
            return Task::none();
        };

        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;
        self.save_config("app theme");

        cosmic::command::set_theme(app_theme.theme())
    }

    pub(crate) fn handle_select_camera_device(
        &mut self,
        index: usize,
    ) -> Task<cosmic::Action<Message>> {
        // Index 0 is "Automatic"
        let device = match index {
            0 => None,
            n => match self.available_cameras.get(n - 1) {
                Some(camera) => Some(camera.path.clone()),
                None => return Task::none(),
            },
        };

        info!(device = ?device, "Selected camera device");
        self.config.camera_device = device;
        self.save_config("camera device");
        Task::none()
    }

    pub(crate) fn handle_cameras_enumerated(
        &mut self,
        cameras: Vec<CameraDevice>,
    ) -> Task<cosmic::Action<Message>> {
        info!(count = cameras.len(), "Found camera(s)");
        self.camera_dropdown_options = std::iter::once(fl!("camera-automatic"))
            .chain(cameras.iter().map(|c| c.name.clone()))
            .collect();
        self.available_cameras = cameras;
        Task::none()
    }

    /// Dropdown index of the configured camera
    pub fn selected_camera_index(&self) -> usize {
        self.config
            .camera_device
            .as_ref()
            .and_then(|path| self.available_cameras.iter().position(|c| &c.path == path))
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn save_config(&self, what: &str) {
        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, setting = what, "Failed to save setting");
        }
    }
}
