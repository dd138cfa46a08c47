// SPDX-License-Identifier: MPL-2.0

//! Main application module for the AgriBot field console
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, Page, ContextPage)
//! - `pages`: Dashboard, planting calibration and weed detection views
//! - `detection_overlay`: Detection boxes drawn onto frames
//! - `frame_processor`: Detection types and the weed detector
//! - `settings`: Settings drawer UI
//! - `handlers`: Message handlers grouped by domain
//! - `update`: Message dispatch
//!
//! The sidebar is the COSMIC nav bar. Leaving the weeding page tears its
//! capture flow down and installs a fresh one, so no camera outlives the
//! page that opened it.

pub mod detection_overlay;
pub mod frame_processor;
mod handlers;
mod pages;
pub mod settings;
mod state;
mod update;

use crate::app::frame_processor::SimulatedWeedDetector;
use crate::backends::camera::{CameraProvider, V4l2Provider};
use crate::capture::CaptureFlow;
use crate::config::{AppTheme, Config};
use crate::fl;
use crate::planting::SpacingCalibration;
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About, icon, nav_bar};
use cosmic::{Element, Task};
pub use state::{AppModel, ContextPage, Message, Page, ReportStatus};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

const REPOSITORY: &str = "https://github.com/agribot-field/agribot";
const APP_ICON: &[u8] = include_bytes!(
    "../../resources/icons/hicolor/scalable/apps/io.github.agribot.FieldConsole.svg"
);

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.agribot.FieldConsole";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        let mut nav = nav_bar::Model::default();
        for page in Page::ALL {
            let item = nav
                .insert()
                .text(page.title())
                .icon(icon::from_name(page.icon_name()))
                .data::<Page>(page);
            if page == Page::default() {
                item.activate();
            }
        }

        let planting =
            SpacingCalibration::restore(config.planting_spacing_cm, config.planting_crop.as_deref());

        let camera_provider: Arc<dyn CameraProvider> = Arc::new(V4l2Provider::new());

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            nav,
            capture: CaptureFlow::new(),
            camera_provider: Arc::clone(&camera_provider),
            detector: Arc::new(SimulatedWeedDetector::new()),
            display: None,
            planting,
            available_cameras: Vec::new(),
            camera_dropdown_options: vec![fl!("camera-automatic")],
            theme_dropdown_options: AppTheme::ALL
                .iter()
                .map(|theme| match theme {
                    AppTheme::System => fl!("theme-system"),
                    AppTheme::Dark => fl!("theme-dark"),
                    AppTheme::Light => fl!("theme-light"),
                })
                .collect(),
            report_status: None,
        };

        // Enumerate cameras off the UI thread for the settings drawer
        let enumerate_task = Task::perform(
            async move {
                tokio::task::spawn_blocking(move || camera_provider.enumerate())
                    .await
                    .unwrap_or_else(|e| {
                        error!(error = %e, "Camera enumeration task failed");
                        Vec::new()
                    })
            },
            |cameras| cosmic::Action::App(Message::CamerasEnumerated(cameras)),
        );

        (app, enumerate_task)
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("help-about-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::About))
                .into(),
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    fn nav_model(&self) -> Option<&nav_bar::Model> {
        Some(&self.nav)
    }

    fn on_nav_select(&mut self, id: nav_bar::Id) -> Task<cosmic::Action<Self::Message>> {
        let previous = self.active_page();
        self.nav.activate(id);
        self.handle_page_change(previous)
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Blocking notice for camera failures
    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        let notice = self.capture.notice()?;
        Some(
            widget::dialog()
                .title(fl!("camera-unavailable"))
                .body(pages::notice_text(notice))
                .primary_action(
                    widget::button::suggested(fl!("dismiss")).on_press(Message::DismissNotice),
                )
                .into(),
        )
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        let page = match self.active_page() {
            Page::Dashboard => self.dashboard_view(),
            Page::Planting => self.planting_view(),
            Page::Weeding => self.weeding_view(),
        };

        widget::scrollable(
            widget::container(page)
                .padding(cosmic::theme::spacing().space_l)
                .width(cosmic::iced::Length::Fill),
        )
        .into()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::SinkExt;

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // Forward preview frames while a stream is held; keyed by stream id so
        // a new stream starts a new forwarder and a released one ends it
        let preview_sub = match self
            .capture
            .stream()
            .and_then(|s| s.preview_receiver().map(|rx| (s.id(), rx)))
        {
            Some((stream_id, mut receiver)) => Subscription::run_with_id(
                ("camera_preview", stream_id),
                cosmic::iced::stream::channel(1, move |mut output| async move {
                    info!(stream = stream_id, "Preview subscription started");
                    while receiver.changed().await.is_ok() {
                        let frame = receiver.borrow_and_update().clone();
                        let Some(frame) = frame else { continue };
                        if output
                            .send(Message::PreviewFrame(stream_id, frame))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    debug!(stream = stream_id, "Preview subscription ended");
                }),
            ),
            None => Subscription::none(),
        };

        // Keep "12s ago" labels current while results are shown
        let tick_sub = if self.capture.detections().is_empty() {
            Subscription::none()
        } else {
            cosmic::iced::time::every(Duration::from_secs(1)).map(|_| Message::Tick)
        };

        Subscription::batch([config_sub, preview_sub, tick_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}

impl AppModel {
    /// Page selected in the sidebar
    pub fn active_page(&self) -> Page {
        self.nav.active_data::<Page>().copied().unwrap_or_default()
    }
}
