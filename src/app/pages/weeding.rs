// SPDX-License-Identifier: GPL-3.0-only

//! Weeding page: input selection, scan display and statistics

use super::{page_header, status_badge};
use crate::app::frame_processor::format_age;
use crate::app::state::{AppModel, Message, ReportStatus};
use crate::capture::CaptureMode;
use crate::constants::ui;
use crate::fl;
use chrono::Local;
use cosmic::Element;
use cosmic::iced::{Alignment, ContentFit, Length};
use cosmic::widget;

impl AppModel {
    pub(crate) fn weeding_view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let header = widget::column()
            .push(page_header(fl!("weed-detection-system")))
            .push(widget::text::body(fl!("weed-detection-description")))
            .spacing(spacing.space_xxs);

        let content = widget::row()
            .push(
                widget::column()
                    .push(self.capture_controls())
                    .push(self.capture_display())
                    .spacing(spacing.space_s)
                    .width(Length::Fill),
            )
            .push(self.stats_panel())
            .spacing(spacing.space_m);

        widget::column()
            .push(header)
            .push(content)
            .spacing(spacing.space_l)
            .into()
    }

    fn capture_controls(&self) -> Element<'_, Message> {
        let flow = &self.capture;
        let mode = flow.mode();
        let busy = flow.is_acquiring() || flow.is_reading_file();

        let camera_button = if mode == CaptureMode::LiveCamera {
            widget::button::suggested(fl!("live-camera"))
        } else {
            widget::button::standard(fl!("live-camera"))
        }
        .leading_icon(widget::icon::from_name("camera-web-symbolic").size(16))
        .on_press_maybe(flow.can_request_camera().then_some(Message::RequestCamera));

        let image_button = if mode == CaptureMode::StillImage {
            widget::button::suggested(fl!("image-upload"))
        } else {
            widget::button::standard(fl!("image-upload"))
        }
        .leading_icon(widget::icon::from_name("document-open-symbolic").size(16))
        .on_press_maybe(flow.can_select_file().then_some(Message::SelectImage));

        let close_button = widget::button::text(fl!("close"))
            .leading_icon(widget::icon::from_name("window-close-symbolic").size(16))
            .on_press_maybe(
                (mode != CaptureMode::Idle || busy).then_some(Message::CloseCapture),
            );

        let scan_label = if flow.is_scanning() {
            fl!("scanning")
        } else {
            fl!("scan")
        };
        let scan_button = widget::button::suggested(scan_label)
            .leading_icon(widget::icon::from_name("edit-find-symbolic").size(16))
            .on_press_maybe(
                (mode != CaptureMode::Idle && !flow.is_scanning()).then_some(Message::Scan),
            );

        widget::row()
            .push(camera_button)
            .push(image_button)
            .push(close_button)
            .push(widget::horizontal_space())
            .push(scan_button)
            .spacing(cosmic::theme::spacing().space_xs)
            .align_y(Alignment::Center)
            .into()
    }

    fn capture_display(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let flow = &self.capture;

        let body: Element<'_, Message> = match &self.display {
            Some(handle) => widget::image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .into(),
            None => {
                let (icon, text) = if flow.is_acquiring() {
                    ("camera-web-symbolic", fl!("starting-camera"))
                } else if flow.is_reading_file() {
                    ("document-open-symbolic", fl!("reading-image"))
                } else if flow.mode() == CaptureMode::LiveCamera {
                    ("camera-web-symbolic", fl!("waiting-for-frame"))
                } else {
                    ("camera-photo-symbolic", fl!("no-input"))
                };
                widget::column()
                    .push(widget::icon::from_name(icon).size(64))
                    .push(widget::text::body(text))
                    .spacing(spacing.space_s)
                    .align_x(Alignment::Center)
                    .into()
            }
        };

        let mut column = widget::column().spacing(spacing.space_s);
        if flow.mode() == CaptureMode::LiveCamera {
            column = column.push(status_badge(fl!("system-active")));
        }
        if flow.is_scanning() {
            column = column.push(widget::text::body(fl!("scan-in-progress")));
        }

        widget::container(
            column.push(
                widget::container(body)
                    .center_x(Length::Fill)
                    .center_y(Length::Fixed(420.0)),
            ),
        )
        .padding(spacing.space_s)
        .class(cosmic::theme::Container::Card)
        .into()
    }

    fn stats_panel(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let stats = self.capture.stats();
        let now = Local::now();

        let delta = match stats.delta_from_last_scan() {
            Some(d) if d >= 0 => fl!("delta-from-last-scan", delta = format!("+{d}")),
            Some(d) => fl!("delta-from-last-scan", delta = d.to_string()),
            None => fl!("no-scans-yet"),
        };

        let detections = self.capture.detections();
        let recent: Element<'_, Message> = if detections.is_empty() {
            widget::text::body(fl!("no-detections")).into()
        } else {
            detections
                .iter()
                .take(ui::RECENT_DETECTIONS)
                .fold(widget::column().spacing(spacing.space_xs), |col, d| {
                    col.push(
                        widget::row()
                            .push(
                                widget::column()
                                    .push(widget::text(d.label.clone()).font(cosmic::font::bold()))
                                    .push(widget::text(format_age(d.observed_at, now)).size(12))
                                    .width(Length::Fill),
                            )
                            .push(widget::text(format!("{}%", d.confidence)))
                            .align_y(Alignment::Center),
                    )
                })
                .into()
        };

        let mut column = widget::column()
            .push(widget::text::heading(fl!("live-statistics")))
            .push(widget::text::body(fl!("weeds-detected")))
            .push(
                widget::text(stats.total_weeds.to_string())
                    .size(36)
                    .font(cosmic::font::bold()),
            )
            .push(widget::text(delta).size(12))
            .push(widget::divider::horizontal::default())
            .push(widget::text::heading(fl!("recent-detections")))
            .push(recent)
            .push(widget::divider::horizontal::default())
            .push(
                widget::button::standard(fl!("generate-report"))
                    .leading_icon(widget::icon::from_name("document-save-symbolic").size(16))
                    .on_press_maybe(
                        (stats.scans > 0 && !self.capture.is_scanning())
                            .then_some(Message::GenerateReport),
                    ),
            )
            .spacing(spacing.space_s);

        match &self.report_status {
            Some(ReportStatus::Saved(path)) => {
                column = column.push(
                    widget::row()
                        .push(
                            widget::text(fl!(
                                "report-saved",
                                path = path.display().to_string()
                            ))
                            .size(12)
                            .width(Length::Fill),
                        )
                        .push(
                            widget::button::icon(widget::icon::from_name("folder-open-symbolic"))
                                .on_press(Message::OpenReportFolder),
                        )
                        .align_y(Alignment::Center),
                );
            }
            Some(ReportStatus::Failed(err)) => {
                column = column
                    .push(widget::text(fl!("report-failed", error = err.clone())).size(12));
            }
            None => {}
        }

        widget::container(column)
            .padding(spacing.space_m)
            .width(Length::Fixed(ui::STATS_PANEL_WIDTH))
            .class(cosmic::theme::Container::Card)
            .into()
    }
}
