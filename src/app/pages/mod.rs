// SPDX-License-Identifier: GPL-3.0-only

//! Page views
//!
//! - `dashboard`: unit overview and module cards
//! - `planting`: distance calibration
//! - `weeding`: weed detection with the capture flow

mod dashboard;
mod planting;
mod weeding;

use crate::app::state::{Message, Page};
use crate::errors::{AcquisitionFailure, CaptureError};
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

/// Title block shared by the sub pages: back link above a large heading
fn page_header<'a>(title: String) -> widget::Column<'a, Message> {
    widget::column()
        .push(
            widget::button::text(fl!("back-to-dashboard"))
                .leading_icon(widget::icon::from_name("go-previous-symbolic").size(16))
                .on_press(Message::Navigate(Page::Dashboard)),
        )
        .push(widget::text(title).size(30).font(cosmic::font::bold()))
        .spacing(cosmic::theme::spacing().space_xxs)
}

/// Small pill with a colored dot ("System Online", "SYSTEM ACTIVE")
fn status_badge<'a>(label: String) -> Element<'a, Message> {
    let dot = widget::container(widget::Space::new(Length::Fixed(8.0), Length::Fixed(8.0))).style(
        |theme: &cosmic::Theme| widget::container::Style {
            background: Some(Background::Color(Color::from(theme.cosmic().accent_color()))),
            border: cosmic::iced::Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        },
    );

    widget::container(
        widget::row()
            .push(dot)
            .push(widget::text(label).size(12).font(cosmic::font::bold()))
            .spacing(6)
            .align_y(Alignment::Center),
    )
    .padding([4, 10])
    .class(cosmic::theme::Container::Card)
    .into()
}

/// Localized text for the camera notice dialog
pub(crate) fn notice_text(notice: &CaptureError) -> String {
    match notice {
        CaptureError::CameraUnavailable(AcquisitionFailure::PermissionDenied) => {
            fl!("camera-permission-denied")
        }
        CaptureError::CameraUnavailable(AcquisitionFailure::NoDevice) => fl!("camera-no-device"),
        CaptureError::CameraUnavailable(AcquisitionFailure::DeviceBusy) => fl!("camera-busy"),
        CaptureError::FileReadFailed(err) => err.to_string(),
    }
}
