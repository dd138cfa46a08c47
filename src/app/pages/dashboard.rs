// SPDX-License-Identifier: GPL-3.0-only

//! Dashboard: the unit overview

use super::status_badge;
use crate::app::state::{AppModel, Message, Page};
use crate::constants::robot;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

const CAPABILITY_ICONS: [&str; 3] = [
    "find-location-symbolic",
    "camera-web-symbolic",
    "battery-full-symbolic",
];

impl AppModel {
    pub(crate) fn dashboard_view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let header = widget::row()
            .push(
                widget::column()
                    .push(widget::text(fl!("page-dashboard")).size(30).font(cosmic::font::bold()))
                    .push(widget::text::body(fl!("dashboard-subtitle")))
                    .spacing(spacing.space_xxs)
                    .width(Length::Fill),
            )
            .push(status_badge(fl!("system-online")))
            .align_y(Alignment::Center);

        let capabilities = robot::CAPABILITIES.iter().zip(CAPABILITY_ICONS).fold(
            widget::row().spacing(spacing.space_s),
            |row, ((title, detail), icon_name)| {
                row.push(
                    widget::container(
                        widget::column()
                            .push(widget::icon::from_name(icon_name).size(24))
                            .push(widget::text(*title).font(cosmic::font::bold()))
                            .push(widget::text(*detail).size(12))
                            .spacing(spacing.space_xxxs)
                            .align_x(Alignment::Center),
                    )
                    .padding(spacing.space_s)
                    .width(Length::Fill)
                    .class(cosmic::theme::Container::Card),
                )
            },
        );

        let unit_card = widget::container(
            widget::row()
                .push(
                    widget::container(
                        widget::column()
                            .push(widget::icon::from_name("applications-science-symbolic").size(128))
                            .push(widget::text(robot::MODEL).size(12).font(cosmic::font::bold()))
                            .spacing(spacing.space_s)
                            .align_x(Alignment::Center),
                    )
                    .center_x(Length::FillPortion(1))
                    .padding(spacing.space_l),
                )
                .push(
                    widget::column()
                        .push(widget::text(robot::NAME).size(26).font(cosmic::font::bold()))
                        .push(widget::text::body(fl!("unit-description")))
                        .push(capabilities)
                        .spacing(spacing.space_m)
                        .width(Length::FillPortion(1)),
                )
                .spacing(spacing.space_l)
                .align_y(Alignment::Center),
        )
        .padding(spacing.space_l)
        .class(cosmic::theme::Container::Card);

        let modules = widget::row()
            .push(module_card(
                "list-add-symbolic",
                fl!("planting-module"),
                fl!("planting-module-description"),
                Page::Planting,
            ))
            .push(module_card(
                "camera-photo-symbolic",
                fl!("weeding-system"),
                fl!("weeding-system-description"),
                Page::Weeding,
            ))
            .spacing(spacing.space_m);

        widget::column()
            .push(header)
            .push(unit_card)
            .push(modules)
            .spacing(spacing.space_l)
            .into()
    }
}

/// Clickable card that opens a page
fn module_card<'a>(
    icon_name: &'static str,
    title: String,
    description: String,
    page: Page,
) -> Element<'a, Message> {
    let spacing = cosmic::theme::spacing();
    let content = widget::column()
        .push(widget::icon::from_name(icon_name).size(32))
        .push(widget::text(title).size(18).font(cosmic::font::bold()))
        .push(widget::text::body(description))
        .spacing(spacing.space_xs)
        .padding(spacing.space_m);

    widget::button::custom(content)
        .on_press(Message::Navigate(page))
        .class(cosmic::theme::Button::Standard)
        .width(Length::Fill)
        .into()
}
