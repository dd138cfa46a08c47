// SPDX-License-Identifier: GPL-3.0-only

//! Planting page: distance calibration

use super::page_header;
use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use crate::planting::{
    CROP_PRESETS, MAX_SPACING_CM, MIN_SPACING_CM, PlantLayout, SCALE_TICKS_CM, SPACING_STEP_CM,
};
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

impl AppModel {
    pub(crate) fn planting_view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let spacing_cm = self.planting.spacing_cm();

        let actions = widget::row()
            .push(widget::horizontal_space())
            .push(widget::button::standard(fl!("reset-default")).on_press(Message::ResetPlanting))
            .push(
                widget::button::suggested(fl!("save-configuration"))
                    .on_press_maybe(self.planting_unsaved().then_some(Message::SavePlanting)),
            )
            .spacing(spacing.space_s);

        let header = widget::column()
            .push(page_header(fl!("distance-calibration")))
            .push(widget::text::body(fl!("distance-calibration-description")))
            .push(actions)
            .spacing(spacing.space_s);

        let preview = widget::container(
            widget::column()
                .push(widget::text::heading(fl!("layout-preview")))
                .push(
                    widget::container(self.plant_row(spacing_cm))
                        .center_x(Length::Fill)
                        .center_y(Length::Fixed(ui::SPACING_PREVIEW_HEIGHT)),
                )
                .push(
                    widget::container(
                        widget::text(fl!("spacing-label", spacing = spacing_cm))
                            .size(20)
                            .font(cosmic::font::bold()),
                    )
                    .center_x(Length::Fill),
                )
                .spacing(spacing.space_s),
        )
        .padding(spacing.space_m)
        .class(cosmic::theme::Container::Card);

        let ticks = SCALE_TICKS_CM
            .iter()
            .enumerate()
            .fold(widget::row(), |row, (i, cm)| {
                let row = if i > 0 {
                    row.push(widget::horizontal_space())
                } else {
                    row
                };
                row.push(widget::text(format!("{cm}cm")).size(12))
            });

        let slider = widget::container(
            widget::column()
                .push(
                    widget::row()
                        .push(widget::text::heading(fl!("spacing-interval")).width(Length::Fill))
                        .push(widget::text(format!("{spacing_cm} cm")).font(cosmic::font::bold())),
                )
                .push(
                    widget::slider(MIN_SPACING_CM..=MAX_SPACING_CM, spacing_cm, Message::SetSpacing)
                        .step(SPACING_STEP_CM),
                )
                .push(ticks)
                .spacing(spacing.space_xs),
        )
        .padding(spacing.space_m)
        .class(cosmic::theme::Container::Card);

        let active = self.planting.active_crop();
        let presets = CROP_PRESETS.iter().enumerate().fold(
            widget::row().spacing(spacing.space_s),
            |row, (index, preset)| {
                let label = format!("{} ({}cm)", preset.name, preset.spacing_cm);
                let button = if active == Some(preset.name) {
                    widget::button::suggested(label)
                } else {
                    widget::button::standard(label)
                };
                row.push(button.on_press(Message::SelectCropPreset(index)))
            },
        );

        let presets = widget::container(
            widget::column()
                .push(widget::text::heading(fl!("crop-presets")))
                .push(presets)
                .spacing(spacing.space_s),
        )
        .padding(spacing.space_m)
        .class(cosmic::theme::Container::Card);

        widget::column()
            .push(header)
            .push(preview)
            .push(slider)
            .push(presets)
            .spacing(spacing.space_l)
            .into()
    }

    /// Row of plant markers; the last one is the next plant to be seeded
    fn plant_row(&self, spacing_cm: u32) -> Element<'_, Message> {
        let layout = self.planting.layout();
        let gap = PlantLayout::marker_gap(spacing_cm);
        let last = layout.positions.len().saturating_sub(1);

        layout
            .positions
            .iter()
            .enumerate()
            .fold(widget::row().align_y(Alignment::Center), |row, (i, _)| {
                let row = if i > 0 {
                    row.push(widget::horizontal_space().width(Length::Fixed(gap)))
                } else {
                    row
                };
                row.push(plant_marker(i == last))
            })
            .into()
    }
}

fn plant_marker<'a>(upcoming: bool) -> Element<'a, Message> {
    let size = ui::PLANT_MARKER_SIZE;
    let icon = widget::icon::from_name(if upcoming {
        "list-add-symbolic"
    } else {
        "emblem-ok-symbolic"
    })
    .size(24);

    widget::container(icon)
        .center_x(Length::Fixed(size))
        .center_y(Length::Fixed(size))
        .style(move |theme: &cosmic::Theme| {
            let accent = Color::from(theme.cosmic().accent_color());
            let (background, border_color) = if upcoming {
                (None, Color { a: 0.5, ..accent })
            } else {
                (Some(Background::Color(Color { a: 0.2, ..accent })), accent)
            };
            widget::container::Style {
                background,
                border: cosmic::iced::Border {
                    radius: (size / 2.0).into(),
                    width: 2.0,
                    color: border_color,
                },
                ..Default::default()
            }
        })
        .into()
}
