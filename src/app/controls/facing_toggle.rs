// SPDX-License-Identifier: GPL-3.0-only

//! Front/back facing toggle button

use crate::app::state::{AppModel, Message};
use crate::app::view::overlay_container_style;
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Color, Length};
use cosmic::widget;

/// Camera switch icon SVG (camera with circular arrows)
const CAMERA_SWITCH_ICON: &[u8] =
    include_bytes!("../../../resources/button_icons/camera-switch.svg");

impl AppModel {
    /// Build the flip camera button
    pub fn build_facing_toggle(&self) -> Element<'_, Message> {
        let switch_icon = widget::icon::from_svg_bytes(CAMERA_SWITCH_ICON).symbolic(true);
        let icon_widget = widget::icon(switch_icon).size(ui::TOGGLE_ICON_SIZE);

        let icon_content = widget::container(icon_widget)
            .width(Length::Fixed(ui::TOGGLE_BUTTON_SIZE))
            .height(Length::Fixed(ui::TOGGLE_BUTTON_SIZE))
            .center(Length::Fixed(ui::TOGGLE_BUTTON_SIZE));

        let btn = widget::button::custom(icon_content)
            .padding(0)
            .class(cosmic::theme::Button::Text)
            .on_press(Message::ToggleFacing);

        widget::column()
            .push(widget::container(btn).style(overlay_container_style))
            .push(
                widget::text(fl!("flip-camera"))
                    .size(12)
                    .class(cosmic::theme::Text::Color(Color::WHITE)),
            )
            .spacing(4)
            .align_x(Alignment::Center)
            .into()
    }
}
