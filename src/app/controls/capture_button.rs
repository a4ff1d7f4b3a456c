// SPDX-License-Identifier: MPL-2.0

//! Capture button widget implementation

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the capture button widget
    ///
    /// White circle, shrunk and grayed while a capture is pending. The button
    /// stays pressable; the session decides whether a press starts a capture.
    pub fn build_capture_button(&self, capturing: bool) -> Element<'_, Message> {
        let capture_button_color = if capturing {
            Color::from_rgb(0.7, 0.7, 0.7)
        } else {
            Color::WHITE
        };

        let scale = if capturing {
            ui::CAPTURE_BUTTON_PRESSED_SCALE
        } else {
            1.0
        };
        let inner_size = ui::CAPTURE_BUTTON_INNER * scale;
        let outer_size = ui::CAPTURE_BUTTON_OUTER * scale;

        let button_inner = widget::container(widget::Space::new(
            Length::Fixed(inner_size),
            Length::Fixed(inner_size),
        ))
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(capture_button_color)),
            border: cosmic::iced::Border {
                radius: [ui::CAPTURE_BUTTON_RADIUS * scale; 4].into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let button = widget::button::custom(button_inner)
            .on_press(Message::Capture)
            .padding(0)
            .width(Length::Fixed(outer_size))
            .height(Length::Fixed(outer_size));

        // Fixed-size wrapper so the row does not shift while the button is shrunk
        let button_wrapper = widget::container(button)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .center_x(ui::CAPTURE_BUTTON_OUTER)
            .center_y(ui::CAPTURE_BUTTON_OUTER);

        widget::column()
            .push(button_wrapper)
            .push(
                widget::text(fl!("take-photo"))
                    .size(12)
                    .class(cosmic::theme::Text::Color(Color::WHITE)),
            )
            .spacing(4)
            .align_x(Alignment::Center)
            .into()
    }
}
