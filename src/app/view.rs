// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! One dispatch on [`ViewState`] picks the screen:
//! - permission gate (waiting placeholder or denied message with a retry button)
//! - live camera preview with the facing toggle and capture button
//! - captured photo with the retake button

use crate::app::session::{Control, ViewState};
use crate::app::state::{AppModel, Message};
use crate::backends::camera::CapturedPhoto;
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, ContentFit, Length};
use cosmic::widget;

/// Semi-transparent dark background for buttons drawn over the camera image
pub fn overlay_container_style(_theme: &cosmic::Theme) -> widget::container::Style {
    widget::container::Style {
        background: Some(Background::Color(Color::from_rgba(
            0.0,
            0.0,
            0.0,
            ui::OVERLAY_BACKGROUND_ALPHA,
        ))),
        text_color: Some(Color::WHITE),
        border: cosmic::iced::Border {
            radius: [ui::OVERLAY_BORDER_RADIUS; 4].into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn black_background(_theme: &cosmic::Theme) -> widget::container::Style {
    widget::container::Style {
        background: Some(Background::Color(Color::BLACK)),
        ..Default::default()
    }
}

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let state = self.session.view_state();
        match state {
            ViewState::AwaitingPermission => self.build_permission_waiting(),
            ViewState::Denied => self.build_permission_denied(state.controls()),
            ViewState::Live { capturing, .. } => self.build_live_view(state.controls(), capturing),
            ViewState::Preview { photo } => self.build_photo_preview(photo, state.controls()),
        }
    }

    fn build_permission_waiting(&self) -> Element<'_, Message> {
        widget::container(widget::text(fl!("permission-waiting")))
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .into()
    }

    fn build_permission_denied(&self, controls: &[Control]) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let mut column = widget::column()
            .push(
                widget::text(fl!("permission-required"))
                    .size(16)
                    .width(Length::Fixed(ui::PERMISSION_TEXT_WIDTH))
                    .align_x(Alignment::Center),
            )
            .spacing(spacing.space_m)
            .align_x(Alignment::Center);

        for control in controls {
            if *control == Control::RequestPermission {
                column = column.push(
                    widget::button::suggested(fl!("grant-permission"))
                        .on_press(Message::RequestPermission),
                );
            }
        }

        widget::container(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .into()
    }

    fn build_live_view(&self, controls: &[Control], capturing: bool) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let preview: Element<'_, Message> = match &self.preview_handle {
            Some(handle) => widget::image(handle.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => widget::container(
                widget::text(fl!("camera-starting")).class(cosmic::theme::Text::Color(Color::WHITE)),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .into(),
        };

        // [Fill] [Toggle] [Capture] [Spacer matching Toggle] [Fill]
        let mut row = widget::row()
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .spacing(spacing.space_l)
            .align_y(Alignment::Center);
        for control in controls {
            row = match control {
                Control::ToggleFacing => row.push(self.build_facing_toggle()),
                Control::Capture => row
                    .push(self.build_capture_button(capturing))
                    .push(widget::Space::new(
                        Length::Fixed(ui::TOGGLE_BUTTON_SIZE),
                        Length::Shrink,
                    )),
                _ => row,
            };
        }
        row = row.push(widget::Space::new(Length::Fill, Length::Shrink));

        let overlay = widget::column()
            .push(widget::Space::new(Length::Fill, Length::Fill))
            .push(row.width(Length::Fill))
            .padding(spacing.space_l);

        widget::container(
            cosmic::iced::widget::stack![preview, overlay]
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(black_background)
        .into()
    }

    fn build_photo_preview<'a>(
        &'a self,
        photo: &'a CapturedPhoto,
        controls: &[Control],
    ) -> Element<'a, Message> {
        let spacing = cosmic::theme::spacing();

        let handle = self
            .photo_handle
            .clone()
            .unwrap_or_else(|| widget::image::Handle::from_path(photo.path()));
        let image = widget::image(handle)
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill);

        let mut buttons = widget::row()
            .spacing(spacing.space_s)
            .align_y(Alignment::Center);
        for control in controls {
            if *control == Control::Retake {
                buttons = buttons.push(self.build_retake_button());
            }
        }

        let column = widget::column()
            .push(
                widget::container(buttons)
                    .width(Length::Fill)
                    .center_x(Length::Fill)
                    .padding(spacing.space_s),
            )
            .push(image)
            .width(Length::Fill)
            .height(Length::Fill);

        widget::container(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(black_background)
            .into()
    }
}
