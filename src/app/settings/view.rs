// SPDX-License-Identifier: MPL-2.0

//! Settings drawer view

use crate::app::state::{AppModel, ContextPage, JPEG_QUALITY_PRESETS, Message};
use crate::constants::app_info;
use crate::fl;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

impl AppModel {
    fn settings_heading(label: String) -> Element<'static, Message> {
        widget::text(label).size(16).font(cosmic::font::bold()).into()
    }

    fn settings_toggle_row<'a>(
        label: String,
        description: String,
        toggler: Element<'a, Message>,
    ) -> Element<'a, Message> {
        widget::row()
            .push(
                widget::column()
                    .push(widget::text(label))
                    .push(widget::text(description).size(12))
                    .width(Length::Fill),
            )
            .push(toggler)
            .spacing(8)
            .align_y(Alignment::Center)
            .into()
    }

    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let theme_dropdown = widget::dropdown(
            &self.theme_dropdown_options,
            Some(self.config.app_theme.index()),
            Message::SetAppTheme,
        );

        let mirror_toggle = widget::toggler(self.config.mirror_preview)
            .on_toggle(|_| Message::ToggleMirrorPreview);
        let single_capture_toggle = widget::toggler(self.config.single_capture)
            .on_toggle(|_| Message::ToggleSingleCapture);

        let quality_index = JPEG_QUALITY_PRESETS
            .iter()
            .position(|q| *q == self.config.jpeg_quality);
        let quality_dropdown = widget::dropdown(
            &self.quality_dropdown_options,
            quality_index,
            Message::SetJpegQuality,
        );

        let directory = self.config.capture_settings().directory;
        let directory_row = widget::row()
            .push(widget::text(directory.display().to_string()).width(Length::Fill))
            .push(
                widget::button::icon(widget::icon::from_name("folder-open-symbolic"))
                    .on_press(Message::OpenPhotoDirectory),
            )
            .align_y(Alignment::Center);

        let version_info = if app_info::is_flatpak() {
            format!("Version {} (Flatpak)", app_info::version())
        } else {
            format!("Version {}", app_info::version())
        };

        let settings_column: Element<'_, Message> = widget::column()
            .push(Self::settings_heading(fl!("appearance")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text(fl!("theme")))
            .push(theme_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(Self::settings_heading(fl!("camera")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(Self::settings_toggle_row(
                fl!("mirror-preview"),
                fl!("mirror-preview-description"),
                mirror_toggle.into(),
            ))
            .push(widget::vertical_space().height(spacing.space_s))
            .push(Self::settings_toggle_row(
                fl!("single-capture"),
                fl!("single-capture-description"),
                single_capture_toggle.into(),
            ))
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(Self::settings_heading(fl!("photos")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text(fl!("jpeg-quality")))
            .push(quality_dropdown)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(widget::text(fl!("photo-directory")))
            .push(directory_row)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(version_info)
                    .size(12)
                    .class(cosmic::theme::Text::Accent),
            )
            .spacing(0)
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}
