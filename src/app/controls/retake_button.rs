// SPDX-License-Identifier: GPL-3.0-only

//! Retake button shown over a captured photo

use crate::app::state::{AppModel, Message};
use crate::fl;
use cosmic::Element;
use cosmic::widget;

impl AppModel {
    pub fn build_retake_button(&self) -> Element<'_, Message> {
        widget::button::suggested(fl!("take-another-photo"))
            .on_press(Message::Retake)
            .into()
    }
}
