// SPDX-License-Identifier: MPL-2.0

//! Main application module
//!
//! # Architecture
//!
//! - `session`: permission/facing/photo state machine the view is derived from
//! - `state`: `AppModel`, `Message`, `ContextPage`
//! - `controls`: capture button, facing toggle, retake button
//! - `settings`: settings drawer UI
//! - `view`: main view rendering
//! - `update`: message dispatch into `handlers`

mod controls;
mod handlers;
pub mod session;
pub mod settings;
mod state;
mod update;
mod view;

use crate::backends::camera::{CameraPlatform, PreviewRequest, SystemPlatform};
use crate::config::{AppTheme, Config};
use crate::constants::{app_info, channels, timing};
use crate::fl;
use cosmic::app::context_drawer;
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
use session::{PhotoSession, ViewState};
pub use state::{AppModel, ContextPage, JPEG_QUALITY_PRESETS, Message};
use std::sync::Arc;
use tracing::{error, info, warn};

const REPOSITORY: &str = "https://github.com/snapcam/snapcam";
const APP_ICON: &[u8] =
    include_bytes!("../../resources/icons/hicolor/scalable/apps/dev.snapcam.Snapcam.svg");

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = app_info::APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application and issues the startup permission request.
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

        let (config_handler, config) = Config::load();

        let platform: Arc<dyn CameraPlatform> =
            Arc::new(SystemPlatform::new(config.capture_settings()));
        let session = PhotoSession::new(config.capture_policy());

        let theme_dropdown_options = AppTheme::ALL
            .iter()
            .map(|theme| match theme {
                AppTheme::System => fl!("match-desktop"),
                AppTheme::Dark => fl!("dark"),
                AppTheme::Light => fl!("light"),
            })
            .collect();
        let quality_dropdown_options = JPEG_QUALITY_PRESETS
            .iter()
            .map(|q| format!("{}%", q))
            .collect();

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            session,
            platform,
            preview_handle: None,
            photo_handle: None,
            theme_dropdown_options,
            quality_dropdown_options,
        };

        info!(
            runtime = app_info::runtime_environment(),
            "Requesting camera permission on startup"
        );
        let startup = app.perform_effect(app.session.on_mount());
        let theme = cosmic::command::set_theme(app.config.app_theme.theme());

        (app, Task::batch([startup, theme]))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("folder-pictures-symbolic"))
                .on_press(Message::OpenPhotoDirectory)
                .into(),
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
            widget::button::icon(widget::icon::from_name("help-about-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::About))
                .into(),
        ]
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

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    ///
    /// The live preview only runs while the live view is shown. Its id carries the
    /// facing and mirroring, so toggling either restarts it on the right camera.
    fn subscription(&self) -> Subscription<Self::Message> {
        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        let ViewState::Live { facing, .. } = self.session.view_state() else {
            return config_sub;
        };

        let request = PreviewRequest::new(facing, self.config.mirror_preview);
        let platform = Arc::clone(&self.platform);
        let preview_sub = Subscription::run_with_id(
            ("preview", request),
            cosmic::iced::stream::channel(
                channels::PREVIEW_SUBSCRIPTION_CAPACITY,
                move |mut output| async move {
                    use cosmic::iced::futures::StreamExt;

                    info!(facing = %request.facing, "Preview subscription started");
                    loop {
                        let (sender, mut receiver) = cosmic::iced::futures::channel::mpsc::channel(
                            channels::FRAME_CHANNEL_CAPACITY,
                        );

                        match platform.start_preview(request, sender) {
                            Ok(preview) => {
                                while let Some(frame) = receiver.next().await {
                                    // Dropping frames is fine for live preview - we want the latest frame
                                    if let Err(e) =
                                        output.try_send(Message::PreviewFrame(Arc::new(frame)))
                                        && e.is_disconnected()
                                    {
                                        info!("Preview subscription cancelled");
                                        return;
                                    }
                                }
                                warn!("Preview frame stream ended");
                                drop(preview);
                            }
                            Err(e) => {
                                error!(error = %e, "Failed to start preview");
                            }
                        }

                        if output.is_closed() {
                            break;
                        }
                        tokio::time::sleep(timing::PREVIEW_RETRY_DELAY).await;
                    }
                },
            ),
        );

        Subscription::batch([config_sub, preview_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
