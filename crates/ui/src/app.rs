// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::config::{self, Config};
use crate::connection::{self, ConnectionEvent, ConnectionMsg, ConnectionSender};
use crate::i18n::{self, fl, AppLanguage, FluentLocalize};
use crate::views;
use crate::views::connection_viz::VizAssets;
use crate::views::server_card::{ServerCardMsg, ServerCardView};
use crate::{util, Args};
use anyhow::Context;
use arboard::Clipboard;
use core::time::Duration;
use iced::{time, window, Size, Subscription, Task};
use iced_fonts::BOOTSTRAP_FONT_BYTES;
use server_card_core::event::ServerCardEvent;
use server_card_core::props::{ServerCardProps, ServerDisplayInfo};
use server_card_core::types::ConnectionState;
use std::path::PathBuf;
use tracing::{debug, error, warn};

/// Interval between two frames of the connection visualization animation.
const ANIMATION_INTERVAL: Duration = Duration::from_millis(80);

/// Top-level app messages.
///
/// Emitted by the UI elements, handled by the app update routines.
#[derive(Debug, Clone)]
pub(crate) enum AppMsg {
    ChangeLanguage(AppLanguage),
    OptimizeTouch(bool),
    ClipboardCopy(String),
    SaveConfig,
    CloseLatestWindow,
    CloseWindow(window::Id),
    ShowModal(Box<Modal>),
    HideModal,
    WithHideModal(Box<Self>),
    DismissError,
    ResetRootPath,
    /// The localization is loaded and can be handed to the server cards.
    LocalizeReady,
    AnimationTick,
    ConnectionEvent(ConnectionEvent),
    Card {
        server_id: String,
        msg: ServerCardMsg,
    },
    UpdateAddServerAddress(String),
    AddServer,
    UpdateRenameText(String),
    RenameServer {
        server_id: String,
        name: String,
    },
    ForgetServer {
        server_id: String,
    },
    /// Simulates a network interruption of all established tunnels.
    InterruptConnections,
}

impl AppMsg {
    /// Wrap the app message with a hide modal message.
    ///
    /// Useful when an action should be executed in addition to closing the current active modal.
    pub(crate) fn hide_modal(self) -> Self {
        Self::WithHideModal(Box::new(self))
    }
}

/// Starts the entire application.
///
/// Blocks until the application should exit.
pub(crate) fn run(args: Args) -> iced::Result {
    let initialize = move || -> (App, Task<AppMsg>) {
        if let Err(err) = util::ensure_app_default_dirs() {
            error!(?err, "Ensure existance of app default dirs");
        };
        let mut app = App::new(
            args.root_path.clone(),
            args.optimize_touch,
            args.internal_clipboard,
            util::config_path(),
        );

        match Config::load_from_path(&app.config_path) {
            Ok(Some(config)) => app.load_config(config),
            Ok(None) => {
                // Save initially
                app.save_config_to_path();
            }
            Err(error) => {
                error!(?error, "Loading configuration from file");
                app.errors.push(ErrorReport {
                    criticality: ErrorCriticality::NonCritical,
                    short: fl!("error-app-config-load"),
                    detailed: format!("{error:?}"),
                })
            }
        }

        // The cards are created without localization, it is supplied on the first update turn.
        (app, Task::done(AppMsg::LocalizeReady))
    };

    iced::application(initialize, App::update, views::view_app)
        .title(App::title)
        .window(window::Settings {
            min_size: Some(Size::new(360., 480.)),
            size: Size::new(480., 720.),
            ..Default::default()
        })
        .subscription(App::subscription)
        .font(BOOTSTRAP_FONT_BYTES)
        .antialiasing(true)
        .exit_on_close_request(false)
        .run()
}

/// Different modals that can be displayed in the UI.
///
/// Because this is an enum, only a single modal can be displayed at once.
/// This avoids usability challenges/issues that arise when using nested modals.
#[derive(Debug, Clone, Default)]
pub(crate) enum Modal {
    #[default]
    None,
    Settings,
    RenameServer {
        server_id: String,
        /// The edited name, prefilled with the current one.
        name: String,
    },
    Confirmation {
        msg: String,
        confirm: AppMsg,
    },
}

/// The criticality of of an [ErrorReport].
///
/// Will be used by the UI to use different elements/accents
/// behave differently depending on the criticality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum ErrorCriticality {
    NonCritical,
    Critical,
}

/// An error report intended to be displayed by UI elements.
#[derive(Debug, Clone)]
pub(crate) struct ErrorReport {
    /// The error criticality.
    pub(crate) criticality: ErrorCriticality,
    /// A short string telling users what the issue is in a short and concise way.
    ///
    /// Should be translated.
    pub(crate) short: String,
    /// More verbose message containing details about the error.
    ///
    /// Does not need to be translated, english strings should be fine here.
    pub(crate) detailed: String,
}

/// Holds the entire app state.
///
/// Owns the inputs of all server cards and reacts to the events they emit.
pub(crate) struct App {
    /// The current displayed modal ([Modal] has variant [Modal::None] when no modal should be displayed).
    pub(crate) modal: Modal,
    /// Optimize the UI for touch input.
    pub(crate) optimize_touch: bool,
    /// App clipboard. Needs to be held for the entire duration of the process.
    pub(crate) clipboard: Option<Clipboard>,
    /// Determines if a internal clipboard implementation should be used instead of delegating copy/pasting
    /// to the system clipboard.
    pub(crate) internal_clipboard: bool,
    /// The data of the internal clipboard.
    ///
    /// Only used when `internal_clipboard` is set to `true`.
    pub(crate) internal_clipboard_buf: String,
    /// The current app language.
    ///
    /// Whenever the language is changed, the [i18n::change_language] routine is called.
    pub(crate) language: AppLanguage,
    /// Root directory handed to the connection visualizations.
    pub(crate) root_path: PathBuf,
    /// Set when the root path was supplied on the command line, it then takes precedence over the configuration.
    pub(crate) root_path_override: bool,
    /// The visualization assets present below `root_path`.
    pub(crate) viz_assets: VizAssets,
    /// Where the configuration is loaded from and saved to.
    pub(crate) config_path: PathBuf,
    /// The sender that sends messages to the connection subscription.
    pub(crate) connection_sender: Option<ConnectionSender>,
    /// Whether the cards already received their localize function.
    pub(crate) localize_ready: bool,
    /// All current reported errors.
    pub(crate) errors: Vec<ErrorReport>,
    /// One card per configured server, in display order.
    pub(crate) servers: Vec<ServerCardView>,
    /// The text of the add server address input.
    pub(crate) add_server_address: String,
    /// Frame counter of the connection visualization animation.
    pub(crate) anim_frame: u32,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("modal", &self.modal)
            .field("optimize_touch", &self.optimize_touch)
            .field("clipboard", &".. no debug impl ..")
            .field("internal_clipboard", &self.internal_clipboard)
            .field("internal_clipboard_buf", &self.internal_clipboard_buf)
            .field("language", &self.language)
            .field("root_path", &self.root_path)
            .field("root_path_override", &self.root_path_override)
            .field("viz_assets", &self.viz_assets)
            .field("config_path", &self.config_path)
            .field("connection_sender", &self.connection_sender)
            .field("localize_ready", &self.localize_ready)
            .field("errors", &self.errors)
            .field("servers", &self.servers)
            .field("add_server_address", &self.add_server_address)
            .field("anim_frame", &self.anim_frame)
            .finish()
    }
}

impl App {
    /// Create a new application with options:
    /// - the root path for the visualization assets, taking precedence over the configuration if supplied.
    /// - whether the UI should be optimized for touch input.
    /// - whether the internal clipboard implementation should be used.
    /// - the path of the configuration file.
    fn new(
        root_path: Option<PathBuf>,
        optimize_touch: bool,
        internal_clipboard: bool,
        config_path: PathBuf,
    ) -> Self {
        debug!(?root_path, ?optimize_touch, ?config_path, "New app");
        let clipboard = if internal_clipboard {
            None
        } else {
            Clipboard::new().ok()
        };
        let language = match AppLanguage::try_from(i18n::current_language()) {
            Ok(language) => language,
            Err(error) => {
                warn!(?error, "Loaded language is not supported, using default");
                AppLanguage::default()
            }
        };

        let root_path_override = root_path.is_some();
        let root_path = root_path.unwrap_or_else(util::default_root_path);

        Self {
            modal: Modal::None,
            optimize_touch,
            clipboard,
            internal_clipboard,
            internal_clipboard_buf: String::default(),
            language,
            root_path_override,
            viz_assets: VizAssets::scan(&root_path),
            root_path,
            config_path,
            connection_sender: None,
            localize_ready: false,
            errors: Vec::default(),
            servers: Vec::default(),
            add_server_address: String::default(),
            anim_frame: 0,
        }
    }

    /// Returns the (translated) application title.
    fn title(&self) -> String {
        fl!("app-title")
    }

    /// Returns all joined subscription.
    fn subscription(&self) -> Subscription<AppMsg> {
        let mut subscriptions = vec![
            Subscription::run(connection::kickoff).map(AppMsg::ConnectionEvent),
            Subscription::run(config::periodic_save_subscription),
            window::close_requests().map(AppMsg::CloseWindow),
        ];
        if self.is_animating() {
            subscriptions.push(time::every(ANIMATION_INTERVAL).map(|_| AppMsg::AnimationTick));
        }
        Subscription::batch(subscriptions)
    }

    /// Whether some card currently visualizes a transitional state.
    pub(crate) fn is_animating(&self) -> bool {
        self.servers
            .iter()
            .any(|card| card.props().state.is_transitional())
    }

    /// Handle received app messages through iced's message passing.
    fn update(&mut self, msg: AppMsg) -> Task<AppMsg> {
        if !matches!(msg, AppMsg::AnimationTick) {
            debug!(?msg, "App UI update");
        }

        match msg {
            AppMsg::ChangeLanguage(language) => {
                if self.language != language {
                    match i18n::change_language(language.into()) {
                        Ok(_) => {
                            self.language = language;
                        }
                        Err(error) => error!(?error, ?language, "Change language"),
                    }
                }
                Task::none()
            }
            AppMsg::OptimizeTouch(optimize_touch) => {
                self.optimize_touch = optimize_touch;
                Task::none()
            }
            AppMsg::ClipboardCopy(content) => {
                if let Err(e) = set_clipboard_text(
                    &mut self.clipboard,
                    self.internal_clipboard,
                    &mut self.internal_clipboard_buf,
                    content,
                ) {
                    error!("Set clipboard content, Err: {e:?}");
                    self.errors.push(ErrorReport {
                        criticality: ErrorCriticality::NonCritical,
                        short: fl!("error-clipboard-copy"),
                        detailed: format!("{e:?}"),
                    });
                }
                Task::none()
            }
            AppMsg::SaveConfig => {
                self.save_config_to_path();
                Task::none()
            }
            AppMsg::CloseLatestWindow => {
                self.save_config_to_path();
                window::latest().and_then(window::close)
            }
            AppMsg::CloseWindow(id) => {
                self.save_config_to_path();
                window::close(id)
            }
            AppMsg::ShowModal(modal) => {
                self.modal = *modal;
                Task::none()
            }
            AppMsg::HideModal => {
                self.modal = Modal::None;
                Task::none()
            }
            AppMsg::WithHideModal(msg) => {
                self.modal = Modal::None;
                self.update(*msg)
            }
            AppMsg::DismissError => {
                self.errors.pop();
                Task::none()
            }
            AppMsg::ResetRootPath => {
                self.root_path_override = false;
                self.set_root_path(util::default_root_path());
                Task::none()
            }
            AppMsg::LocalizeReady => {
                self.localize_ready = true;
                for card in self.servers.iter_mut() {
                    card.props_mut().localize = Some(server_card_core::i18n::shared(FluentLocalize));
                }
                Task::none()
            }
            AppMsg::AnimationTick => {
                self.anim_frame = self.anim_frame.wrapping_add(1);
                Task::none()
            }
            AppMsg::ConnectionEvent(event) => {
                self.handle_connection_event(event);
                Task::none()
            }
            AppMsg::Card { server_id, msg } => {
                let Some(card) = self.card_mut(&server_id) else {
                    warn!(%server_id, "Message for a server that does not exist");
                    return Task::none();
                };
                let (output, card_task) = card.update(msg);
                let mut tasks = vec![card_task.map(move |msg| AppMsg::Card {
                    server_id: server_id.clone(),
                    msg,
                })];
                if let Some(content) = output.clipboard {
                    tasks.push(self.update(AppMsg::ClipboardCopy(content)));
                }
                for event in output.events {
                    tasks.push(self.handle_card_event(event));
                }
                Task::batch(tasks)
            }
            AppMsg::UpdateAddServerAddress(text) => {
                self.add_server_address = text;
                Task::none()
            }
            AppMsg::AddServer => {
                let address = self.add_server_address.trim().to_string();
                if address.is_empty() {
                    return Task::none();
                }
                self.add_server_address.clear();
                let info = ServerDisplayInfo {
                    server_id: self.next_server_id(),
                    server_name: address.clone(),
                    server_address: address,
                };
                debug!(?info, "Add server");
                self.servers.push(self.new_card(info));
                self.sort_servers();
                self.sync_card_inputs();
                self.save_config_to_path();
                Task::none()
            }
            AppMsg::UpdateRenameText(text) => {
                if let Modal::RenameServer { name, .. } = &mut self.modal {
                    *name = text;
                }
                Task::none()
            }
            AppMsg::RenameServer { server_id, name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Task::none();
                }
                if let Some(card) = self.card_mut(&server_id) {
                    card.props_mut().info.server_name = name.to_string();
                } else {
                    warn!(%server_id, "Attempted to rename server that could not be found");
                }
                self.sort_servers();
                self.save_config_to_path();
                Task::none()
            }
            AppMsg::ForgetServer { server_id } => {
                send_connection_msg(
                    &mut self.connection_sender,
                    ConnectionMsg::Forget {
                        server_id: server_id.clone(),
                    },
                );
                if self.remove_server(&server_id).is_none() {
                    warn!(%server_id, "Attempted to forget server that could not be found");
                }
                self.sync_card_inputs();
                self.save_config_to_path();
                Task::none()
            }
            AppMsg::InterruptConnections => {
                let connected: Vec<String> = self
                    .servers
                    .iter()
                    .filter(|card| card.props().state == ConnectionState::Connected)
                    .map(|card| card.server_id().to_string())
                    .collect();
                for server_id in connected {
                    send_connection_msg(
                        &mut self.connection_sender,
                        ConnectionMsg::Interrupt { server_id },
                    );
                }
                Task::none()
            }
        }
    }

    /// Reacts to a user intent raised by a server card.
    fn handle_card_event(&mut self, event: ServerCardEvent) -> Task<AppMsg> {
        debug!(name = event.name(), server_id = event.server_id(), "Server card event");
        match event {
            ServerCardEvent::ConnectPressed(payload) => {
                let Some(card) = self.card_mut(&payload.server_id) else {
                    return Task::none();
                };
                card.props_mut().flags.error_message.clear();
                let address = card.props().info.server_address.clone();
                send_connection_msg(
                    &mut self.connection_sender,
                    ConnectionMsg::Connect {
                        server_id: payload.server_id,
                        address,
                    },
                );
            }
            ServerCardEvent::DisconnectPressed(payload) => {
                send_connection_msg(
                    &mut self.connection_sender,
                    ConnectionMsg::Disconnect {
                        server_id: payload.server_id,
                    },
                );
            }
            ServerCardEvent::ForgetPressed(payload) => {
                let name = self
                    .card(&payload.server_id)
                    .map(|card| card.props().info.server_name.clone())
                    .unwrap_or_default();
                self.modal = Modal::Confirmation {
                    msg: fl!("server-forget-confirmation-msg", name = name),
                    confirm: AppMsg::ForgetServer {
                        server_id: payload.server_id,
                    },
                };
            }
            ServerCardEvent::ShowServerRename(payload) => {
                self.modal = Modal::RenameServer {
                    server_id: payload.server_id,
                    name: payload.server_name,
                };
            }
        }
        Task::none()
    }

    /// Pushes states reported by the connection subscription into the cards.
    fn handle_connection_event(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::ReceiveReady(sender) => {
                self.connection_sender = Some(sender);
            }
            ConnectionEvent::StateChanged { server_id, state } => {
                if let Some(card) = self.card_mut(&server_id) {
                    card.props_mut().state = state;
                } else {
                    warn!(%server_id, %state, "State change for a server that does not exist");
                }
                self.sync_card_inputs();
            }
            ConnectionEvent::Failed { server_id, error } => {
                warn!(%server_id, %error, "Connecting server failed");
                if let Some(card) = self.card_mut(&server_id) {
                    let props = card.props_mut();
                    props.state = ConnectionState::Disconnected;
                    props.flags.error_message = error;
                }
                self.sync_card_inputs();
            }
        }
    }

    /// Recomputes the inputs of all cards that depend on the app state as a whole.
    ///
    /// - A single server is shown expanded.
    /// - While tunnels are being set up or torn down, the connect controls of all cards
    ///   in a stable state are disabled. Cards in a transitional state stay enabled.
    pub(crate) fn sync_card_inputs(&mut self) {
        let expanded = self.servers.len() == 1;
        let any_busy = self.is_animating();
        for card in self.servers.iter_mut() {
            let props = card.props_mut();
            props.flags.expanded = expanded;
            props.flags.disabled = any_busy && !props.state.is_transitional();
            props.root_path = self.root_path.clone();
        }
    }

    /// Changes the root directory of the visualization assets and rescans it.
    fn set_root_path(&mut self, root_path: PathBuf) {
        self.viz_assets = VizAssets::scan(&root_path);
        self.root_path = root_path;
        self.sync_card_inputs();
    }

    /// Creates a card for the server with the current app wide inputs.
    fn new_card(&self, info: ServerDisplayInfo) -> ServerCardView {
        let mut props = ServerCardProps::new(info).with_root_path(self.root_path.clone());
        if self.localize_ready {
            props = props.with_localize(FluentLocalize);
        }
        ServerCardView::new(props)
    }

    /// Returns an id that is not used by any server yet.
    fn next_server_id(&self) -> String {
        let next = self
            .servers
            .iter()
            .filter_map(|card| card.server_id().strip_prefix("server-")?.parse::<u64>().ok())
            .max()
            .map_or(0, |max| max.saturating_add(1));
        format!("server-{next}")
    }

    pub(crate) fn card(&self, server_id: &str) -> Option<&ServerCardView> {
        self.servers
            .iter()
            .find(|card| card.server_id() == server_id)
    }

    pub(crate) fn card_mut(&mut self, server_id: &str) -> Option<&mut ServerCardView> {
        self.servers
            .iter_mut()
            .find(|card| card.server_id() == server_id)
    }

    /// Removes the server with the supplied id.
    ///
    /// Returns [Option::Some] if the server was found and removed, [Option::None]
    /// if it was not present (and therefore could not be removed).
    fn remove_server(&mut self, server_id: &str) -> Option<ServerCardView> {
        let i = self
            .servers
            .iter()
            .position(|card| card.server_id() == server_id)?;
        Some(self.servers.remove(i))
    }

    /// Sort the servers into human-expected order for display by the UI.
    fn sort_servers(&mut self) {
        self.servers.sort_by(|first, second| {
            numeric_sort::cmp(
                &first.props().info.server_name,
                &second.props().info.server_name,
            )
        });
    }

    pub(crate) fn load_config(&mut self, config: Config) {
        if self.language != config.language {
            match i18n::change_language(config.language.into()) {
                Ok(_) => self.language = config.language,
                Err(error) => error!(?error, "Change to configured language"),
            }
        }
        self.optimize_touch = config.optimize_touch;
        if !self.root_path_override && self.root_path != config.root_path {
            self.set_root_path(config.root_path);
        }
        self.servers = config
            .servers
            .into_iter()
            .map(|info| self.new_card(info))
            .collect();
        self.sort_servers();
        self.sync_card_inputs();
    }

    pub(crate) fn extract_config(&self) -> Config {
        Config {
            language: self.language,
            optimize_touch: self.optimize_touch,
            root_path: if self.root_path_override {
                util::default_root_path()
            } else {
                self.root_path.clone()
            },
            servers: self
                .servers
                .iter()
                .map(|card| card.props().info.clone())
                .collect(),
        }
    }

    /// Saves the current application configuration to the FS.
    ///
    /// If it fails, an error is reported in the UI and as event.
    pub(crate) fn save_config_to_path(&mut self) {
        let config = self.extract_config();
        if let Err(error) = config.save_to_path(&self.config_path) {
            error!(?error, "Saving configuration to file");
            self.errors.push(ErrorReport {
                criticality: ErrorCriticality::Critical,
                short: fl!("error-app-config-save"),
                detailed: format!("{error:?}"),
            });
        }
    }
}

/// Set the clipboard.
///
/// Set the system clipboard text if `internal_clipboard` is set to false,
/// or `clipboard` if set true.
fn set_clipboard_text(
    clipboard: &mut Option<Clipboard>,
    internal_clipboard: bool,
    internal_clipboard_buf: &mut String,
    text: String,
) -> anyhow::Result<()> {
    debug!("Set clipboard text");
    if let Some(clipboard) = clipboard {
        clipboard.set_text(text).context("Set clipboard text")
    } else if internal_clipboard {
        *internal_clipboard_buf = text;
        Ok(())
    } else {
        Ok(())
    }
}

/// Send a message to the connection subscription.
fn send_connection_msg(connection_sender: &mut Option<ConnectionSender>, msg: ConnectionMsg) {
    let Some(sender) = connection_sender else {
        warn!("Connection not yet ready.");
        return;
    };
    sender.send(msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::futures::channel::mpsc;
    use server_card_core::MenuItem;

    fn test_app(name: &str) -> App {
        let config_path = std::env::temp_dir().join(format!(
            "server-card-app-{}-{name}.json",
            std::process::id()
        ));
        let mut app = App::new(Some(PathBuf::from("/tmp/assets")), false, true, config_path);
        app.load_config(Config {
            servers: vec![
                ServerDisplayInfo {
                    server_id: "server-0".to_string(),
                    server_name: "Office".to_string(),
                    server_address: "office.example.org:443".to_string(),
                },
                ServerDisplayInfo {
                    server_id: "server-1".to_string(),
                    server_name: "Home".to_string(),
                    server_address: "home.example.org:8388".to_string(),
                },
            ],
            ..Default::default()
        });
        app
    }

    fn connect_channel(app: &mut App) -> mpsc::Receiver<ConnectionMsg> {
        let (sender, receiver) = mpsc::channel(16);
        app.connection_sender = Some(ConnectionSender::new(sender));
        receiver
    }

    fn card_msg(server_id: &str, msg: ServerCardMsg) -> AppMsg {
        AppMsg::Card {
            server_id: server_id.to_string(),
            msg,
        }
    }

    fn state_changed(server_id: &str, state: ConnectionState) -> AppMsg {
        AppMsg::ConnectionEvent(ConnectionEvent::StateChanged {
            server_id: server_id.to_string(),
            state,
        })
    }

    #[test]
    fn servers_are_sorted_and_collapsed() {
        let app = test_app("sorted");
        let names: Vec<_> = app
            .servers
            .iter()
            .map(|card| card.props().info.server_name.as_str())
            .collect();
        assert_eq!(names, ["Home", "Office"]);
        assert!(app.servers.iter().all(|card| !card.props().flags.expanded));
        assert!(app
            .servers
            .iter()
            .all(|card| card.props().root_path == PathBuf::from("/tmp/assets")));
    }

    #[test]
    fn localize_arrives_after_startup() {
        let mut app = test_app("localize");
        assert!(app.servers[0].card().derive().status_message.is_empty());
        let _ = app.update(AppMsg::LocalizeReady);
        let derived = app.servers[0].card().derive();
        assert!(!derived.status_message.is_empty());
        assert!(!derived.connect_button_label.is_empty());
    }

    #[test]
    fn connect_pressed_is_forwarded_to_the_connection() {
        let mut app = test_app("connect");
        let mut receiver = connect_channel(&mut app);
        let _ = app.update(card_msg("server-1", ServerCardMsg::ToggleConnect));
        match receiver.try_next() {
            Ok(Some(ConnectionMsg::Connect { server_id, address })) => {
                assert_eq!(server_id, "server-1");
                assert_eq!(address, "home.example.org:8388");
            }
            other => panic!("unexpected connection message {other:?}"),
        }
        // The card waits for the owner to push the new state.
        assert_eq!(
            app.card("server-1").unwrap().props().state,
            ConnectionState::Disconnected
        );
    }

    #[test]
    fn transitional_state_disables_other_cards() {
        let mut app = test_app("busy");
        let _ = app.update(state_changed("server-0", ConnectionState::Connecting));
        assert!(app.is_animating());
        assert!(!app.card("server-0").unwrap().props().flags.disabled);
        assert!(app.card("server-1").unwrap().props().flags.disabled);

        let _ = app.update(state_changed("server-0", ConnectionState::Connected));
        assert!(!app.is_animating());
        assert!(app.servers.iter().all(|card| !card.props().flags.disabled));
    }

    #[test]
    fn reconnecting_cards_can_all_be_disconnected() {
        let mut app = test_app("reconnecting");
        let mut receiver = connect_channel(&mut app);
        let _ = app.update(state_changed("server-0", ConnectionState::Reconnecting));
        let _ = app.update(state_changed("server-1", ConnectionState::Reconnecting));
        assert!(app.servers.iter().all(|card| !card.props().flags.disabled));

        for server_id in ["server-0", "server-1"] {
            let _ = app.update(card_msg(server_id, ServerCardMsg::ToggleConnect));
            match receiver.try_next() {
                Ok(Some(ConnectionMsg::Disconnect { server_id: sent })) => {
                    assert_eq!(sent, server_id)
                }
                other => panic!("unexpected connection message {other:?}"),
            }
        }
    }

    #[test]
    fn failed_connect_shows_error_on_the_card() {
        let mut app = test_app("failed");
        let _ = app.update(AppMsg::ConnectionEvent(ConnectionEvent::Failed {
            server_id: "server-0".to_string(),
            error: "Invalid server address".to_string(),
        }));
        let props = app.card("server-0").unwrap().props();
        assert_eq!(props.state, ConnectionState::Disconnected);
        assert_eq!(props.flags.error_message, "Invalid server address");
    }

    #[test]
    fn rename_flow() {
        let mut app = test_app("rename");
        let task = app.update(card_msg(
            "server-0",
            ServerCardMsg::MenuItemPressed(MenuItem::Rename),
        ));
        // Clearing the menu selection is scheduled for the next turn.
        assert_eq!(task.units(), 1);
        assert!(matches!(
            &app.modal,
            Modal::RenameServer { server_id, name } if server_id == "server-0" && name == "Office"
        ));
        let _ = app.update(AppMsg::UpdateRenameText("Zurich office".to_string()));
        let Modal::RenameServer { server_id, name } = app.modal.clone() else {
            panic!("rename modal closed");
        };
        let _ = app.update(AppMsg::RenameServer { server_id, name }.hide_modal());
        assert!(matches!(app.modal, Modal::None));
        assert_eq!(
            app.card("server-0").unwrap().props().info.server_name,
            "Zurich office"
        );
        let _ = std::fs::remove_file(&app.config_path);
    }

    #[test]
    fn forget_flow_requires_confirmation() {
        let mut app = test_app("forget");
        let _ = app.update(card_msg(
            "server-1",
            ServerCardMsg::MenuItemPressed(MenuItem::Forget),
        ));
        let Modal::Confirmation { confirm, .. } = app.modal.clone() else {
            panic!("expected confirmation modal");
        };
        assert_eq!(app.servers.len(), 2);
        let _ = app.update(confirm.hide_modal());
        assert!(app.card("server-1").is_none());
        // A single remaining server is shown expanded.
        assert!(app.servers[0].props().flags.expanded);
        let _ = std::fs::remove_file(&app.config_path);
    }

    #[test]
    fn added_servers_get_fresh_ids() {
        let mut app = test_app("add");
        let _ = app.update(AppMsg::UpdateAddServerAddress(" 10.0.0.5:443 ".to_string()));
        let _ = app.update(AppMsg::AddServer);
        let card = app.card("server-2").unwrap();
        assert_eq!(card.props().info.server_address, "10.0.0.5:443");
        assert!(app.add_server_address.is_empty());
        let _ = std::fs::remove_file(&app.config_path);
    }

    #[test]
    fn internal_clipboard_receives_copied_address() {
        let mut app = test_app("clipboard");
        let _ = app.update(card_msg("server-0", ServerCardMsg::CopyAddress));
        assert_eq!(app.internal_clipboard_buf, "office.example.org:443");
    }
}
