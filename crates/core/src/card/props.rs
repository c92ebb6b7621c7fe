// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use super::i18n::{self, localize_or_empty, Localize, MessageKey, SharedLocalize};
use super::types::ConnectionState;
use super::MenuItem;
use std::path::PathBuf;

/// What the card shows about the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDisplayInfo {
    /// Correlation key sent with every emitted event.
    pub server_id: String,
    pub server_name: String,
    pub server_address: String,
}

/// Presentation flags set by the owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiFlags {
    /// Shows the large visualization and the status message instead of the header icon.
    pub expanded: bool,
    /// Makes the connect action unavailable regardless of the state.
    pub disabled: bool,
    /// Displayed verbatim in the action bar.
    pub error_message: String,
}

/// All inputs of a server card.
///
/// Written by the owner on every re-render, read-only for the card.
#[derive(Clone, Default)]
pub struct ServerCardProps {
    pub state: ConnectionState,
    pub info: ServerDisplayInfo,
    pub flags: UiFlags,
    /// Forwarded unchanged to the connection visualization for asset lookup.
    pub root_path: PathBuf,
    /// May arrive after the card was created.
    pub localize: Option<SharedLocalize>,
}

impl std::fmt::Debug for ServerCardProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerCardProps")
            .field("state", &self.state)
            .field("info", &self.info)
            .field("flags", &self.flags)
            .field("root_path", &self.root_path)
            .field(
                "localize",
                &self.localize.as_ref().map(|_| ".. no debug impl .."),
            )
            .finish()
    }
}

impl ServerCardProps {
    pub fn new(info: ServerDisplayInfo) -> Self {
        Self {
            info,
            ..Default::default()
        }
    }

    pub fn with_state(mut self, state: ConnectionState) -> Self {
        self.state = state;
        self
    }

    pub fn with_flags(mut self, flags: UiFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_root_path(mut self, root_path: impl Into<PathBuf>) -> Self {
        self.root_path = root_path.into();
        self
    }

    pub fn with_localize(mut self, localize: impl Localize + Send + Sync + 'static) -> Self {
        self.localize = Some(i18n::shared(localize));
        self
    }

    /// The localize function, if already supplied.
    pub fn localize(&self) -> Option<&dyn Localize> {
        self.localize.as_deref().map(|l| l as &dyn Localize)
    }

    /// Computes all derived values from the current inputs.
    ///
    /// Nothing is cached, every call reflects the inputs as they are now.
    pub fn derive(&self) -> DerivedView {
        let localize = self.localize();
        DerivedView {
            status_message: status_message(self.state, localize),
            status_message_class: status_message_class(self.state),
            connect_button_label: connect_button_label(self.state, localize),
            connect_button_disabled: connect_button_disabled(self.state, self.flags.disabled),
            card_css_class: card_css_class(self.flags.expanded).to_string(),
            rename_label: menu_item_label(MenuItem::Rename, localize),
            forget_label: menu_item_label(MenuItem::Forget, localize),
        }
    }
}

/// Values the card displays that are computed from its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    pub status_message: String,
    pub status_message_class: String,
    pub connect_button_label: String,
    pub connect_button_disabled: bool,
    pub card_css_class: String,
    pub rename_label: String,
    pub forget_label: String,
}

/// The localized phrase describing the state.
///
/// Empty while no localize function is available.
pub fn status_message(state: ConnectionState, localize: Option<&dyn Localize>) -> String {
    let key = match state {
        ConnectionState::Disconnected => MessageKey::DisconnectedServerState,
        ConnectionState::Connecting => MessageKey::ConnectingServerState,
        ConnectionState::Connected => MessageKey::ConnectedServerState,
        ConnectionState::Disconnecting => MessageKey::DisconnectingServerState,
        ConnectionState::Reconnecting => MessageKey::ReconnectingServerState,
    };
    localize_or_empty(localize, key)
}

/// The localized label of the connect button, naming the action a tap would request.
///
/// Empty while no localize function is available.
pub fn connect_button_label(state: ConnectionState, localize: Option<&dyn Localize>) -> String {
    let key = match state {
        ConnectionState::Disconnected | ConnectionState::Disconnecting => {
            MessageKey::ConnectButtonLabel
        }
        ConnectionState::Connecting
        | ConnectionState::Connected
        | ConnectionState::Reconnecting => MessageKey::DisconnectButtonLabel,
    };
    localize_or_empty(localize, key)
}

/// The connect controls are unavailable while the tunnel is being set up or torn down.
pub fn connect_button_disabled(state: ConnectionState, disabled: bool) -> bool {
    disabled || matches!(
        state,
        ConnectionState::Connecting | ConnectionState::Disconnecting
    )
}

/// Style class selecting the expanded or collapsed card layout.
pub fn card_css_class(expanded: bool) -> &'static str {
    if expanded {
        "expanded"
    } else {
        ""
    }
}

/// Style classes of the status line, allowing per-state styling.
pub fn status_message_class(state: ConnectionState) -> String {
    format!("status-message {state}")
}

/// The localized label of an overflow menu item.
pub fn menu_item_label(item: MenuItem, localize: Option<&dyn Localize>) -> String {
    localize_or_empty(localize, item.label_key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::i18n::echo_localize;

    const ECHO: Option<&dyn Localize> = Some(&echo_localize as &dyn Localize);

    #[test]
    fn status_message_table() {
        let expected = [
            (ConnectionState::Disconnected, "disconnected-server-state"),
            (ConnectionState::Connecting, "connecting-server-state"),
            (ConnectionState::Connected, "connected-server-state"),
            (ConnectionState::Disconnecting, "disconnecting-server-state"),
            (ConnectionState::Reconnecting, "reconnecting-server-state"),
        ];
        for (state, message) in expected {
            assert_eq!(status_message(state, ECHO), message, "{state}");
        }
    }

    #[test]
    fn connect_button_label_table() {
        let expected = [
            (ConnectionState::Disconnected, "connect-button-label"),
            (ConnectionState::Connecting, "disconnect-button-label"),
            (ConnectionState::Connected, "disconnect-button-label"),
            (ConnectionState::Disconnecting, "connect-button-label"),
            (ConnectionState::Reconnecting, "disconnect-button-label"),
        ];
        for (state, label) in expected {
            assert_eq!(connect_button_label(state, ECHO), label, "{state}");
        }
    }

    #[test]
    fn unknown_states_use_disconnected_entries() {
        for raw in ["", "UNPLUGGED", "connected", "Connecting "] {
            let state = ConnectionState::from_str_lossy(raw);
            assert_eq!(status_message(state, ECHO), "disconnected-server-state");
            assert_eq!(connect_button_label(state, ECHO), "connect-button-label");
        }
    }

    #[test]
    fn labels_are_empty_without_localize() {
        for state in ConnectionState::ALL {
            assert_eq!(status_message(state, None), "");
            assert_eq!(connect_button_label(state, None), "");
        }
        assert_eq!(menu_item_label(MenuItem::Rename, None), "");
    }

    #[test]
    fn connect_button_disabled_truth_table() {
        for state in ConnectionState::ALL {
            let busy = matches!(
                state,
                ConnectionState::Connecting | ConnectionState::Disconnecting
            );
            assert!(connect_button_disabled(state, true), "{state}");
            assert_eq!(connect_button_disabled(state, false), busy, "{state}");
        }
    }

    #[test]
    fn css_classes() {
        assert_eq!(card_css_class(true), "expanded");
        assert_eq!(card_css_class(false), "");
        assert_eq!(
            status_message_class(ConnectionState::Reconnecting),
            "status-message RECONNECTING"
        );
    }

    #[test]
    fn derive_recomputes_once_localize_arrives() {
        let mut props = ServerCardProps::new(ServerDisplayInfo {
            server_id: "srv-1".to_string(),
            server_name: "Home".to_string(),
            server_address: "10.0.0.1:443".to_string(),
        })
        .with_state(ConnectionState::Connected);

        let before = props.derive();
        assert_eq!(before.status_message, "");
        assert_eq!(before.connect_button_label, "");
        assert!(!before.connect_button_disabled);

        props.localize = Some(i18n::shared(echo_localize));
        let after = props.derive();
        assert_eq!(after.status_message, "connected-server-state");
        assert_eq!(after.connect_button_label, "disconnect-button-label");
        assert_eq!(after.rename_label, "server-rename");
        assert_eq!(after.forget_label, "server-forget");
    }

    #[test]
    fn defaults() {
        let props = ServerCardProps::default();
        assert_eq!(props.state, ConnectionState::Disconnected);
        assert!(!props.flags.expanded);
        assert!(!props.flags.disabled);
        assert!(props.localize().is_none());
        assert_eq!(props.derive().card_css_class, "");
    }
}
