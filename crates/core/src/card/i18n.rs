// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use core::fmt::Display;
use std::sync::Arc;

/// The closed set of translatable phrases the server card displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    DisconnectedServerState,
    ConnectingServerState,
    ConnectedServerState,
    DisconnectingServerState,
    ReconnectingServerState,
    ConnectButtonLabel,
    DisconnectButtonLabel,
    ServerRename,
    ServerForget,
}

impl MessageKey {
    pub const ALL: [Self; 9] = [
        Self::DisconnectedServerState,
        Self::ConnectingServerState,
        Self::ConnectedServerState,
        Self::DisconnectingServerState,
        Self::ReconnectingServerState,
        Self::ConnectButtonLabel,
        Self::DisconnectButtonLabel,
        Self::ServerRename,
        Self::ServerForget,
    ];

    /// The message id used in the translation resources.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DisconnectedServerState => "disconnected-server-state",
            Self::ConnectingServerState => "connecting-server-state",
            Self::ConnectedServerState => "connected-server-state",
            Self::DisconnectingServerState => "disconnecting-server-state",
            Self::ReconnectingServerState => "reconnecting-server-state",
            Self::ConnectButtonLabel => "connect-button-label",
            Self::DisconnectButtonLabel => "disconnect-button-label",
            Self::ServerRename => "server-rename",
            Self::ServerForget => "server-forget",
        }
    }
}

impl Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolves message keys to display text.
///
/// Called on every render, so implementations should be cheap.
pub trait Localize {
    fn localize(&self, key: MessageKey) -> String;
}

impl<F> Localize for F
where
    F: Fn(MessageKey) -> String,
{
    fn localize(&self, key: MessageKey) -> String {
        self(key)
    }
}

/// A localize function that can be handed to multiple cards.
pub type SharedLocalize = Arc<dyn Localize + Send + Sync>;

/// Wraps a localize function for sharing.
pub fn shared(localize: impl Localize + Send + Sync + 'static) -> SharedLocalize {
    Arc::new(localize)
}

/// Localizes by returning the message id itself.
///
/// Useful for tests and for inspecting which phrase a card would display.
pub fn echo_localize(key: MessageKey) -> String {
    key.as_str().to_string()
}

/// Localizes the key, or returns an empty string while no localize function is available yet.
pub(crate) fn localize_or_empty(localize: Option<&dyn Localize>, key: MessageKey) -> String {
    localize.map(|l| l.localize(key)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn message_ids_are_unique() {
        let ids: HashSet<_> = MessageKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(ids.len(), MessageKey::ALL.len());
    }

    #[test]
    fn closures_localize() {
        let upper = |key: MessageKey| key.as_str().to_uppercase();
        assert_eq!(upper.localize(MessageKey::ServerForget), "SERVER-FORGET");
    }

    #[test]
    fn missing_localize_resolves_to_empty() {
        assert_eq!(localize_or_empty(None, MessageKey::ConnectButtonLabel), "");
        let echo: &dyn Localize = &echo_localize;
        assert_eq!(
            localize_or_empty(Some(echo), MessageKey::ConnectButtonLabel),
            "connect-button-label"
        );
    }
}
