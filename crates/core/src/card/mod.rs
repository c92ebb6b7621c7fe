// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod error;
pub mod event;
pub mod i18n;
pub mod props;
pub mod types;

use core::fmt::Display;
use core::str::FromStr;
use error::CardError;
use event::{EventSink, RenamePayload, ServerCardEvent, ServerIdPayload};
use i18n::{Localize, MessageKey};
use props::{DerivedView, ServerCardProps};
use tracing::debug;
use types::ConnectionState;

/// Entries of the card overflow menu.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    clap::ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MenuItem {
    Rename,
    Forget,
}

impl MenuItem {
    /// Menu entries in display order.
    pub const ALL: [Self; 2] = [Self::Rename, Self::Forget];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rename => "rename",
            Self::Forget => "forget",
        }
    }

    pub fn label_key(self) -> MessageKey {
        match self {
            Self::Rename => MessageKey::ServerRename,
            Self::Forget => MessageKey::ServerForget,
        }
    }
}

impl Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MenuItem {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|item| item.as_str() == s)
            .ok_or_else(|| CardError::UnknownMenuItem {
                value: s.to_string(),
            })
    }
}

/// What tapping a connect control requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ConnectIntent {
    Connect,
    Disconnect,
}

impl ConnectIntent {
    /// Only a disconnected tunnel is connected, every other state is asked to disconnect.
    pub fn for_state(state: ConnectionState) -> Self {
        if state == ConnectionState::Disconnected {
            Self::Connect
        } else {
            Self::Disconnect
        }
    }
}

/// Proof that a menu selection highlight is pending and must be cleared.
///
/// Hand it back through [ServerCard::clear_menu_selection] after the current interaction
/// has been handled, e.g. on the next UI event loop turn.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the menu selection must be cleared after the interaction was handled"]
pub struct DeselectTicket {
    item: MenuItem,
}

impl DeselectTicket {
    /// The item that was selected.
    pub fn item(&self) -> MenuItem {
        self.item
    }
}

/// A server card, independent of any UI toolkit.
///
/// Holds the inputs pushed by the owner and the transient menu selection.
/// User interactions are turned into [ServerCardEvent]s, the displayed state is never changed
/// by the card itself.
#[derive(Debug, Clone, Default)]
pub struct ServerCard {
    props: ServerCardProps,
    menu_selection: Option<MenuItem>,
}

impl ServerCard {
    pub fn new(props: ServerCardProps) -> Self {
        Self {
            props,
            menu_selection: None,
        }
    }

    pub fn props(&self) -> &ServerCardProps {
        &self.props
    }

    /// Mutable access for the owner to update inputs in place.
    pub fn props_mut(&mut self) -> &mut ServerCardProps {
        &mut self.props
    }

    pub fn set_props(&mut self, props: ServerCardProps) {
        self.props = props;
    }

    pub fn state(&self) -> ConnectionState {
        self.props.state
    }

    pub fn set_state(&mut self, state: ConnectionState) {
        self.props.state = state;
    }

    pub fn set_localize(&mut self, localize: impl Localize + Send + Sync + 'static) {
        self.props.localize = Some(i18n::shared(localize));
    }

    /// The derived display values for the current inputs.
    pub fn derive(&self) -> DerivedView {
        self.props.derive()
    }

    pub fn connect_intent(&self) -> ConnectIntent {
        ConnectIntent::for_state(self.props.state)
    }

    /// The currently highlighted menu entry, if any.
    pub fn menu_selection(&self) -> Option<MenuItem> {
        self.menu_selection
    }

    /// Requests connecting or disconnecting depending on the current state.
    ///
    /// Emits exactly one event, unless the connect controls are disabled,
    /// in which case nothing is emitted and `None` is returned.
    pub fn toggle_connect(&self, sink: &mut impl EventSink) -> Option<ConnectIntent> {
        if props::connect_button_disabled(self.props.state, self.props.flags.disabled) {
            debug!(
                server_id = %self.props.info.server_id,
                state = %self.props.state,
                "Ignoring connect toggle, connect controls are disabled"
            );
            return None;
        }
        let intent = self.connect_intent();
        let payload = ServerIdPayload {
            server_id: self.props.info.server_id.clone(),
        };
        sink.emit(match intent {
            ConnectIntent::Connect => ServerCardEvent::ConnectPressed(payload),
            ConnectIntent::Disconnect => ServerCardEvent::DisconnectPressed(payload),
        });
        Some(intent)
    }

    /// Handles the selection of an overflow menu entry.
    ///
    /// Emits exactly one event and highlights the entry until the returned ticket is handed back.
    pub fn select_menu_item(&mut self, item: MenuItem, sink: &mut impl EventSink) -> DeselectTicket {
        self.menu_selection = Some(item);
        let server_id = self.props.info.server_id.clone();
        sink.emit(match item {
            MenuItem::Forget => ServerCardEvent::ForgetPressed(ServerIdPayload { server_id }),
            MenuItem::Rename => ServerCardEvent::ShowServerRename(RenamePayload {
                server_id,
                server_name: self.props.info.server_name.clone(),
            }),
        });
        DeselectTicket { item }
    }

    /// Clears the menu highlight.
    ///
    /// Clearing an already cleared menu does nothing.
    pub fn clear_menu_selection(&mut self, ticket: DeselectTicket) {
        debug!(item = %ticket.item, selected = ?self.menu_selection, "Clear menu selection");
        self.menu_selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event::EventHandlers;
    use i18n::echo_localize;
    use props::{ServerDisplayInfo, UiFlags};
    use std::sync::{Arc, Mutex};

    fn card(state: ConnectionState) -> ServerCard {
        ServerCard::new(
            ServerCardProps::new(ServerDisplayInfo {
                server_id: "srv-42".to_string(),
                server_name: "Office".to_string(),
                server_address: "vpn.example.org:443".to_string(),
            })
            .with_state(state),
        )
    }

    fn id_payload() -> ServerIdPayload {
        ServerIdPayload {
            server_id: "srv-42".to_string(),
        }
    }

    #[test]
    fn toggle_when_disconnected_requests_connect() {
        let card = card(ConnectionState::Disconnected);
        let mut events: Vec<ServerCardEvent> = Vec::new();
        assert_eq!(card.toggle_connect(&mut events), Some(ConnectIntent::Connect));
        assert_eq!(events, [ServerCardEvent::ConnectPressed(id_payload())]);
        assert_eq!(card.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn toggle_when_connected_requests_disconnect() {
        let card = card(ConnectionState::Connected);
        let mut events: Vec<ServerCardEvent> = Vec::new();
        assert_eq!(
            card.toggle_connect(&mut events),
            Some(ConnectIntent::Disconnect)
        );
        assert_eq!(events, [ServerCardEvent::DisconnectPressed(id_payload())]);
        assert_eq!(card.state(), ConnectionState::Connected);
    }

    #[test]
    fn toggle_when_reconnecting_requests_disconnect() {
        let card = card(ConnectionState::Reconnecting);
        let mut events: Vec<ServerCardEvent> = Vec::new();
        card.toggle_connect(&mut events);
        assert_eq!(events, [ServerCardEvent::DisconnectPressed(id_payload())]);
    }

    #[test]
    fn toggle_is_ignored_while_disabled() {
        let mut events: Vec<ServerCardEvent> = Vec::new();
        for state in [ConnectionState::Connecting, ConnectionState::Disconnecting] {
            assert_eq!(card(state).toggle_connect(&mut events), None);
        }
        let mut disabled = card(ConnectionState::Disconnected);
        disabled.props_mut().flags = UiFlags {
            disabled: true,
            ..Default::default()
        };
        assert_eq!(disabled.toggle_connect(&mut events), None);
        assert!(events.is_empty());
    }

    #[test]
    fn forget_emits_once_and_is_cleared() {
        let mut card = card(ConnectionState::Connected);
        let mut events: Vec<ServerCardEvent> = Vec::new();
        let ticket = card.select_menu_item(MenuItem::Forget, &mut events);
        assert_eq!(events, [ServerCardEvent::ForgetPressed(id_payload())]);
        assert_eq!(card.menu_selection(), Some(MenuItem::Forget));
        card.clear_menu_selection(ticket);
        assert_eq!(card.menu_selection(), None);
    }

    #[test]
    fn rename_carries_the_server_name() {
        let mut card = card(ConnectionState::Disconnected);
        let mut events: Vec<ServerCardEvent> = Vec::new();
        let ticket = card.select_menu_item(MenuItem::Rename, &mut events);
        assert_eq!(ticket.item(), MenuItem::Rename);
        assert_eq!(
            events,
            [ServerCardEvent::ShowServerRename(RenamePayload {
                server_id: "srv-42".to_string(),
                server_name: "Office".to_string(),
            })]
        );
        card.clear_menu_selection(ticket);
        assert_eq!(card.menu_selection(), None);
    }

    #[test]
    fn late_ticket_still_clears() {
        let mut card = card(ConnectionState::Disconnected);
        let mut events: Vec<ServerCardEvent> = Vec::new();
        let first = card.select_menu_item(MenuItem::Rename, &mut events);
        let second = card.select_menu_item(MenuItem::Forget, &mut events);
        card.clear_menu_selection(second);
        card.clear_menu_selection(first);
        assert_eq!(card.menu_selection(), None);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn handlers_receive_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_c = Arc::clone(&seen);
        let mut handlers = EventHandlers::new().with(move |e| {
            seen_c
                .lock()
                .unwrap()
                .push((e.name(), e.server_id().to_string()))
        });
        card(ConnectionState::Disconnected).toggle_connect(&mut handlers);
        assert_eq!(
            *seen.lock().unwrap(),
            [("ConnectPressed", "srv-42".to_string())]
        );
    }

    #[test]
    fn localize_can_be_supplied_later() {
        let mut card = card(ConnectionState::Connecting);
        assert_eq!(card.derive().status_message, "");
        card.set_localize(echo_localize);
        let derived = card.derive();
        assert_eq!(derived.status_message, "connecting-server-state");
        assert_eq!(derived.connect_button_label, "disconnect-button-label");
        assert!(derived.connect_button_disabled);
    }

    #[test]
    fn menu_items_parse() {
        assert_eq!("forget".parse::<MenuItem>(), Ok(MenuItem::Forget));
        assert!("delete".parse::<MenuItem>().is_err());
    }
}
