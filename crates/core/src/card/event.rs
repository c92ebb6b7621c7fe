// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::mpsc;
use tracing::{debug, error};

/// Payload of events that only refer to a server.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerIdPayload {
    pub server_id: String,
}

/// Payload of the rename request, carrying the current name to prefill the rename dialog.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamePayload {
    pub server_id: String,
    pub server_name: String,
}

/// A user intent raised by the server card, to be handled by its owner.
///
/// The card never acts on these itself.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum ServerCardEvent {
    ConnectPressed(ServerIdPayload),
    DisconnectPressed(ServerIdPayload),
    ForgetPressed(ServerIdPayload),
    ShowServerRename(RenamePayload),
}

impl ServerCardEvent {
    /// The event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnectPressed(_) => "ConnectPressed",
            Self::DisconnectPressed(_) => "DisconnectPressed",
            Self::ForgetPressed(_) => "ForgetPressed",
            Self::ShowServerRename(_) => "ShowServerRename",
        }
    }

    /// The identity of the server the event refers to.
    pub fn server_id(&self) -> &str {
        match self {
            Self::ConnectPressed(p) | Self::DisconnectPressed(p) | Self::ForgetPressed(p) => {
                &p.server_id
            }
            Self::ShowServerRename(p) => &p.server_id,
        }
    }

    /// The event payload as a json object.
    pub fn payload_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::ConnectPressed(p) | Self::DisconnectPressed(p) | Self::ForgetPressed(p) => {
                serde_json::to_value(p)
            }
            Self::ShowServerRename(p) => serde_json::to_value(p),
        }
    }
}

/// Receives the events emitted by a server card.
pub trait EventSink {
    fn emit(&mut self, event: ServerCardEvent);
}

impl EventSink for Vec<ServerCardEvent> {
    fn emit(&mut self, event: ServerCardEvent) {
        debug!(?event, "Server card event");
        self.push(event);
    }
}

impl EventSink for mpsc::Sender<ServerCardEvent> {
    fn emit(&mut self, event: ServerCardEvent) {
        debug!(?event, "Server card event");
        if let Err(error) = self.send(event) {
            error!(?error, "Send server card event");
        }
    }
}

type Handler = Box<dyn FnMut(&ServerCardEvent) + Send>;

/// A list of callbacks that are all invoked for every emitted event, in registration order.
#[derive(Default)]
pub struct EventHandlers {
    handlers: Vec<Handler>,
}

impl std::fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandlers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler.
    pub fn subscribe(&mut self, handler: impl FnMut(&ServerCardEvent) + Send + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Builder variant of [EventHandlers::subscribe].
    pub fn with(mut self, handler: impl FnMut(&ServerCardEvent) + Send + 'static) -> Self {
        self.subscribe(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl EventSink for EventHandlers {
    fn emit(&mut self, event: ServerCardEvent) {
        debug!(?event, handlers = self.handlers.len(), "Server card event");
        for handler in self.handlers.iter_mut() {
            handler(&event);
        }
    }
}
