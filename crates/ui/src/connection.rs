// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::i18n::fl;
use anyhow::Context;
use core::time::Duration;
use iced::futures::channel::mpsc;
use iced::futures::{self, SinkExt, StreamExt};
use iced::stream;
use server_card_core::types::ConnectionState;
use std::collections::HashMap;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument, warn};

/// Channel size for connection messages.
const CHANNEL_SIZE: usize = 100;
/// How long setting up a tunnel takes.
const CONNECT_DELAY: Duration = Duration::from_millis(1500);
/// How long tearing down a tunnel takes.
const DISCONNECT_DELAY: Duration = Duration::from_millis(800);
/// How long re-establishing an interrupted tunnel takes.
const RECONNECT_DELAY: Duration = Duration::from_millis(2500);

/// A connection message emitted by the UI and received by the connection subscription.
#[derive(Debug, Clone)]
pub(crate) enum ConnectionMsg {
    Connect { server_id: String, address: String },
    Disconnect { server_id: String },
    /// Simulates a network interruption of an established tunnel.
    Interrupt { server_id: String },
    /// The server was forgotten, drop its tunnel without reporting back.
    Forget { server_id: String },
}

/// A connection event that is produced by the connection and sent to the UI through iced's message passing.
#[derive(Debug, Clone)]
pub(crate) enum ConnectionEvent {
    ReceiveReady(ConnectionSender),
    StateChanged {
        server_id: String,
        state: ConnectionState,
    },
    /// Setting up the tunnel failed, the server is disconnected again.
    Failed { server_id: String, error: String },
}

/// The sender that gets used by the UI to send connection messages to the connection subscription.
#[derive(Debug, Clone)]
pub(crate) struct ConnectionSender(mpsc::Sender<ConnectionMsg>);

impl ConnectionSender {
    #[cfg(test)]
    pub(crate) fn new(sender: mpsc::Sender<ConnectionMsg>) -> Self {
        Self(sender)
    }

    pub(crate) fn send(&mut self, msg: ConnectionMsg) {
        if let Err(error) = self.0.try_send(msg) {
            error!(?error, "Send connection message");
        }
    }
}

/// Start/create the connection subscription.
///
/// Once the connection is ready to receive messages the connection event [ConnectionEvent::ReceiveReady] is emitted.
/// Every server has at most one tunnel operation in flight, a new message for a server aborts the previous one.
pub(crate) fn kickoff() -> impl futures::Stream<Item = ConnectionEvent> {
    stream::channel(CHANNEL_SIZE, |mut output| async move {
        let (sender, mut receiver) = mpsc::channel(CHANNEL_SIZE);
        output_send(
            &mut output,
            ConnectionEvent::ReceiveReady(ConnectionSender(sender)),
        )
        .await;
        let mut operations: HashMap<String, JoinHandle<()>> = HashMap::new();

        while let Some(msg) = receiver.next().await {
            debug!(?msg, "Received connection message");
            let (server_id, operation) = match msg {
                ConnectionMsg::Connect { server_id, address } => {
                    let op = connect(server_id.clone(), address, output.clone());
                    (server_id, Some(tokio::spawn(op)))
                }
                ConnectionMsg::Disconnect { server_id } => {
                    let op = disconnect(server_id.clone(), output.clone());
                    (server_id, Some(tokio::spawn(op)))
                }
                ConnectionMsg::Interrupt { server_id } => {
                    let op = reconnect(server_id.clone(), output.clone());
                    (server_id, Some(tokio::spawn(op)))
                }
                ConnectionMsg::Forget { server_id } => (server_id, None),
            };
            let previous = match operation {
                Some(operation) => operations.insert(server_id, operation),
                None => operations.remove(&server_id),
            };
            if let Some(previous) = previous {
                previous.abort();
            }
            operations.retain(|_, op| !op.is_finished());
        }
        warn!("Connection message channel closed");
    })
}

/// Sets up the tunnel to the server with the supplied address (host and port, delimited by `:` character).
#[instrument(skip(output))]
async fn connect(server_id: String, address: String, mut output: mpsc::Sender<ConnectionEvent>) {
    output_send(
        &mut output,
        ConnectionEvent::StateChanged {
            server_id: server_id.clone(),
            state: ConnectionState::Connecting,
        },
    )
    .await;
    if let Err(error) = parse_address(&address) {
        warn!(?error, "Connecting failed");
        output_send(
            &mut output,
            ConnectionEvent::Failed {
                server_id,
                error: fl!("tunnel-invalid-address", address = address),
            },
        )
        .await;
        return;
    }
    tokio::time::sleep(CONNECT_DELAY).await;
    output_send(
        &mut output,
        ConnectionEvent::StateChanged {
            server_id,
            state: ConnectionState::Connected,
        },
    )
    .await;
}

#[instrument(skip(output))]
async fn disconnect(server_id: String, mut output: mpsc::Sender<ConnectionEvent>) {
    transition(
        &mut output,
        server_id,
        ConnectionState::Disconnecting,
        DISCONNECT_DELAY,
        ConnectionState::Disconnected,
    )
    .await;
}

#[instrument(skip(output))]
async fn reconnect(server_id: String, mut output: mpsc::Sender<ConnectionEvent>) {
    transition(
        &mut output,
        server_id,
        ConnectionState::Reconnecting,
        RECONNECT_DELAY,
        ConnectionState::Connected,
    )
    .await;
}

/// Reports `from`, waits for `delay` and then reports `to`.
async fn transition(
    output: &mut mpsc::Sender<ConnectionEvent>,
    server_id: String,
    from: ConnectionState,
    delay: Duration,
    to: ConnectionState,
) {
    output_send(
        output,
        ConnectionEvent::StateChanged {
            server_id: server_id.clone(),
            state: from,
        },
    )
    .await;
    tokio::time::sleep(delay).await;
    output_send(
        output,
        ConnectionEvent::StateChanged {
            server_id,
            state: to,
        },
    )
    .await;
}

/// Splits a server address into host and port.
pub(crate) fn parse_address(address: &str) -> anyhow::Result<(&str, u16)> {
    let (host, port) = address
        .trim()
        .rsplit_once(':')
        .context("Address is missing the port")?;
    if host.is_empty() {
        anyhow::bail!("Address is missing the host");
    }
    let port: u16 = port.parse().context("Parse port")?;
    if port == 0 {
        anyhow::bail!("Port must not be zero");
    }
    Ok((host, port))
}

/// Sends an event through the connection event channel.
///
/// The sent event will be handled by iced's message passing and appear in the `update` routine of the UI.
async fn output_send(output: &mut mpsc::Sender<ConnectionEvent>, event: ConnectionEvent) {
    if let Err(error) = output.send(event).await {
        error!(?error, "Sending connection event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_port() {
        assert_eq!(
            parse_address("vpn.example.org:443").unwrap(),
            ("vpn.example.org", 443)
        );
        assert_eq!(parse_address(" [::1]:8388 ").unwrap(), ("[::1]", 8388));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for address in ["", "vpn.example.org", ":443", "host:", "host:0", "host:70000"] {
            assert!(parse_address(address).is_err(), "{address}");
        }
    }

    #[tokio::test]
    async fn invalid_address_reports_failure() {
        let (sender, mut receiver) = mpsc::channel(CHANNEL_SIZE);
        connect("srv-1".to_string(), "nope".to_string(), sender).await;
        assert!(matches!(
            receiver.next().await,
            Some(ConnectionEvent::StateChanged {
                state: ConnectionState::Connecting,
                ..
            })
        ));
        assert!(matches!(
            receiver.next().await,
            Some(ConnectionEvent::Failed { server_id, .. }) if server_id == "srv-1"
        ));
    }

    #[tokio::test]
    async fn disconnect_passes_through_disconnecting() {
        let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
        disconnect("srv-1".to_string(), sender).await;
        let states: Vec<_> = receiver
            .filter_map(|event| async move {
                match event {
                    ConnectionEvent::StateChanged { state, .. } => Some(state),
                    _ => None,
                }
            })
            .collect()
            .await;
        assert_eq!(
            states,
            [ConnectionState::Disconnecting, ConnectionState::Disconnected]
        );
    }
}
