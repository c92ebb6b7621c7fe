// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use super::error::CardError;
use core::fmt::Display;
use core::str::FromStr;
use tracing::warn;

/// The lifecycle phase of a VPN tunnel as reported by the owning application.
///
/// The card only displays it, transitions are driven from outside.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "String", into = "&'static str")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
    Reconnecting,
}

impl ConnectionState {
    /// All states in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Disconnected,
        Self::Connecting,
        Self::Connected,
        Self::Disconnecting,
        Self::Reconnecting,
    ];

    /// The upper-case name the owning application uses for this state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "DISCONNECTED",
            Self::Connecting => "CONNECTING",
            Self::Connected => "CONNECTED",
            Self::Disconnecting => "DISCONNECTING",
            Self::Reconnecting => "RECONNECTING",
        }
    }

    /// Parses a state for display purposes.
    ///
    /// Unrecognized values (including the empty string) are displayed as [ConnectionState::Disconnected].
    pub fn from_str_lossy(value: &str) -> Self {
        match value.parse() {
            Ok(state) => state,
            Err(error) => {
                warn!(%error, "Falling back to disconnected state for display");
                Self::Disconnected
            }
        }
    }

    /// Whether the tunnel is currently moving between two stable states.
    pub fn is_transitional(self) -> bool {
        matches!(
            self,
            Self::Connecting | Self::Disconnecting | Self::Reconnecting
        )
    }
}

impl Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConnectionState {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| CardError::UnknownConnectionState {
                value: s.to_string(),
            })
    }
}

impl From<String> for ConnectionState {
    fn from(value: String) -> Self {
        Self::from_str_lossy(&value)
    }
}

impl From<ConnectionState> for &'static str {
    fn from(value: ConnectionState) -> Self {
        value.as_str()
    }
}
