// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("Unknown connection state '{value}'")]
    UnknownConnectionState { value: String },
    #[error("Unknown menu item '{value}'")]
    UnknownMenuItem { value: String },
}
