// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

// Modules
pub(crate) mod card;

// Re-Exports
/// Server card error types.
pub use card::error;
/// Events emitted by the server card and the sinks receiving them.
pub use card::event;
/// Localization keys and the localize function abstraction.
pub use card::i18n;
/// Card inputs and the values derived from them.
pub use card::props;
/// Basic card types like the connection state.
pub use card::types;
/// The toolkit independent server card controller.
pub use card::{ConnectIntent, DeselectTicket, MenuItem, ServerCard};
