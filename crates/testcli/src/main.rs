// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use clap::Parser;
use server_card_core::event::ServerCardEvent;
use server_card_core::i18n::{echo_localize, MessageKey};
use server_card_core::props::{ServerCardProps, ServerDisplayInfo, UiFlags};
use server_card_core::types::ConnectionState;
use server_card_core::{MenuItem, ServerCard};
use std::collections::HashMap;
use std::error::Error;
use tracing::debug;

#[derive(Debug, clap::Parser)]
pub struct Cli {
    #[command(flatten)]
    card: CardArgs,
    #[command(subcommand)]
    cmd: Command,
}

/// The inputs of the card under test.
#[derive(Debug, clap::Args)]
pub struct CardArgs {
    /// Connection state as reported by the owner, e.g. `CONNECTED`.{n}
    /// Unknown values are displayed as `DISCONNECTED`.
    #[arg(short, long, default_value = "DISCONNECTED")]
    state: String,
    #[arg(long, default_value = "server-0")]
    server_id: String,
    #[arg(long, default_value = "")]
    server_name: String,
    #[arg(long, default_value = "")]
    server_address: String,
    #[arg(long, default_value_t = false)]
    expanded: bool,
    #[arg(long, default_value_t = false)]
    disabled: bool,
    #[arg(long, default_value = "")]
    error_message: String,
    /// Simulate a card whose localize function was not supplied yet.
    #[arg(long, default_value_t = false)]
    no_localize: bool,
    /// Override the translation of a message id. Allows repeated argument invokations.{n}
    /// e.g. `-t "connect-button-label=Verbinden"`. Message ids without override are echoed.
    #[arg(short = 't', long = "translation", value_parser = parse_key_val::<String, String>)]
    translations: Vec<(String, String)>,
}

#[derive(Debug, clap::Subcommand)]
#[non_exhaustive]
pub enum Command {
    /// Print the values the card derives from its inputs.
    Derive,
    /// Print the derived values for every known connection state.
    States,
    /// Tap the connect control and print the emitted events.
    Tap,
    /// Select an overflow menu entry and print the emitted events.
    Menu {
        #[arg(short, long, value_enum)]
        item: MenuItem,
    },
}

fn parse_key_val<T, U>(s: &str) -> Result<(T, U), Box<dyn Error + Send + Sync + 'static>>
where
    T: std::str::FromStr,
    T::Err: Error + Send + Sync + 'static,
    U: std::str::FromStr,
    U::Err: Error + Send + Sync + 'static,
{
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{s}`"))?;
    Ok((s[..pos].parse()?, s[pos + 1..].parse()?))
}

impl CardArgs {
    fn into_card(self) -> ServerCard {
        let mut props = ServerCardProps::new(ServerDisplayInfo {
            server_id: self.server_id,
            server_name: self.server_name,
            server_address: self.server_address,
        })
        .with_state(ConnectionState::from_str_lossy(&self.state))
        .with_flags(UiFlags {
            expanded: self.expanded,
            disabled: self.disabled,
            error_message: self.error_message,
        });
        if !self.no_localize {
            let translations: HashMap<String, String> = self.translations.into_iter().collect();
            props = props.with_localize(move |key: MessageKey| {
                translations
                    .get(key.as_str())
                    .cloned()
                    .unwrap_or_else(|| echo_localize(key))
            });
        }
        ServerCard::new(props)
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct InteractionReport {
    events: Vec<ServerCardEvent>,
    menu_selection_after: Option<MenuItem>,
}

fn main() -> anyhow::Result<()> {
    setup_tracing_subscriber()?;
    let cli = Cli::parse();
    let mut card = cli.card.into_card();
    debug!(props = ?card.props(), "Card under test");

    let output = match cli.cmd {
        Command::Derive => serde_json::to_string_pretty(&card.derive()),
        Command::States => {
            let derived: Vec<_> = ConnectionState::ALL
                .into_iter()
                .map(|state| {
                    card.set_state(state);
                    (state, card.derive())
                })
                .collect();
            serde_json::to_string_pretty(&derived)
        }
        Command::Tap => {
            let mut events = Vec::new();
            card.toggle_connect(&mut events);
            serde_json::to_string_pretty(&InteractionReport {
                events,
                menu_selection_after: card.menu_selection(),
            })
        }
        Command::Menu { item } => {
            let mut events = Vec::new();
            let ticket = card.select_menu_item(item, &mut events);
            debug!(selection = ?card.menu_selection(), "Menu item selected");
            card.clear_menu_selection(ticket);
            serde_json::to_string_pretty(&InteractionReport {
                events,
                menu_selection_after: card.menu_selection(),
            })
        }
    }
    .context("Serialize output")?;
    println!("{output}");
    Ok(())
}

fn setup_tracing_subscriber() -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish(),
    )?;
    debug!(".. tracing subscriber initialized");
    Ok(())
}
