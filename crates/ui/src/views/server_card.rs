// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use super::connection_viz::{view_connection_viz, VizAssets};
use super::generic::{card_container_style, view_empty, view_text_tooltip};
use crate::i18n::fl;
use iced::border::Radius;
use iced::widget::{button, column, container, row, space, text};
use iced::{padding, Alignment, Color, Element, Length, Task, Theme};
use iced_aw::{drop_down, DropDown};
use iced_fonts::bootstrap;
use server_card_core::event::ServerCardEvent;
use server_card_core::props::ServerCardProps;
use server_card_core::types::ConnectionState;
use server_card_core::{DeselectTicket, MenuItem, ServerCard};
use tracing::debug;

/// Messages emitted by the server card UI elements.
#[derive(Debug, Clone)]
pub(crate) enum ServerCardMsg {
    ToggleConnect,
    ToggleMenu,
    DismissMenu,
    MenuItemPressed(MenuItem),
    /// Scheduled for the update turn after a menu item was pressed.
    ClearMenuSelection,
    CopyAddress,
}

/// What the owner has to handle after the card processed a message.
#[derive(Debug, Default)]
pub(crate) struct CardOutput {
    /// User intents for the owner.
    pub(crate) events: Vec<ServerCardEvent>,
    /// Text the user asked to copy to the clipboard.
    pub(crate) clipboard: Option<String>,
}

/// The iced server card.
///
/// Wraps the toolkit independent [ServerCard] together with the transient state of the overflow menu.
#[derive(Debug, Clone)]
pub(crate) struct ServerCardView {
    card: ServerCard,
    menu_open: bool,
    pending_deselect: Option<DeselectTicket>,
}

impl ServerCardView {
    pub(crate) fn new(props: ServerCardProps) -> Self {
        Self {
            card: ServerCard::new(props),
            menu_open: false,
            pending_deselect: None,
        }
    }

    pub(crate) fn server_id(&self) -> &str {
        &self.card.props().info.server_id
    }

    pub(crate) fn props(&self) -> &ServerCardProps {
        self.card.props()
    }

    /// Inputs are owned by the app and may be updated at any time.
    pub(crate) fn props_mut(&mut self) -> &mut ServerCardProps {
        self.card.props_mut()
    }

    #[cfg(test)]
    pub(crate) fn card(&self) -> &ServerCard {
        &self.card
    }

    #[cfg(test)]
    pub(crate) fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Handles a card message.
    ///
    /// The returned task must be run by the owner, it clears the menu highlight after a menu selection.
    pub(crate) fn update(&mut self, msg: ServerCardMsg) -> (CardOutput, Task<ServerCardMsg>) {
        debug!(server_id = self.server_id(), ?msg, "Server card update");
        let mut output = CardOutput::default();

        let task = match msg {
            ServerCardMsg::ToggleConnect => {
                self.card.toggle_connect(&mut output.events);
                Task::none()
            }
            ServerCardMsg::ToggleMenu => {
                self.menu_open = !self.menu_open;
                Task::none()
            }
            ServerCardMsg::DismissMenu => {
                self.menu_open = false;
                Task::none()
            }
            ServerCardMsg::MenuItemPressed(item) => {
                self.menu_open = false;
                self.pending_deselect = Some(self.card.select_menu_item(item, &mut output.events));
                Task::done(ServerCardMsg::ClearMenuSelection)
            }
            ServerCardMsg::ClearMenuSelection => {
                if let Some(ticket) = self.pending_deselect.take() {
                    self.card.clear_menu_selection(ticket);
                }
                Task::none()
            }
            ServerCardMsg::CopyAddress => {
                output.clipboard = Some(self.card.props().info.server_address.clone());
                Task::none()
            }
        };
        (output, task)
    }

    /// View for the card.
    ///
    /// `frame` drives the animation of the connection visualization.
    pub(crate) fn view(&self, assets: &VizAssets, frame: u32) -> Element<'_, ServerCardMsg> {
        let props = self.card.props();
        let derived = self.card.derive();
        let expanded = props.flags.expanded;
        let connect_msg =
            (!derived.connect_button_disabled).then_some(ServerCardMsg::ToggleConnect);

        let header_viz = if expanded {
            view_empty()
        } else {
            view_connection_viz(props.state, &props.root_path, assets, false, frame)
        };
        let server_info = column![
            text(props.info.server_name.as_str()).size(20),
            row![
                text(props.info.server_address.as_str())
                    .size(13)
                    .style(muted_text_style),
                view_text_tooltip(
                    button(bootstrap::copy().size(12))
                        .style(button::text)
                        .padding(2)
                        .on_press(ServerCardMsg::CopyAddress),
                    fl!("server-card-copy-address-tooltip")
                ),
            ]
            .spacing(3)
            .align_y(Alignment::Center),
        ]
        .width(Length::Fill);
        let menu = self.view_menu(&derived.rename_label, &derived.forget_label);
        let header = row![header_viz, server_info, menu]
            .spacing(12)
            .padding(padding::top(12).left(12).right(6))
            .align_y(Alignment::Start);

        let content: Element<'_, ServerCardMsg> = if expanded {
            container(
                column![
                    button(view_connection_viz(
                        props.state,
                        &props.root_path,
                        assets,
                        true,
                        frame
                    ))
                        .style(button::text)
                        .padding(3)
                        .on_press_maybe(connect_msg.clone()),
                    text(derived.status_message).size(14).style({
                        let state = props.state;
                        move |theme: &Theme| status_text_style(theme, state)
                    }),
                ]
                .spacing(12)
                .align_x(Alignment::Center),
            )
            .padding(padding::vertical(36))
            .center_x(Length::Fill)
            .into()
        } else {
            view_empty()
        };

        let actions = container(
            row![
                text(props.flags.error_message.as_str()).style(text::danger),
                space::horizontal(),
                button(text(derived.connect_button_label))
                    .style(button::text)
                    .on_press_maybe(connect_msg),
            ]
            .spacing(6)
            .align_y(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(6)
        .style(move |theme: &Theme| actions_bar_style(theme, expanded));

        container(column![header, content, actions].spacing(6))
            .width(Length::Fill)
            .style(card_container_style)
            .into()
    }

    /// View for the overflow menu with the rename and forget entries.
    fn view_menu(&self, rename_label: &str, forget_label: &str) -> Element<'_, ServerCardMsg> {
        let selection = self.card.menu_selection();
        let entries = MenuItem::ALL.into_iter().map(|item| {
            let label = match item {
                MenuItem::Rename => rename_label,
                MenuItem::Forget => forget_label,
            };
            button(text(label.to_string()))
                .width(Length::Fill)
                .style(if selection == Some(item) {
                    button::primary
                } else {
                    button::text
                })
                .on_press(ServerCardMsg::MenuItemPressed(item))
                .into()
        });
        let trigger = view_text_tooltip(
            button(bootstrap::three_dots_vertical())
                .style(button::text)
                .on_press(ServerCardMsg::ToggleMenu),
            fl!("server-card-menu-tooltip"),
        );
        let overlay = container(column(entries).spacing(1).width(Length::Fixed(160.)))
            .padding(3)
            .style(card_container_style);

        DropDown::new(trigger, overlay, self.menu_open)
            .on_dismiss(ServerCardMsg::DismissMenu)
            .alignment(drop_down::Alignment::BottomStart)
            .into()
    }
}

fn muted_text_style(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(Color {
            a: 0.54,
            ..theme.palette().text
        }),
    }
}

fn status_text_style(theme: &Theme, state: ConnectionState) -> text::Style {
    let palette = theme.extended_palette();
    text::Style {
        color: Some(match state {
            ConnectionState::Connected => palette.success.base.color,
            ConnectionState::Reconnecting => palette.primary.base.color,
            _ => palette.background.strong.text,
        }),
    }
}

/// The action bar is set apart from the content only in the expanded layout.
fn actions_bar_style(theme: &Theme, expanded: bool) -> container::Style {
    if !expanded {
        return container::transparent(theme);
    }
    let mut s = container::Style::default()
        .background(theme.extended_palette().background.weak.color);
    s.border.radius = Radius::new(6.);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use server_card_core::event::{RenamePayload, ServerIdPayload};
    use server_card_core::i18n::echo_localize;
    use server_card_core::props::{ServerDisplayInfo, UiFlags};

    fn view(state: ConnectionState) -> ServerCardView {
        ServerCardView::new(
            ServerCardProps::new(ServerDisplayInfo {
                server_id: "server-7".to_string(),
                server_name: "Lab".to_string(),
                server_address: "lab.example.org:443".to_string(),
            })
            .with_state(state)
            .with_localize(echo_localize),
        )
    }

    fn id_payload() -> ServerIdPayload {
        ServerIdPayload {
            server_id: "server-7".to_string(),
        }
    }

    #[test]
    fn connect_toggle_emits_intent_without_changing_state() {
        let mut card = view(ConnectionState::Disconnected);
        let (output, task) = card.update(ServerCardMsg::ToggleConnect);
        assert_eq!(output.events, [ServerCardEvent::ConnectPressed(id_payload())]);
        assert_eq!(task.units(), 0);
        assert_eq!(card.props().state, ConnectionState::Disconnected);

        card.props_mut().state = ConnectionState::Connected;
        let (output, _) = card.update(ServerCardMsg::ToggleConnect);
        assert_eq!(
            output.events,
            [ServerCardEvent::DisconnectPressed(id_payload())]
        );
    }

    #[test]
    fn menu_selection_is_cleared_on_the_next_turn() {
        let mut card = view(ConnectionState::Connected);
        let (_, task) = card.update(ServerCardMsg::ToggleMenu);
        assert!(card.menu_open());
        assert_eq!(task.units(), 0);

        let (output, task) = card.update(ServerCardMsg::MenuItemPressed(MenuItem::Forget));
        assert_eq!(output.events, [ServerCardEvent::ForgetPressed(id_payload())]);
        assert!(!card.menu_open());
        assert_eq!(card.card().menu_selection(), Some(MenuItem::Forget));
        // The clear is scheduled, not applied right away.
        assert_eq!(task.units(), 1);

        let (output, task) = card.update(ServerCardMsg::ClearMenuSelection);
        assert_eq!(card.card().menu_selection(), None);
        assert!(output.events.is_empty());
        assert_eq!(task.units(), 0);

        // Clearing again without a pending selection is a no-op.
        let _ = card.update(ServerCardMsg::ClearMenuSelection);
        assert_eq!(card.card().menu_selection(), None);
    }

    #[test]
    fn rename_forwards_the_current_name() {
        let mut card = view(ConnectionState::Disconnected);
        let (output, task) = card.update(ServerCardMsg::MenuItemPressed(MenuItem::Rename));
        assert_eq!(task.units(), 1);
        assert_eq!(
            output.events,
            [ServerCardEvent::ShowServerRename(RenamePayload {
                server_id: "server-7".to_string(),
                server_name: "Lab".to_string(),
            })]
        );
        let _ = card.update(ServerCardMsg::ClearMenuSelection);
        assert_eq!(card.card().menu_selection(), None);
    }

    #[test]
    fn disabled_card_does_not_emit() {
        let mut card = view(ConnectionState::Disconnected);
        card.props_mut().flags = UiFlags {
            disabled: true,
            ..Default::default()
        };
        let (output, _) = card.update(ServerCardMsg::ToggleConnect);
        assert!(output.events.is_empty());
    }

    #[test]
    fn copy_address_hands_address_to_owner() {
        let mut card = view(ConnectionState::Disconnected);
        let (output, _) = card.update(ServerCardMsg::CopyAddress);
        assert_eq!(output.clipboard.as_deref(), Some("lab.example.org:443"));
        assert!(output.events.is_empty());
    }
}
