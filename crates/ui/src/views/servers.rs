// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use super::generic::{
    card_container_style, modal_container_style, optimized_scrollbar_properties, view_heading,
    view_text_tooltip,
};
use super::UI_MAX_WIDTH;
use crate::app::{App, AppMsg, Modal};
use crate::i18n::fl;
use iced::widget::{button, column, container, row, scrollable, space, text, text_input};
use iced::{padding, Alignment, Element, Length};
use iced_fonts::bootstrap;

/// View for the list of all configured servers, one card per server.
pub(crate) fn view_servers(app: &App) -> Element<'_, AppMsg> {
    let top_bar = row![
        view_heading(fl!("app-title")),
        space::horizontal(),
        view_text_tooltip(
            button(bootstrap::gear())
                .style(button::text)
                .on_press(AppMsg::ShowModal(Box::new(Modal::Settings))),
            fl!("settings-button")
        ),
    ]
    .align_y(Alignment::Center)
    .padding(6);

    let add_server = container(
        row![
            bootstrap::plus_circle(),
            text_input(
                fl!("server-add-address-placeholder").as_str(),
                app.add_server_address.as_str()
            )
            .on_input(AppMsg::UpdateAddServerAddress)
            .on_submit(AppMsg::AddServer),
            button(text(fl!("server-add-button")))
                .on_press_maybe((!app.add_server_address.trim().is_empty()).then_some(AppMsg::AddServer)),
        ]
        .spacing(6)
        .align_y(Alignment::Center),
    )
    .padding(6)
    .style(card_container_style);

    let list: Element<'_, AppMsg> = if app.servers.is_empty() {
        container(text(fl!("servers-empty-msg")))
            .center_x(Length::Fill)
            .padding(24)
            .into()
    } else {
        column(app.servers.iter().map(|card| {
            let server_id = card.server_id().to_string();
            card.view(&app.viz_assets, app.anim_frame).map(move |msg| AppMsg::Card {
                server_id: server_id.clone(),
                msg,
            })
        }))
        .spacing(12)
        .padding(padding::right(12))
        .into()
    };

    column![
        top_bar,
        add_server,
        scrollable(list)
            .direction(optimized_scrollbar_properties(false, true, app.optimize_touch))
            .height(Length::Fill),
    ]
    .spacing(6)
    .max_width(UI_MAX_WIDTH)
    .into()
}

/// View for the modal that edits the name of a server.
pub(crate) fn view_rename_modal<'a>(server_id: &'a str, name: &'a str) -> Element<'a, AppMsg> {
    let confirm = AppMsg::RenameServer {
        server_id: server_id.to_string(),
        name: name.to_string(),
    }
    .hide_modal();
    let valid = !name.trim().is_empty();

    container(
        column![
            row![
                view_heading(fl!("server-rename-header")),
                space::horizontal(),
                button(bootstrap::x())
                    .style(button::text)
                    .on_press(AppMsg::HideModal),
            ]
            .align_y(Alignment::Center),
            text_input(fl!("server-rename-placeholder").as_str(), name)
                .on_input(AppMsg::UpdateRenameText)
                .on_submit_maybe(valid.then(|| confirm.clone())),
            row![
                button(text(fl!("confirmation-modal-cancel-button")))
                    .style(button::secondary)
                    .on_press(AppMsg::HideModal),
                space::horizontal(),
                button(text(fl!("server-rename-confirm-button")))
                    .on_press_maybe(valid.then_some(confirm)),
            ]
        ]
        .spacing(12),
    )
    .style(modal_container_style)
    .max_width(UI_MAX_WIDTH - 500.)
    .padding(12)
    .into()
}
