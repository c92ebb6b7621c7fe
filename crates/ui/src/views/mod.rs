// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

// Modules
pub(crate) mod connection_viz;
pub(crate) mod generic;
pub(crate) mod server_card;
pub(crate) mod servers;
pub(crate) mod settings;

// Imports
use crate::app::{App, AppMsg, Modal};
use generic::{modal, view_confirmation_modal, view_errors};
use iced::widget::{column, container};
use iced::{Element, Length};
use servers::{view_rename_modal, view_servers};
use settings::view_settings;

/// The maximum width for the all base UI element and all modals
pub(crate) const UI_MAX_WIDTH: f32 = 1000.;

/// View for the entire application
pub(crate) fn view_app(app: &App) -> Element<'_, AppMsg> {
    let content = container(column![
        view_servers(app),
        view_errors(app.errors.iter(), app.optimize_touch)
    ])
    .center_x(Length::Fill)
    .height(Length::Fill)
    .padding(6);

    match &app.modal {
        Modal::None => content.into(),
        Modal::Settings => modal(content, view_settings(app), AppMsg::HideModal),
        Modal::RenameServer { server_id, name } => modal(
            content,
            view_rename_modal(server_id, name),
            AppMsg::HideModal,
        ),
        Modal::Confirmation { msg, confirm } => modal(
            content,
            view_confirmation_modal(msg, confirm.clone()),
            AppMsg::HideModal,
        ),
    }
}
