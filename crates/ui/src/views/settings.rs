// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use super::generic::{modal_container_style, view_heading, view_text_tooltip};
use super::UI_MAX_WIDTH;
use crate::app::{App, AppMsg};
use crate::i18n::{fl, AppLanguage};
use crate::util;
use iced::widget::{button, column, container, pick_list, row, rule, space, text, toggler};
use iced::{padding, Alignment, Element, Length};
use iced_fonts::bootstrap;
use server_card_core::types::ConnectionState;

/// View for a single settings row.
///
/// intended to be contained in widget [iced::widget::Column]
fn view_settings_row<'a>(
    description: impl text::IntoFragment<'a>,
    action: impl Into<Element<'a, AppMsg>>,
) -> Element<'a, AppMsg> {
    row![text(description), space::horizontal(), action.into()]
        .align_y(Alignment::Center)
        .spacing(6)
        .padding(6)
        .into()
}

/// View for application settings
pub(crate) fn view_settings(app: &App) -> Element<'_, AppMsg> {
    let project_version = util::project_version();
    let any_connected = app
        .servers
        .iter()
        .any(|card| card.props().state == ConnectionState::Connected);

    container(
        column![
            row![
                view_heading(fl!("settings-header")),
                space::horizontal(),
                button(bootstrap::x())
                    .style(button::text)
                    .on_press(AppMsg::HideModal),
            ]
            .align_y(Alignment::Center)
            .spacing(6),
            container(
                column![
                    view_settings_row(
                        fl!("settings-language-pick-label"),
                        pick_list(
                            AppLanguage::LANGS_AVAILABLE,
                            Some(&app.language),
                            AppMsg::ChangeLanguage
                        )
                    ),
                    rule::horizontal(1),
                    view_settings_row(
                        fl!("settings-optimize-touch-label"),
                        toggler(app.optimize_touch).on_toggle(AppMsg::OptimizeTouch)
                    ),
                    rule::horizontal(1),
                    view_settings_row(
                        fl!("settings-root-path-label"),
                        row![
                            container(text(app.root_path.display().to_string()).size(14))
                                .padding(padding::right(5)),
                            view_text_tooltip(
                                button(bootstrap::backspace())
                                    .style(button::text)
                                    .on_press(AppMsg::ResetRootPath),
                                fl!("root-path-reset-tooltip")
                            ),
                        ]
                        .align_y(Alignment::Center)
                        .spacing(1)
                    ),
                    rule::horizontal(1),
                    view_settings_row(
                        fl!("settings-simulate-interruption-label"),
                        button(text(fl!("settings-simulate-interruption-button")))
                            .style(button::secondary)
                            .on_press_maybe(
                                any_connected.then_some(AppMsg::InterruptConnections)
                            )
                    ),
                    rule::horizontal(1),
                    view_settings_row(fl!("app-authors-label"), text(util::project_authors())),
                    rule::horizontal(1),
                    view_settings_row(
                        fl!("app-version-label"),
                        row![
                            text(project_version.clone()),
                            view_text_tooltip(
                                button(bootstrap::copy())
                                    .style(button::text)
                                    .on_press(AppMsg::ClipboardCopy(project_version)),
                                fl!("clipboard-copy-tooltip")
                            )
                        ]
                        .spacing(6)
                        .align_y(Alignment::Center)
                    ),
                    rule::horizontal(1),
                    view_settings_row(
                        "",
                        button(text(fl!("app-quit-label")))
                            .style(button::danger)
                            .on_press(AppMsg::CloseLatestWindow)
                    ),
                ]
                .spacing(6)
                .padding(6)
            )
            .width(Length::Fill)
            .style(container::rounded_box)
        ]
        .spacing(6),
    )
    .style(modal_container_style)
    .max_width(UI_MAX_WIDTH - 300.)
    .padding(12)
    .into()
}
