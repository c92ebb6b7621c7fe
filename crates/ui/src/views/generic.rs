// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use super::UI_MAX_WIDTH;
use crate::app::{self, AppMsg, ErrorCriticality};
use crate::i18n::fl;
use iced::border::Radius;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{
    button, center, column, container, mouse_area, opaque, row, rule, scrollable, space, stack,
    text, tooltip, Space, Text, Tooltip,
};
use iced::{Alignment, Color, Element, Length, Shadow, Theme, Vector};
use iced_fonts::bootstrap;

/// "Card" style for a container.
///
/// intended to be used in `container.style` method.
pub(crate) fn card_container_style(theme: &Theme) -> container::Style {
    let mut s = container::rounded_box(theme);
    s.shadow = Shadow {
        color: Color::BLACK,
        offset: Vector::new(1., 2.),
        blur_radius: 3.,
    };
    s
}

/// "Modal" style for a container.
///
/// intended to be used in `container.style` method.
pub(crate) fn modal_container_style(theme: &iced::Theme) -> container::Style {
    let mut s = container::rounded_box(theme).background(theme.palette().background);
    s.border.radius = Radius::new(9.);
    s.shadow = Shadow {
        color: Color::BLACK,
        offset: Vector::new(2., 3.),
        blur_radius: 6.,
    };
    s
}

/// Scrollable scrollbar properties optionally optimized for touch input
///
/// One of `horizontal` or `vertical` arguments must be true.
/// If both are false, it is considered a programmer error and the function will panic.
pub(super) fn optimized_scrollbar_properties(
    horizontal: bool,
    vertical: bool,
    optimize_touch: bool,
) -> Direction {
    let scrollbar = if optimize_touch {
        Scrollbar::default().scroller_width(16).spacing(6.)
    } else {
        Scrollbar::default().spacing(6.)
    };
    match (horizontal, vertical) {
        (false, false) => {
            panic!("At least one of 'horizontal' or 'vertical' needs to be set to true")
        }
        (true, false) => Direction::Horizontal(scrollbar),
        (false, true) => Direction::Vertical(scrollbar),
        (true, true) => Direction::Both {
            horizontal: scrollbar,
            vertical: scrollbar,
        },
    }
}

/// View for a modal supplied by `content`, overlaying base elements supplied by `base`.
/// `on_blur` determines the action when clicking/pressing on the blurred background
pub(crate) fn modal<'a>(
    base: impl Into<Element<'a, AppMsg>>,
    content: impl Into<Element<'a, AppMsg>>,
    on_blur: AppMsg,
) -> Element<'a, AppMsg> {
    stack![
        base.into(),
        mouse_area(center(opaque(content)).style(|_theme| {
            container::Style {
                background: Some(
                    Color {
                        a: 0.9,
                        ..Color::BLACK
                    }
                    .into(),
                ),
                ..container::Style::default()
            }
        }))
        .on_press(on_blur)
    ]
    .into()
}

/// View for nothing at all.
pub(crate) fn view_empty<'a, Message: 'a>() -> Element<'a, Message> {
    Space::new().into()
}

/// View for a text tooltip with text supplied by `tooltip_text` containing any element supplied by `content`.
pub(crate) fn view_text_tooltip<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    tooltip_text: impl text::IntoFragment<'a>,
) -> Tooltip<'a, Message> {
    tooltip(
        content,
        container(text(tooltip_text)).padding(6).style(|theme| {
            let mut s = container::rounded_box(theme).background(Color {
                a: 0.9,
                ..Color::BLACK
            });
            s.shadow = Shadow {
                color: Color::BLACK,
                offset: Vector::new(0., 0.),
                blur_radius: 1.,
            };
            s
        }),
        tooltip::Position::FollowCursor,
    )
}

/// View for a heading with a certain size
pub(crate) fn view_heading<'a>(heading: impl text::IntoFragment<'a>) -> Text<'a> {
    text(heading).size(24)
}

/// View for the reported `errors`.
///
/// Only the latest error is shown in full, a thin bar per further error is stacked on top of it (at most ten).
pub(crate) fn view_errors<'a>(
    errors: impl ExactSizeIterator<Item = &'a app::ErrorReport>,
    optimize_touch: bool,
) -> Element<'a, AppMsg> {
    const MAX_STACK: usize = 10;
    let n_stacked = errors.len().saturating_sub(1).min(MAX_STACK);
    let Some(latest) = errors.last() else {
        return view_empty();
    };

    column![
        column((0..n_stacked).map(|_| {
            rule::horizontal(2)
                .style(|theme| {
                    let mut s = rule::default(theme);
                    s.color = theme.extended_palette().danger.strong.color;
                    s
                })
                .into()
        }))
        .spacing(1),
        view_error(latest, optimize_touch)
    ]
    .spacing(1)
    .into()
}

/// View for single error report with visually striking appearance,
/// depending on the error report criticality.
pub(crate) fn view_error(error: &app::ErrorReport, optimize_touch: bool) -> Element<'_, AppMsg> {
    let criticality = match error.criticality {
        ErrorCriticality::NonCritical => fl!("error-noncritical"),
        ErrorCriticality::Critical => fl!("error-critical"),
    };

    container(
        column![
            row![
                text(criticality + " : " + error.short.as_str()),
                space::horizontal(),
                button(bootstrap::x())
                    .style(button::secondary)
                    .on_press(AppMsg::DismissError)
            ]
            .align_y(Alignment::Center)
            .spacing(6),
            scrollable(text(error.detailed.as_str()).size(14))
                .direction(optimized_scrollbar_properties(false, true, optimize_touch))
        ]
        .spacing(6),
    )
    .style(|theme| {
        let mut s = container::bordered_box(theme);
        let extended_palette = theme.extended_palette();
        match error.criticality {
            ErrorCriticality::NonCritical => {
                s.border.color = Color::from_rgb8(209, 160, 0);
                s.background = Some(Color::from_rgb8(156, 144, 103).into());
                s.text_color = Some(extended_palette.danger.base.text);
            }
            ErrorCriticality::Critical => {
                s.border.color = extended_palette.danger.strong.color;
                s.background = Some(extended_palette.danger.weak.color.into());
                s.text_color = Some(extended_palette.danger.base.text);
            }
        }
        s
    })
    .width(Length::Fill)
    .padding(6)
    .into()
}

/// View for a confirmation modal that only sends the suppliced `confirm` message
/// when the user has clicked on the confirm button.
pub(crate) fn view_confirmation_modal<'a>(
    msg: impl text::IntoFragment<'a>,
    confirm: AppMsg,
) -> Element<'a, AppMsg> {
    container(
        column![
            text(msg),
            row![
                button(text(fl!("confirmation-modal-cancel-button")))
                    .on_press(AppMsg::HideModal)
                    .style(button::secondary),
                space::horizontal(),
                button(text(fl!("confirmation-modal-confirm-button")))
                    .on_press(confirm.hide_modal()),
            ]
        ]
        .align_x(Alignment::Center)
        .spacing(6),
    )
    .style(modal_container_style)
    .max_width(UI_MAX_WIDTH - 300.)
    .padding(12)
    .into()
}
