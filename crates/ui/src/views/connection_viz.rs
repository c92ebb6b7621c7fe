// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use iced::widget::{container, svg, Text};
use iced::{Color, Element, Length, Theme};
use iced_fonts::bootstrap;
use server_card_core::types::ConnectionState;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Icon size in the collapsed card header.
const SIZE_COLLAPSED: f32 = 32.;
/// Icon size in the expanded card content.
const SIZE_EXPANDED: f32 = 112.;
/// Number of animation frames of one pulse cycle.
const PULSE_FRAMES: u32 = 20;
/// The lowest opacity reached while pulsing.
const PULSE_MIN_ALPHA: f32 = 0.3;

/// Resolves the visualization asset for the state, relative to the supplied root path.
pub(crate) fn viz_asset_path(root_path: &Path, state: ConnectionState) -> PathBuf {
    root_path
        .join("assets")
        .join(format!("{}.svg", state.as_str().to_lowercase()))
}

/// The visualization assets found below a root path.
///
/// Scanned once whenever the root path changes, views only look up the result.
#[derive(Debug, Clone, Default)]
pub(crate) struct VizAssets {
    root_path: PathBuf,
    present: Vec<(ConnectionState, PathBuf)>,
}

impl VizAssets {
    pub(crate) fn scan(root_path: &Path) -> Self {
        let present: Vec<_> = ConnectionState::ALL
            .into_iter()
            .map(|state| (state, viz_asset_path(root_path, state)))
            .filter(|(_, path)| path.is_file())
            .collect();
        debug!(
            root_path = %root_path.display(),
            n_present = present.len(),
            "Scanned visualization assets"
        );
        Self {
            root_path: root_path.to_path_buf(),
            present,
        }
    }

    /// The asset of the state, if it was present below `root_path` when scanned.
    pub(crate) fn get(&self, root_path: &Path, state: ConnectionState) -> Option<&Path> {
        if self.root_path != root_path {
            return None;
        }
        self.present
            .iter()
            .find(|(present, _)| *present == state)
            .map(|(_, path)| path.as_path())
    }
}

/// Opacity of the visualization for an animation frame.
///
/// Stable states are drawn opaque, transitional states pulse.
pub(crate) fn pulse_alpha(state: ConnectionState, frame: u32) -> f32 {
    if !state.is_transitional() {
        return 1.;
    }
    let half = PULSE_FRAMES / 2;
    let pos = frame % PULSE_FRAMES;
    let dist = if pos < half { pos } else { PULSE_FRAMES - pos };
    1. - (1. - PULSE_MIN_ALPHA) * dist as f32 / half as f32
}

fn state_color(theme: &Theme, state: ConnectionState) -> Color {
    let palette = theme.extended_palette();
    match state {
        ConnectionState::Disconnected => palette.background.strong.color,
        ConnectionState::Connecting | ConnectionState::Reconnecting => palette.primary.base.color,
        ConnectionState::Connected => palette.success.base.color,
        ConnectionState::Disconnecting => palette.secondary.base.color,
    }
}

fn state_icon<'a>(state: ConnectionState) -> Text<'a> {
    match state {
        ConnectionState::Disconnected => bootstrap::shield_slash(),
        ConnectionState::Connecting | ConnectionState::Disconnecting => bootstrap::shield(),
        ConnectionState::Connected => bootstrap::shield_check(),
        ConnectionState::Reconnecting => bootstrap::arrow_repeat(),
    }
}

/// View for the animated representation of the connection state.
///
/// Uses the state asset below `root_path` if `assets` found it, a font icon otherwise.
pub(crate) fn view_connection_viz<'a, Message: 'a>(
    state: ConnectionState,
    root_path: &Path,
    assets: &VizAssets,
    expanded: bool,
    frame: u32,
) -> Element<'a, Message> {
    let size = if expanded {
        SIZE_EXPANDED
    } else {
        SIZE_COLLAPSED
    };
    let alpha = pulse_alpha(state, frame);
    let viz: Element<'a, Message> = if let Some(asset) = assets.get(root_path, state) {
        svg(svg::Handle::from_path(asset))
            .width(size)
            .height(size)
            .opacity(alpha)
            .into()
    } else {
        state_icon(state)
            .size(size)
            .style(move |theme: &Theme| iced::widget::text::Style {
                color: Some(Color {
                    a: alpha,
                    ..state_color(theme, state)
                }),
            })
            .into()
    };
    container(viz)
        .width(Length::Shrink)
        .center_y(size)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_path_per_state() {
        assert_eq!(
            viz_asset_path(Path::new("/opt/app"), ConnectionState::Reconnecting),
            PathBuf::from("/opt/app/assets/reconnecting.svg")
        );
    }

    #[test]
    fn scanned_assets_are_looked_up_per_root() {
        let root = std::env::temp_dir().join(format!("server-card-viz-{}", std::process::id()));
        std::fs::create_dir_all(root.join("assets")).unwrap();
        std::fs::write(viz_asset_path(&root, ConnectionState::Connected), "<svg/>").unwrap();

        let assets = VizAssets::scan(&root);
        std::fs::remove_dir_all(&root).unwrap();
        assert_eq!(
            assets.get(&root, ConnectionState::Connected),
            Some(viz_asset_path(&root, ConnectionState::Connected).as_path())
        );
        assert_eq!(assets.get(&root, ConnectionState::Connecting), None);
        // Removed after the scan, the lookup does not touch the file system again.
        assert!(assets.get(&root, ConnectionState::Connected).is_some());
        assert_eq!(
            assets.get(Path::new("/elsewhere"), ConnectionState::Connected),
            None
        );
    }

    #[test]
    fn stable_states_do_not_pulse() {
        for frame in 0..PULSE_FRAMES {
            assert_eq!(pulse_alpha(ConnectionState::Connected, frame), 1.);
            assert_eq!(pulse_alpha(ConnectionState::Disconnected, frame), 1.);
        }
    }

    #[test]
    fn transitional_states_pulse_within_bounds() {
        let alphas: Vec<f32> = (0..PULSE_FRAMES * 2)
            .map(|frame| pulse_alpha(ConnectionState::Connecting, frame))
            .collect();
        assert_eq!(alphas[0], 1.);
        assert!((alphas[(PULSE_FRAMES / 2) as usize] - PULSE_MIN_ALPHA).abs() < 1e-6);
        assert!(alphas
            .iter()
            .all(|a| (PULSE_MIN_ALPHA - 1e-6..=1.).contains(a)));
        assert_eq!(alphas[PULSE_FRAMES as usize], 1.);
    }
}
