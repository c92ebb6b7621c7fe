// SPDX-FileCopyrightText: 2025 Duagon Germany GmbH
//
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::debug;

pub(crate) static PROJECT_DIRS: LazyLock<directories::ProjectDirs> = LazyLock::new(|| {
    directories::ProjectDirs::from("com.duagon.server-card", "Duagon", "server-card")
        .expect("Initializing project directories")
});

/// Returns the project authors found in the crate `Cargo.toml` file.
pub(crate) fn project_authors() -> String {
    env!("CARGO_PKG_AUTHORS").to_string()
}

/// Returns the project version found in the crate `Cargo.toml` file.
pub(crate) fn project_version() -> String {
    let ref_suffix = project_git_commit_id().map(|id| " (ref ".to_string() + &id + ")");
    env!("CARGO_PKG_VERSION").to_string() + &ref_suffix.unwrap_or_default()
}

/// Returns the current project git commit id.
pub(crate) fn project_git_commit_id() -> Option<String> {
    // this environment variable is set and propagated to the build in `build.rs`
    option_env!("PROJECT_GIT_COMMIT_ID").map(|s| s.to_string())
}

/// Returns the default root directory the connection visualization resolves its assets against.
pub(crate) fn default_root_path() -> PathBuf {
    PROJECT_DIRS.data_dir().to_path_buf()
}

/// Returns the path to the app configuration file.
pub(crate) fn config_path() -> PathBuf {
    PROJECT_DIRS.config_dir().join("config.json")
}

/// Ensure that all default app directories are present.
///
/// If not, new directories will be created.
///
/// Returns error if any directory creation fails.
pub(crate) fn ensure_app_default_dirs() -> anyhow::Result<()> {
    let default_config_dir = PROJECT_DIRS.config_dir();
    std::fs::create_dir_all(default_config_dir).context("Create application config directory")?;
    debug!(
        dir = default_config_dir.display().to_string(),
        "Created default application config directory"
    );
    let default_assets_dir = default_root_path().join("assets");
    std::fs::create_dir_all(&default_assets_dir).context("Create application assets directory")?;
    debug!(
        dir = default_assets_dir.display().to_string(),
        "Created default application assets directory"
    );
    Ok(())
}
