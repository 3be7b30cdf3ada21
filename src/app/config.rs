use crate::app::cli::Cli;
use crate::app::error::{CombineError, Result};
use crate::app::models::Settings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const WORKSPACE_SETTINGS_FILE: &str = ".readme-combiner.toml";

#[derive(Deserialize, Debug, Default)]
struct SettingsFile {
    #[serde(rename = "readme-combiner", default)]
    section: SettingsLayer,
}

/// One layer of optional overrides. Keys use the same camelCase names as the host options.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsLayer {
    pub file_pattern: Option<String>,
    pub output_file_name: Option<String>,
    pub exclude_pattern: Option<String>,
    pub case_insensitive: Option<bool>,
}

impl SettingsLayer {
    fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.file_pattern {
            settings.file_pattern = v;
        }
        if let Some(v) = self.output_file_name {
            settings.output_file_name = v;
        }
        if let Some(v) = self.exclude_pattern {
            settings.exclude_pattern = v;
        }
        if let Some(v) = self.case_insensitive {
            settings.case_insensitive = v;
        }
    }
}

impl From<&Cli> for SettingsLayer {
    fn from(cli: &Cli) -> Self {
        Self {
            file_pattern: cli.pattern.clone(),
            output_file_name: cli.output.clone(),
            exclude_pattern: cli.exclude.clone(),
            // The flag can only switch matching to case-insensitive, never back.
            case_insensitive: cli.ignore_case.then_some(true),
        }
    }
}

/// `~/.config/readme_combiner/settings.toml`, if a home directory is known.
pub fn user_settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("readme_combiner")
            .join("settings.toml")
    })
}

/// A missing file is an empty layer; a present but broken one is an error.
pub fn load_layer(path: &Path) -> Result<SettingsLayer> {
    if !path.exists() {
        log::debug!("No settings file at {}", path.display());
        return Ok(SettingsLayer::default());
    }

    let content = fs::read_to_string(path).map_err(|e| CombineError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let parsed: SettingsFile = toml::from_str(&content).map_err(|e| CombineError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::debug!("Loaded settings from {}", path.display());
    Ok(parsed.section)
}

/// Defaults < user file (or `--config`) < workspace file < CLI flags.
pub fn resolve_settings(cli: &Cli, workspace_root: &Path) -> Result<Settings> {
    let user_path = cli.config.clone().or_else(user_settings_path);
    let user = match user_path {
        Some(path) => load_layer(&path)?,
        None => SettingsLayer::default(),
    };
    let workspace = load_layer(&workspace_root.join(WORKSPACE_SETTINGS_FILE))?;

    Ok(merge_layers([user, workspace, SettingsLayer::from(cli)]))
}

pub fn merge_layers(layers: impl IntoIterator<Item = SettingsLayer>) -> Settings {
    let mut settings = Settings::default();
    for layer in layers {
        layer.apply(&mut settings);
    }
    settings
}
