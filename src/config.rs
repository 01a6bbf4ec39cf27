use std::{env, fs, path::Path, path::PathBuf};

use color_eyre::Result;
use directories::BaseDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::warn;

use crate::tui::{KeyBindings, RowStyle, ThemeName};

const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_true")]
    pub show_idx: bool,
    #[serde(default = "default_true")]
    pub border: bool,
    #[serde(default)]
    pub theme: ThemeName,
    #[serde(default = "default_code_max_lines")]
    pub code_max_lines: u16,
    /// JSON file with custom key bindings
    #[serde(default)]
    pub keybindings: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_code_max_lines() -> u16 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_idx: true,
            border: true,
            theme: ThemeName::default(),
            code_max_lines: default_code_max_lines(),
            keybindings: None,
        }
    }
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    /// Load settings: embedded defaults, then the user file on top.
    ///
    /// Without an explicit path the user file is `$ACTIONTUI_CONFIG/config.json5`,
    /// or `~/.actiontui-config.json5` when that variable is unset. It is created
    /// from the defaults when missing.
    pub fn from_path(config_path: Option<&PathBuf>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        let selected_path = match config_path {
            Some(p) => expand_tilde(p),
            None => {
                let default_cfg = default_config_path(CONFIG_FOLDER.clone());
                if !default_cfg.exists() {
                    if let Some(parent) = default_cfg.parent() {
                        let _ = fs::create_dir_all(parent);
                    }
                    if let Err(e) = fs::write(&default_cfg, CONFIG) {
                        warn!(
                            "could not write default config to {}: {e}",
                            default_cfg.display()
                        );
                    }
                }
                default_cfg
            }
        };

        builder = builder.add_source(
            config::File::from(selected_path)
                .format(config::FileFormat::Json5)
                .required(config_path.is_some()),
        );

        builder.build()?.try_deserialize()
    }

    pub fn style(&self) -> RowStyle {
        RowStyle::from_name(self.theme)
    }

    /// Custom bindings when configured, defaults otherwise
    pub fn keybindings(&self) -> Result<KeyBindings> {
        let Some(path) = &self.keybindings else {
            return Ok(KeyBindings::default());
        };
        let bindings = KeyBindings::load_from_file(&expand_tilde(path))?;
        for warning in bindings.validate() {
            warn!("keybindings: {warning}");
        }
        Ok(bindings)
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(s) = path.to_str() {
        if s.starts_with('~') {
            if let Some(base) = BaseDirs::new() {
                return PathBuf::from(s.replacen('~', base.home_dir().to_str().unwrap_or(""), 1));
            }
        }
    }
    path.to_path_buf()
}

fn default_config_path(config_folder: Option<PathBuf>) -> PathBuf {
    if let Some(folder) = config_folder {
        return folder.join("config.json5");
    }
    if let Some(base) = BaseDirs::new() {
        return base.home_dir().join(".actiontui-config.json5");
    }
    PathBuf::from(".actiontui-config.json5")
}
