//! 配置：settings.json 与命令行参数
//!
//! The settings file is only ever read. A missing file means defaults; a broken one
//! is reported and then ignored so the screen still comes up.

use crate::app::screen::ScreenOptions;
use crate::app::theme::{self, detect_terminal_color_support, parse_color_support};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "hackscreen";
const SETTINGS_FILE: &str = "settings.json";
const LOG_DIR: &str = "logs";

pub const USAGE: &str = "\
Usage: hackscreen [OPTIONS]

Options:
  --theme=<name|n>     Start with the named (or 1-based numbered) theme
  --settings=<path>    Read settings from <path> instead of the default location
  --no-rain            Disable the falling-glyph background
  --scanlines          Tint alternate rows (true-color terminals only)
  --list-themes        Print the available themes and exit
  -h, --help           Print this help and exit

Keys:
  t / F2               Open the theme list (Up/Down/j/k, Enter, Esc)
  1-9, Tab             Select a theme directly / cycle themes
  q, Esc, Ctrl-C       Quit
";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: String,
    pub rain: RainSettings,
    pub scanlines: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_support: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: theme::get(0).name.to_string(),
            rain: RainSettings::default(),
            scanlines: false,
            color_support: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainSettings {
    pub enabled: bool,
    pub opacity: f32,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity: 0.2,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    UnknownTheme(String),
    UnknownFlag(String),
    MissingValue(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid settings in {}: {}", path.display(), source)
            }
            ConfigError::UnknownTheme(name) => write!(f, "unknown theme: {}", name),
            ConfigError::UnknownFlag(flag) => write!(f, "unknown option: {}", flag),
            ConfigError::MissingValue(flag) => write!(f, "missing value for {}", flag),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Default location of `settings.json`, or `None` when no home directory is known.
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

pub fn log_dir() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_DIR))
}

/// 确保日志目录存在
pub fn ensure_log_dir() -> io::Result<PathBuf> {
    let dir = log_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Cannot determine log directory")
    })?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`load_settings`], but a broken file only costs a warning.
pub fn load_settings_or_default(path: Option<&Path>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match load_settings(path) {
        Ok(settings) => {
            tracing::debug!(path = %path.display(), "settings loaded");
            settings
        }
        Err(err) => {
            tracing::warn!(error = %err, "ignoring settings file");
            Settings::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Already resolved against the theme list.
    pub theme: Option<usize>,
    pub settings: Option<PathBuf>,
    pub no_rain: bool,
    pub scanlines: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(CliArgs),
    Help,
    ListThemes,
}

pub fn parse_args<I>(args: I) -> Result<Invocation, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    for arg in args {
        if let Some(value) = arg.strip_prefix("--theme=") {
            let index =
                theme::find(value).ok_or_else(|| ConfigError::UnknownTheme(value.to_string()))?;
            cli.theme = Some(index);
        } else if let Some(value) = arg.strip_prefix("--settings=") {
            if value.is_empty() {
                return Err(ConfigError::MissingValue("--settings"));
            }
            cli.settings = Some(PathBuf::from(value));
        } else {
            match arg.as_str() {
                "--theme" => return Err(ConfigError::MissingValue("--theme")),
                "--settings" => return Err(ConfigError::MissingValue("--settings")),
                "--no-rain" => cli.no_rain = true,
                "--scanlines" => cli.scanlines = true,
                "--list-themes" => return Ok(Invocation::ListThemes),
                "-h" | "--help" => return Ok(Invocation::Help),
                _ => return Err(ConfigError::UnknownFlag(arg)),
            }
        }
    }
    Ok(Invocation::Run(cli))
}

pub fn theme_listing() -> String {
    theme::list()
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {}\n", i + 1, t.name))
        .collect()
}

impl Settings {
    /// Command-line flags win over the file.
    pub fn apply_cli(&mut self, cli: &CliArgs) {
        if let Some(index) = cli.theme {
            self.theme = theme::get(index).name.to_string();
        }
        if cli.no_rain {
            self.rain.enabled = false;
        }
        if cli.scanlines {
            self.scanlines = true;
        }
    }

    pub fn screen_options(&self) -> ScreenOptions {
        let theme_index = theme::find(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "unknown theme in settings, using default");
            0
        });
        let color_support = self
            .color_support
            .as_deref()
            .and_then(|value| {
                let parsed = parse_color_support(value);
                if parsed.is_none() {
                    tracing::warn!(value, "unknown color_support in settings");
                }
                parsed
            })
            .unwrap_or_else(detect_terminal_color_support);

        let opacity = if self.rain.opacity.is_finite() {
            self.rain.opacity.clamp(0.0, 1.0)
        } else {
            RainSettings::default().opacity
        };

        ScreenOptions {
            theme_index,
            rain_enabled: self.rain.enabled,
            rain_opacity: opacity,
            scanlines: self.scanlines,
            color_support,
        }
    }
}

fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"));
    }

    #[cfg(target_os = "windows")]
    {
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg));
        }
        non_empty_env("HOME").map(|home| PathBuf::from(home).join(".config"))
    }
}

fn cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        if let Some(xdg) = non_empty_env("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        non_empty_env("HOME").map(|home| PathBuf::from(home).join(".cache"))
    }
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
