use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ThemeColors {
    pub highlight: String,
    pub text: String,
    pub muted: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            highlight: "#50fa7b".to_string(),
            text: "#ffffff".to_string(),
            muted: "#808080".to_string(),
            success: "#50fa7b".to_string(),
            warning: "#ffb86c".to_string(),
            error: "#ff005f".to_string(),
        }
    }
}

/// Resolved colours handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub highlight: Color,
    pub text: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from(&ThemeColors::default())
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        tracing::warn!("Unknown colour {:?}, using {:?}", value, fallback);
        fallback
    })
}

impl From<&ThemeColors> for Theme {
    fn from(colors: &ThemeColors) -> Self {
        Self {
            highlight: parse_color(&colors.highlight, Color::Green),
            text: parse_color(&colors.text, Color::White),
            muted: parse_color(&colors.muted, Color::Gray),
            success: parse_color(&colors.success, Color::Green),
            warning: parse_color(&colors.warning, Color::Yellow),
            error: parse_color(&colors.error, Color::Red),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Used when `--config` isn't given. `~/` expands to the home directory.
    pub ssh_file_config: Option<String>,
    pub exec: bool,
    pub print_command: bool,
    pub theme: ThemeColors,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ssh_file_config: None,
            exec: false,
            print_command: true,
            theme: ThemeColors::default(),
        }
    }
}

impl AppConfig {
    pub fn ssh_config_path(&self, home: Option<&Path>) -> Option<PathBuf> {
        let raw = self.ssh_file_config.as_deref()?;
        if raw.is_empty() {
            return None;
        }
        match (raw.strip_prefix("~/"), home) {
            (Some(rest), Some(home)) => Some(home.join(rest)),
            _ => Some(PathBuf::from(raw)),
        }
    }
}

#[derive(Debug)]
pub struct ConfigManager {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sshpick");
        Ok(Self::with_dir(config_dir))
    }

    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let config_file = config_dir.join("sshpick.toml");
        Self {
            config_dir,
            config_file,
        }
    }

    /// Read `sshpick.toml`, or the defaults if it doesn't exist.
    pub fn load_config(&self) -> Result<AppConfig> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_file).context("Failed to read config file")?;
        let config: AppConfig = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_file
    }

    pub fn log_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path().join("sshpick"));
        let config = manager.load_config().unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.print_command);
        assert!(!config.exec);
        // loading must not create anything
        assert!(!manager.config_path().exists());
    }

    #[test]
    fn test_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path());
        fs::write(
            manager.config_path(),
            "ssh_file_config = \"/etc/ssh/ssh_config\"\nexec = true\nprint_command = false\n",
        )
        .unwrap();
        let config = manager.load_config().unwrap();
        assert_eq!(
            config,
            AppConfig {
                ssh_file_config: Some("/etc/ssh/ssh_config".to_string()),
                exec: true,
                print_command: false,
                theme: ThemeColors::default(),
            }
        );
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path());
        fs::write(
            manager.config_path(),
            "exec = true\n[theme]\nhighlight = \"blue\"\n",
        )
        .unwrap();
        let config = manager.load_config().unwrap();
        assert!(config.exec);
        assert!(config.print_command);
        assert_eq!(config.ssh_file_config, None);
        assert_eq!(Theme::from(&config.theme).highlight, Color::Blue);
        assert_eq!(config.theme.error, ThemeColors::default().error);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_dir(dir.path());
        fs::write(manager.config_path(), "exec = \"maybe\"").unwrap();
        assert!(manager.load_config().is_err());
    }

    #[test]
    fn test_ssh_config_path_expands_home() {
        let home = PathBuf::from("/home/vscode");
        let mut config = AppConfig::default();
        assert_eq!(config.ssh_config_path(Some(&home)), None);

        config.ssh_file_config = Some("~/.ssh/work".to_string());
        assert_eq!(
            config.ssh_config_path(Some(&home)),
            Some(PathBuf::from("/home/vscode/.ssh/work"))
        );

        config.ssh_file_config = Some("/etc/ssh/ssh_config".to_string());
        assert_eq!(
            config.ssh_config_path(None),
            Some(PathBuf::from("/etc/ssh/ssh_config"))
        );
    }

    #[test]
    fn test_bad_colour_falls_back() {
        let colors = ThemeColors {
            error: "not-a-colour".to_string(),
            ..ThemeColors::default()
        };
        assert_eq!(Theme::from(&colors).error, Color::Red);
    }
}
