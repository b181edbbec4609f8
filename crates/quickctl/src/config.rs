use crate::events::AppEvent;
use crate::sys::icon::IconName;
use crate::sys::wm::ShellCommand;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use quickctl_core::{Settings, SlotPosition};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlotConfig {
    pub position: Option<SlotPosition>,
    pub icon: Option<IconName>,
    pub label: Option<String>,
    pub exec: Option<ShellCommand>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HandleConfig {
    pub icon: Option<IconName>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub control: Settings,
    #[serde(default)]
    pub handle: HandleConfig,
    #[serde(default)]
    pub slots: Vec<SlotConfig>,
}

impl Config {
    /// Slot entries by position. Entries without a position or command are
    /// skipped; a later entry for the same position wins.
    pub fn slot_entries(&self) -> [Option<&SlotConfig>; 3] {
        let mut entries = [None; 3];
        for cfg in &self.slots {
            match (cfg.position, &cfg.exec) {
                (Some(position), Some(_)) => entries[position.as_index()] = Some(cfg),
                (None, _) => log::warn!("Ignoring slot without a position: {:?}", cfg),
                (Some(position), None) => log::warn!("Ignoring {} slot without exec", position),
            }
        }
        entries
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "quickctl", "quickctl").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("QUICKCTL").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", ConfigError::from(e));
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_full_config_deserialization() {
        let json = r#"{
            "control": { "portrait_end_point": 0.6, "duration": 300, "top_inset": 16 },
            "handle": { "icon": "go-previous" },
            "slots": [
                { "position": "upper", "icon": "firefox", "exec": "firefox" },
                { "position": "2", "label": "Term", "exec": "foot" }
            ]
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.control.portrait_end_point, Some(0.6));
        assert_eq!(config.control.duration, Duration::from_millis(300));
        assert_eq!(config.control.top_inset, 16.0);
        assert_eq!(config.handle.icon, Some(IconName::new("go-previous")));

        let entries = config.slot_entries();
        assert!(entries[0].is_some());
        assert!(entries[1].is_none());
        assert_eq!(
            entries[2].and_then(|s| s.label.as_deref()),
            Some("Term")
        );
    }

    #[test]
    fn test_slots_without_position_or_exec_are_skipped() {
        let json = r#"{
            "slots": [
                { "icon": "firefox", "exec": "firefox" },
                { "position": "side", "icon": "foot" },
                { "position": "side", "exec": "foot" },
                { "position": "side", "exec": "kitty" }
            ]
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        let entries = config.slot_entries();
        assert!(entries[0].is_none());
        assert_eq!(
            entries[1].and_then(|s| s.exec.clone()),
            Some(ShellCommand::new("kitty"))
        );
        assert!(entries[2].is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.control, Settings::default());
        assert!(config.slots.is_empty());
    }

    #[test]
    fn test_bundled_default_config_parses() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.control.duration, Duration::from_millis(500));
        assert_eq!(config.slot_entries().iter().flatten().count(), 3);
    }
}
