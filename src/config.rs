use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_PATH: &str = "reversi_config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub timing: TimingConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
}

/// 演出タイミング (ミリ秒)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Quiet period before "Waiting for opponent..." shows up.
    pub opponent_grace_ms: u64,
    /// Minimum time the waiting indicator stays on screen.
    pub opponent_dwell_ms: u64,
    pub animation_ms: u64,
    pub game_over_delay_ms: u64,
    /// Display time of toasts that have no dismissal future.
    pub toast_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub filter: String,
}

impl PlayerConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(CONFIG_PATH)?;
        let config: PlayerConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

impl TimingConfig {
    pub fn opponent_grace(&self) -> Duration {
        Duration::from_millis(self.opponent_grace_ms)
    }

    pub fn opponent_dwell(&self) -> Duration {
        Duration::from_millis(self.opponent_dwell_ms)
    }

    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn game_over_delay(&self) -> Duration {
        Duration::from_millis(self.game_over_delay_ms)
    }

    pub fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            opponent_grace_ms: 1_000,
            opponent_dwell_ms: 500,
            animation_ms: 750,
            game_over_delay_ms: 250,
            toast_ms: 2_500,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: "127.0.0.1:8080".to_string(),
            name: "Player".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            file: None,
            filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: PlayerConfig =
            serde_json::from_str(r#"{ "timing": { "animation_ms": 10 } }"#).unwrap();
        assert_eq!(config.timing.animation_ms, 10);
        assert_eq!(config.timing.opponent_grace_ms, 1_000);
        assert_eq!(config.server.addr, "127.0.0.1:8080");
        assert_eq!(config.log.filter, "info");
    }
}
