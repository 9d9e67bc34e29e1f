use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tictactoe_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{
    FirstPlayerMode, Strategy, TicTacToeSessionSettings, DEFAULT_OPPONENT_DELAY,
};

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

pub const MAX_OPPONENT_DELAY_MS: u64 = 10_000;

/// Next to the executable, falling back to the working directory.
pub fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, GameConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path.unwrap_or_else(get_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub first_player: FirstPlayerMode,
    pub strategy: Strategy,
    pub opponent_delay_ms: u64,
    pub decision_table: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_player: FirstPlayerMode::Human,
            strategy: Strategy::Opening,
            opponent_delay_ms: DEFAULT_OPPONENT_DELAY.as_millis() as u64,
            decision_table: None,
            seed: None,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.opponent_delay_ms > MAX_OPPONENT_DELAY_MS {
            return Err(format!(
                "opponent_delay_ms must be at most {}",
                MAX_OPPONENT_DELAY_MS
            ));
        }
        if let Some(ref path) = self.decision_table
            && path.as_os_str().is_empty()
        {
            return Err("decision_table path must not be empty".to_string());
        }
        Ok(())
    }
}

impl GameConfig {
    pub fn session_settings(&self) -> TicTacToeSessionSettings {
        TicTacToeSessionSettings {
            first_player_mode: self.first_player,
            strategy: self.strategy,
            opponent_delay: Duration::from_millis(self.opponent_delay_ms),
            decision_table: self.decision_table.clone(),
        }
    }

    pub fn session_rng(&self) -> SessionRng {
        match self.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        }
    }
}
