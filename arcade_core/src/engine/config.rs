use crate::logic::game::Difficulty;
use serde::{Deserialize, Serialize};

/// Hard ceiling for any configured depth.
pub const MAX_SEARCH_DEPTH: u8 = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Plies searched past the root's children, per difficulty
    pub easy_depth: u8,
    pub normal_depth: u8,
    pub hard_depth: u8,

    // Scoring
    pub prefer_fast_wins: bool,
    pub shortcut_forced_losses: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            easy_depth: 1,
            normal_depth: 2,
            hard_depth: 4,
            prefer_fast_wins: true,
            shortcut_forced_losses: true,
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    easy_depth: Option<u8>,
    normal_depth: Option<u8>,
    hard_depth: Option<u8>,
    prefer_fast_wins: Option<bool>,
    shortcut_forced_losses: Option<bool>,
}

impl EngineConfig {
    /// Overrides fields of `self` with whatever the JSON object names.
    pub fn merge_json(&self, json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;

        Ok(Self {
            easy_depth: json_config.easy_depth.unwrap_or(self.easy_depth),
            normal_depth: json_config.normal_depth.unwrap_or(self.normal_depth),
            hard_depth: json_config.hard_depth.unwrap_or(self.hard_depth),
            prefer_fast_wins: json_config
                .prefer_fast_wins
                .unwrap_or(self.prefer_fast_wins),
            shortcut_forced_losses: json_config
                .shortcut_forced_losses
                .unwrap_or(self.shortcut_forced_losses),
        })
    }

    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        Self::default().merge_json(json_str)
    }

    #[must_use]
    pub const fn with_depths(mut self, easy: u8, normal: u8, hard: u8) -> Self {
        self.easy_depth = easy;
        self.normal_depth = normal;
        self.hard_depth = hard;
        self
    }

    pub fn depth_for(&self, difficulty: Difficulty) -> u8 {
        let depth = match difficulty {
            Difficulty::Easy => self.easy_depth,
            Difficulty::Normal => self.normal_depth,
            Difficulty::Hard => self.hard_depth,
        };
        depth.min(MAX_SEARCH_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let config = EngineConfig::load_from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_config_partial() {
        let json = r#"{
            "hard_depth": 5,
            "prefer_fast_wins": false
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.hard_depth, 5);
        assert!(!config.prefer_fast_wins);
        // Others should be default
        assert_eq!(config.easy_depth, 1);
        assert!(config.shortcut_forced_losses);
    }

    #[test]
    fn test_merge_keeps_preset_values() {
        let preset = EngineConfig::default().with_depths(2, 3, 5);
        let config = preset.merge_json(r#"{ "normal_depth": 4 }"#).unwrap();
        assert_eq!(config.easy_depth, 2);
        assert_eq!(config.normal_depth, 4);
        assert_eq!(config.hard_depth, 5);
    }

    #[test]
    fn test_load_config_invalid_json() {
        assert!(EngineConfig::load_from_json("{ invalid json }").is_err());
        assert!(EngineConfig::load_from_json(r#"{ "easy_depth": -1 }"#).is_err());
    }

    #[test]
    fn test_depth_for_difficulty() {
        let config = EngineConfig::default().with_depths(1, 3, 200);
        assert_eq!(config.depth_for(Difficulty::Easy), 1);
        assert_eq!(config.depth_for(Difficulty::Normal), 3);
        assert_eq!(config.depth_for(Difficulty::Hard), MAX_SEARCH_DEPTH);
    }

    #[test]
    fn test_deserialize_absolute_config() {
        let json = r#"{ "easy_depth": 0 }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.easy_depth, 0);
        assert_eq!(config.hard_depth, 4);
    }
}
