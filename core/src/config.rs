use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Coins;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid engine config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Every tunable of the puzzle engines. Missing keys in an override document keep their defaults.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub economy: Economy,
    pub search: SearchRules,
    pub crossword: CrosswordRules,
    pub hangman: HangmanRules,
}

impl EngineConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Economy {
    pub starting_coins: Coins,
    pub search_reward: Coins,
    pub timed_search_reward: Coins,
    pub crossword_reward: Coins,
    pub hangman_reward: Coins,
    pub daily_reward: Coins,
    pub search_hint_cost: Coins,
    pub crossword_hint_cost: Coins,
    pub crossword_solve_cost: Coins,
    pub hangman_hint_cost: Coins,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            starting_coins: 10,
            search_reward: 5,
            timed_search_reward: 10,
            crossword_reward: 10,
            hangman_reward: 10,
            daily_reward: 10,
            search_hint_cost: 5,
            crossword_hint_cost: 2,
            crossword_solve_cost: 15,
            hangman_hint_cost: 5,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRules {
    /// Placement attempts per word before it is dropped.
    pub retries: usize,
    pub max_words: usize,
    pub timed_seconds: u64,
}

impl Default for SearchRules {
    fn default() -> Self {
        Self {
            retries: 50,
            max_words: 10,
            timed_seconds: 30,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosswordRules {
    /// Side length of the square crossword grid.
    pub size: u8,
    pub retries: usize,
    pub max_words: usize,
}

impl Default for CrosswordRules {
    fn default() -> Self {
        Self {
            size: 15,
            retries: 100,
            max_words: 10,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HangmanRules {
    pub max_wrong_guesses: u8,
}

impl Default for HangmanRules {
    fn default() -> Self {
        Self {
            max_wrong_guesses: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [economy]
            crossword_solve_cost = 20

            [hangman]
            max_wrong_guesses = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.economy.crossword_solve_cost, 20);
        assert_eq!(config.economy.crossword_hint_cost, 2);
        assert_eq!(config.hangman.max_wrong_guesses, 8);
        assert_eq!(config.search, SearchRules::default());
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(EngineConfig::from_toml_str("[search]\nretries = \"many\"").is_err());
    }
}
