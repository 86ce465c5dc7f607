//! FILENAME: engine/src/config.rs
//! PURPOSE: Host-tunable settings for the expression engine.
//! CONTEXT: Loaded from JSON by the host (missing fields take their defaults)
//! and turned into parser options when the engine parses text.

use parser::{ParseOptions, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Nesting limit handed to the parser.
    pub max_depth: usize,
    /// Preload max, min, abs and the other built-in functions.
    pub builtin_functions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            builtin_functions: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parser options for this configuration. Zero-arity names come from the registry.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.max_depth,
            ..ParseOptions::default()
        }
    }
}
