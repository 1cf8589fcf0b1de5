//! This module contains the configuration structures used for deserializing
//! TOML files that describe named selector pools.
//!
//! ```toml
//! log_level = "debug"
//!
//! [pool.api]
//! items = "a=5, b=1, c=1"
//!
//! [pool.db]
//! items = ["10.0.0.1:5432", { item = "10.0.0.2:5432", weight = 3 }]
//! ```

use std::{collections::BTreeMap, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ParseError, SelectorRegistry, WeightedSelector};

/// Main configuration struct based on the TOML file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default::log_level")]
    pub log_level: String,

    /// Every `[pool.<name>]` table, keyed by name.
    #[serde(rename = "pool", default)]
    pub pools: BTreeMap<String, Pool>,
}

/// Description of a single named pool.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Pool {
    pub items: Items,
}

/// Items can be written inline as `"a=5,b=1"` or as a list.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum Items {
    Inline(String),
    List(Vec<Item>),
}

/// One element in an item list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "ItemOption")]
pub struct Item {
    pub item: String,
    pub weight: i64,
}

/// Allows specifying list elements with or without an explicit weight.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ItemOption {
    Simple(String),
    Weighted { item: String, weight: i64 },
}

impl From<ItemOption> for Item {
    fn from(value: ItemOption) -> Self {
        let (item, weight) = match value {
            ItemOption::Simple(item) => (item, default::weight()),
            ItemOption::Weighted { item, weight } => (item, weight),
        };

        Self { item, weight }
    }
}

mod default {
    //! Default values for some configuration options.

    pub fn log_level() -> String {
        String::from("info")
    }

    pub fn weight() -> i64 {
        1
    }
}

impl Config {
    /// Reads and deserializes the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        std::fs::read_to_string(path)?.parse()
    }

    /// Maps `log_level` to a [`tracing::Level`], falling back to `INFO`.
    pub fn max_level(&self) -> tracing::Level {
        match self.log_level.as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }
}

impl FromStr for Config {
    type Err = crate::Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(source)?)
    }
}

impl Pool {
    /// Builds a fresh selector holding the items of this pool, in order.
    pub fn selector(&self) -> Result<WeightedSelector<String>, ParseError> {
        match &self.items {
            Items::Inline(source) => source.parse(),
            Items::List(items) => {
                let mut selector = WeightedSelector::new();
                for Item { item, weight } in items {
                    selector.add(item.clone(), *weight);
                }
                Ok(selector)
            }
        }
    }
}

impl SelectorRegistry<String> {
    /// Creates a registry with one selector per pool of `config`.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        let registry = Self::new();

        for (name, pool) in &config.pools {
            let selector = pool.selector().map_err(|source| {
                warn!(pool = %name, "rejected pool items: {source}");
                crate::Error::Pool {
                    name: name.clone(),
                    source,
                }
            })?;

            debug!(pool = %name, items = selector.len(), "loaded pool");
            registry.insert(name.as_str(), selector);
        }

        Ok(registry)
    }
}
