use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

use crate::dom;
use crate::widget::Debouncer;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "recipe-search.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub widget: WidgetConfig,
    pub site: SiteConfig,
    pub server: ServerConfig,
}

/// How the search widget finds its elements and reacts to typing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub input_id: String,
    pub list_id: String,

    /// Index location used when the input carries no `data-search-index`.
    pub default_index: String,

    pub debounce: bool,
    pub quiet_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            input_id: dom::SEARCH_INPUT_ID.to_owned(),
            list_id: dom::RECIPE_LIST_ID.to_owned(),
            default_index: "search.json".to_owned(),
            debounce: true,
            quiet_ms: 300,
        }
    }
}

impl WidgetConfig {
    /// The quiet interval, or zero when every keystroke should render.
    pub fn quiet(&self) -> Duration {
        if self.debounce {
            Duration::from_millis(self.quiet_ms)
        } else {
            Duration::ZERO
        }
    }

    pub fn debouncer(&self) -> Debouncer {
        if self.debounce {
            Debouncer::new(self.quiet())
        } else {
            Debouncer::disabled()
        }
    }
}

/// The generated site the server hosts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding the index, `recipe/` pages and `static/` assets.
    pub dir: PathBuf,
    pub title: String,

    /// Index location the listing page advertises, relative to the page.
    pub index: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            dir: PathBuf::from("dist"),
            title: "Recipes".to_owned(),
            index: "search.json".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "0.0.0.0:3000".to_owned(),
        }
    }
}

impl Config {
    /// Read the configuration file.
    ///
    /// An explicit path must exist. Without one, the default path is read if
    /// present and built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }
}
