use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use reqwest::{Client, Url};
use serde_json::Value;

use super::*;

/// Where an index is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    Http(Url),
    File(PathBuf),
}

impl IndexSource {
    /// Resolve an index location the way a page resolves a relative fetch.
    ///
    /// Absolute URLs are used as they are. Anything else is joined onto
    /// `base`, which is either the page's URL or a directory on disk.
    pub fn resolve(location: &str, base: &str) -> LoadResult<Self> {
        if let Ok(url) = Url::parse(location) {
            return Self::from_url(url);
        }

        match Url::parse(base) {
            Ok(base) => {
                let url = base
                    .join(location)
                    .map_err(|_| LoadError::Location(location.to_owned()))?;
                Self::from_url(url)
            }
            Err(_) => Ok(IndexSource::File(Path::new(base).join(location))),
        }
    }

    fn from_url(url: Url) -> LoadResult<Self> {
        match url.scheme() {
            "http" | "https" => Ok(IndexSource::Http(url)),
            "file" => url
                .to_file_path()
                .map(IndexSource::File)
                .map_err(|()| LoadError::Location(url.to_string())),
            _ => Err(LoadError::Location(url.to_string())),
        }
    }
}

impl Display for IndexSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexSource::Http(url) => write!(f, "{url}"),
            IndexSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The recipes a page searches over, in the order the index file lists them.
///
/// An index is only ever replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeIndex {
    recipes: Vec<Recipe>,
}

impl RecipeIndex {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        RecipeIndex { recipes }
    }

    /// Parse an index file.
    ///
    /// The document must be a json array. Elements that are not usable
    /// records are skipped with a warning instead of failing the load.
    pub fn from_json(bytes: &[u8]) -> LoadResult<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Array(values) = value else {
            return Err(LoadError::Shape(json_kind(&value)));
        };

        let mut recipes = Vec::with_capacity(values.len());
        for (position, value) in values.into_iter().enumerate() {
            match Recipe::from_value(position, value) {
                Ok(recipe) => recipes.push(recipe),
                Err(e) => log::warn!("skipping recipe: {e}"),
            }
        }

        Ok(RecipeIndex::new(recipes))
    }

    /// Fetch and parse the index at `source`.
    pub async fn load(source: &IndexSource, client: &Client) -> LoadResult<Self> {
        let bytes = match source {
            IndexSource::Http(url) => {
                let response = client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        url: url.to_string(),
                        status,
                    });
                }
                response.bytes().await?.to_vec()
            }
            IndexSource::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
        };

        Self::from_json(&bytes)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
