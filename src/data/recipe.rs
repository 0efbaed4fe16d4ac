use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::{json_kind, RecordShapeError};

/// Identifier used to address a recipe's detail page.
///
/// Index files carry either strings or numbers here and both are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Text(String),
    Number(Number),
}

impl Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeId::Text(id) => f.write_str(id),
            RecipeId::Number(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        RecipeId::Text(id.to_owned())
    }
}

impl From<u64> for RecipeId {
    fn from(id: u64) -> Self {
        RecipeId::Number(id.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    id: RecipeId,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_time: Option<String>,

    /// Lower-cased title, computed once so filtering does not allocate.
    #[serde(skip)]
    search_key: String,
}

impl Recipe {
    pub fn new(id: impl Into<RecipeId>, title: impl Into<String>, total_time: Option<&str>) -> Self {
        let title = title.into();
        Recipe {
            id: id.into(),
            search_key: title.to_lowercase(),
            title,
            total_time: total_time.filter(|t| !t.is_empty()).map(str::to_owned),
        }
    }

    /// Build a recipe from one element of the index array.
    ///
    /// `position` is the element's place in the array and only shows up in
    /// errors and warnings. A missing or non-string title becomes the empty
    /// string, so the record still renders but only matches an empty search.
    pub fn from_value(position: usize, value: Value) -> Result<Self, RecordShapeError> {
        let Value::Object(mut fields) = value else {
            return Err(RecordShapeError::NotAnObject {
                position,
                kind: json_kind(&value),
            });
        };

        let id = match fields.remove("id") {
            Some(Value::String(id)) if !id.is_empty() => RecipeId::Text(id),
            Some(Value::Number(id)) => RecipeId::Number(id),
            _ => return Err(RecordShapeError::MissingId { position }),
        };

        let title = match fields.remove("title") {
            Some(Value::String(title)) => title,
            _ => {
                log::warn!("recipe {id} (record {position}) has no title");
                String::new()
            }
        };

        let total_time = match fields.remove("total_time") {
            Some(Value::String(time)) => Some(time),
            _ => None,
        };

        Ok(Recipe::new(id, title, total_time.as_deref()))
    }

    pub fn id(&self) -> &RecipeId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn total_time(&self) -> Option<&str> {
        self.total_time.as_deref()
    }

    /// The lower-cased title searches are matched against.
    pub fn search_key(&self) -> &str {
        &self.search_key
    }

    /// Link to the recipe's detail page, relative to the listing page.
    pub fn href(&self) -> String {
        format!("recipe/{}.html", self.id)
    }
}
