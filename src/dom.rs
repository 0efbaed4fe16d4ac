//! The parts of the listing page the search widget talks to.
//!
//! The page is owned by its host (a browser, or the `watch` command). The
//! widget only needs to look elements up by id, read attributes off the
//! search input and replace the contents of the results list.

use indexmap::IndexMap;
use maud::Markup;

pub const SEARCH_INPUT_ID: &str = "search-input";
pub const RECIPE_LIST_ID: &str = "recipe-list";

/// Attribute on the search input naming the index location.
pub const INDEX_ATTRIBUTE: &str = "data-search-index";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_ascii_lowercase(),
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: IndexMap<String, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The elements the recipe listing page exposes.
    ///
    /// `index_location` becomes the input's `data-search-index` attribute.
    pub fn recipe_page(index_location: Option<&str>) -> Self {
        let mut input = Element::new("input").with_attribute("type", "text");
        if let Some(location) = index_location {
            input = input.with_attribute(INDEX_ATTRIBUTE, location);
        }

        let mut document = Document::new();
        document.insert(SEARCH_INPUT_ID, input);
        document.insert(
            RECIPE_LIST_ID,
            Element::new("ul").with_attribute("class", "recipe-list"),
        );
        document
    }

    /// Add an element, replacing any element with the same id.
    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_owned(), element);
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }
}

/// The list the widget renders results into.
#[derive(Debug, Clone, Default)]
pub struct ResultsContainer {
    id: String,
    html: String,
    item_count: usize,
}

impl ResultsContainer {
    pub fn new(id: &str) -> Self {
        ResultsContainer {
            id: id.to_owned(),
            ..Default::default()
        }
    }

    /// Replace everything in the list with `items`.
    pub fn replace(&mut self, items: Markup, item_count: usize) {
        self.html = items.into_string();
        self.item_count = item_count;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }
}
