//! The live search widget.
//!
//! A widget is attached to a page, loads the recipe index once in the
//! background and re-renders the results list for every qualifying input
//! event. Everything runs on one task fed by one event queue: input events
//! and the finished index load are handled strictly in arrival order, and
//! rendering never suspends.

use std::time::Instant;

use reqwest::Client;
use thiserror::Error;
use tokio::{sync::mpsc, task::JoinHandle};

pub use debounce::Debouncer;

use crate::config::WidgetConfig;
use crate::data::{IndexSource, LoadResult, Recipe, RecipeIndex};
use crate::dom::{Document, ResultsContainer, INDEX_ATTRIBUTE};
use crate::html::components;
use crate::search::{self, SearchTerm};

mod debounce;

/// The page is missing something the widget needs. Nothing is wired up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no element with id `{0}` on the page")]
    MissingElement(String),

    #[error("element `{id}` is a <{found}>, expected {expected}")]
    WrongElement {
        id: String,
        found: String,
        expected: &'static str,
    },
}

/// Something that happened on the page.
#[derive(Debug)]
pub enum Event {
    /// The search input's full current value.
    Input(String),

    /// The background index load finished.
    Loaded(LoadResult<RecipeIndex>),
}

/// One pass of filtering and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub term: String,
    pub count: usize,
    pub html: String,
}

#[derive(Debug)]
pub struct SearchWidget {
    index: RecipeIndex,
    index_location: String,
    container: ResultsContainer,
    renders: u64,
}

impl SearchWidget {
    /// Find the search input and results list on `document`.
    ///
    /// The index location comes from the input's `data-search-index`
    /// attribute, falling back to the configured default. The index itself
    /// starts out empty.
    pub fn attach(document: &Document, config: &WidgetConfig) -> Result<Self, ConfigurationError> {
        let missing = |id: &str| ConfigurationError::MissingElement(id.to_owned());
        let input = document
            .element(&config.input_id)
            .ok_or_else(|| missing(&config.input_id))?;
        let list = document
            .element(&config.list_id)
            .ok_or_else(|| missing(&config.list_id))?;

        if input.tag() != "input" {
            return Err(ConfigurationError::WrongElement {
                id: config.input_id.clone(),
                found: input.tag().to_owned(),
                expected: "an <input>",
            });
        }
        if !matches!(list.tag(), "ul" | "ol") {
            return Err(ConfigurationError::WrongElement {
                id: config.list_id.clone(),
                found: list.tag().to_owned(),
                expected: "a <ul> or <ol>",
            });
        }

        let index_location = input
            .attribute(INDEX_ATTRIBUTE)
            .filter(|location| !location.trim().is_empty())
            .unwrap_or(&config.default_index)
            .to_owned();

        Ok(SearchWidget {
            index: RecipeIndex::default(),
            index_location,
            container: ResultsContainer::new(&config.list_id),
            renders: 0,
        })
    }

    pub fn index_location(&self) -> &str {
        &self.index_location
    }

    pub fn index(&self) -> &RecipeIndex {
        &self.index
    }

    pub fn container(&self) -> &ResultsContainer {
        &self.container
    }

    /// How many times the results list has been rendered.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Swap in a freshly loaded index, or report why loading failed.
    ///
    /// A failed load keeps whatever index and rendering were there before.
    /// Nothing is re-rendered; the next input event uses the new index.
    pub fn index_loaded(&mut self, result: LoadResult<RecipeIndex>) {
        match result {
            Ok(index) => self.index = index,
            Err(e) => log::error!("error loading recipe index from {}: {e}", self.index_location),
        }
    }

    /// Filter the index by `value` and replace the results list.
    pub fn search(&mut self, value: &str) -> Rendered {
        let term = SearchTerm::new(value);
        let found: Vec<&Recipe> = search::filter(self.index.recipes(), &term).collect();
        let count = found.len();

        self.container.replace(components::recipe_list(found), count);
        self.renders += 1;
        log::debug!(
            "rendered {count} recipes into #{} for {:?}",
            self.container.id(),
            term.as_str()
        );

        Rendered {
            term: term.as_str().to_owned(),
            count: self.container.item_count(),
            html: self.container.html().to_owned(),
        }
    }
}

/// Drive `widget` from `events` until the event queue closes.
///
/// Each render is published on `renders`. A value still waiting on the
/// debounce timer when the queue closes is rendered before returning.
pub async fn run(
    mut widget: SearchWidget,
    mut events: mpsc::Receiver<Event>,
    mut debouncer: Debouncer,
    renders: mpsc::UnboundedSender<Rendered>,
) -> SearchWidget {
    let publish = |rendered: Rendered| {
        // Nobody listening is fine; the list itself is still up to date.
        let _ = renders.send(rendered);
    };

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(Event::Input(value)) => {
                    if let Some(value) = debouncer.submit(value) {
                        publish(widget.search(&value));
                    }
                }
                Some(Event::Loaded(result)) => widget.index_loaded(result),
                None => break,
            },
            value = debouncer.fired() => publish(widget.search(&value)),
        }
    }

    if let Some(value) = debouncer.flush() {
        publish(widget.search(&value));
    }
    widget
}

/// A widget running on its own task.
pub struct WidgetHandle {
    events: mpsc::Sender<Event>,
    renders: mpsc::UnboundedReceiver<Rendered>,
    task: JoinHandle<SearchWidget>,
}

impl WidgetHandle {
    /// Send the search input's current value.
    ///
    /// Returns false if the widget has stopped.
    pub async fn input(&self, value: impl Into<String>) -> bool {
        self.events.send(Event::Input(value.into())).await.is_ok()
    }

    /// Wait for the next render.
    pub async fn rendered(&mut self) -> Option<Rendered> {
        self.renders.recv().await
    }

    /// Stop taking input and wait for the widget to wind down.
    ///
    /// Returns the renders that had not been received yet and the widget's
    /// final state. Waits for the index load if it is still running.
    pub async fn finish(self) -> Result<(Vec<Rendered>, SearchWidget), tokio::task::JoinError> {
        let WidgetHandle {
            events,
            mut renders,
            task,
        } = self;
        drop(events);

        let widget = task.await?;
        let mut remaining = Vec::new();
        while let Some(rendered) = renders.recv().await {
            remaining.push(rendered);
        }
        Ok((remaining, widget))
    }
}

/// Attach a widget to `document` and start it.
///
/// The index is fetched in the background, with relative locations resolved
/// against `base`. Input sent before the fetch finishes renders against an
/// empty index.
pub fn spawn(
    document: &Document,
    config: &WidgetConfig,
    base: String,
    client: Client,
) -> Result<WidgetHandle, ConfigurationError> {
    let widget = SearchWidget::attach(document, config)?;

    let (events, events_rx) = mpsc::channel(64);
    let (renders_tx, renders) = mpsc::unbounded_channel();

    let location = widget.index_location().to_owned();
    let loaded = events.clone();
    tokio::spawn(async move {
        let start = Instant::now();
        let result = match IndexSource::resolve(&location, &base) {
            Ok(source) => {
                let result = RecipeIndex::load(&source, &client).await;
                if let Ok(index) = &result {
                    log::info!(
                        "Index of {} recipes loaded from {source} in {:?}",
                        index.len(),
                        start.elapsed()
                    );
                }
                result
            }
            Err(e) => Err(e),
        };
        // The widget may have stopped already.
        let _ = loaded.send(Event::Loaded(result)).await;
    });

    let task = tokio::spawn(run(widget, events_rx, config.debouncer(), renders_tx));

    Ok(WidgetHandle {
        events,
        renders,
        task,
    })
}
