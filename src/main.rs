use std::{path::PathBuf, sync::Arc, time::Instant};

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use clap::{Parser, Subcommand};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::TcpListener,
};

use config::Config;
use data::{IndexSource, RecipeIndex};
use dom::Document;

mod config;
mod data;
mod dom;
mod html;
mod routes;
mod search;
mod widget;

#[derive(Clone)]
pub struct AppState {
    index: Arc<RecipeIndex>,
    config: Arc<Config>,
}

#[derive(Parser)]
#[command(name = "recipe-search", version, about = "Live title search for a static recipe site")]
struct Cli {
    /// Configuration file (defaults to ./recipe-search.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the recipe listing page with live search.
    Serve {
        /// Address to listen on.
        #[arg(long)]
        bind: Option<String>,

        /// Directory of the generated site.
        #[arg(long)]
        site: Option<PathBuf>,
    },

    /// Run the search widget against stdin, one input value per line.
    Watch {
        /// Index location, as the page's data-search-index attribute would give it.
        #[arg(long)]
        index: Option<String>,

        /// Page URL or directory that relative index locations resolve against.
        #[arg(long, default_value = ".")]
        base: String,

        /// Render on every line instead of waiting for a pause.
        #[arg(long)]
        no_debounce: bool,

        /// Quiet interval in milliseconds before a render.
        #[arg(long)]
        quiet_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).context("error loading configuration")?;

    match cli.command.unwrap_or(Command::Serve {
        bind: None,
        site: None,
    }) {
        Command::Serve { bind, site } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(site) = site {
                config.site.dir = site;
            }
            serve(config).await
        }
        Command::Watch {
            index,
            base,
            no_debounce,
            quiet_ms,
        } => {
            if no_debounce {
                config.widget.debounce = false;
            }
            if let Some(quiet_ms) = quiet_ms {
                config.widget.quiet_ms = quiet_ms;
            }
            watch(config, index, base).await
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    let index_load_start = Instant::now();
    let source = IndexSource::File(config.site.dir.join(&config.site.index));
    let index = match RecipeIndex::load(&source, &reqwest::Client::new()).await {
        Ok(index) => {
            if index.is_empty() {
                log::warn!("{source} lists no recipes");
            }
            log::info!(
                "Index of {} recipes loaded from {source} in {:?}",
                index.len(),
                index_load_start.elapsed()
            );
            index
        }
        Err(e) => {
            log::error!("error loading recipe index from {source}: {e}");
            RecipeIndex::default()
        }
    };

    let bind = config.server.bind.clone();
    let state = AppState {
        index: Arc::new(index),
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/", get(routes::pages::home))
        .route(
            "/components/recipe-list",
            get(routes::components::recipe_list),
        )
        .route("/recipe/:page", get(routes::files::recipe))
        .route("/search.json", get(routes::files::search_index))
        .route("/static/:file", get(routes::files::asset))
        .with_state(state);

    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("error binding {bind}"))?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn watch(config: Config, index: Option<String>, base: String) -> Result<()> {
    let document = Document::recipe_page(index.as_deref());
    let mut handle = widget::spawn(&document, &config.widget, base, reqwest::Client::new())
        .context("error attaching search widget")?;

    let print = |rendered: widget::Rendered| {
        println!("<!-- {} recipes for {:?} -->", rendered.count, rendered.term);
        println!("{}", rendered.html);
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line.context("error reading stdin")? {
                Some(line) => {
                    if !handle.input(line).await {
                        break;
                    }
                }
                None => break,
            },
            Some(rendered) = handle.rendered() => print(rendered),
        }
    }

    let (remaining, widget) = handle.finish().await?;
    remaining.into_iter().for_each(print);
    log::debug!(
        "Search widget on #{} stopped after {} renders over {} recipes",
        widget.container().id(),
        widget.renders(),
        widget.index().len()
    );
    Ok(())
}
