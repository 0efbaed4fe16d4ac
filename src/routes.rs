use axum::extract::{Path as ReqPath, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use maud::Markup;

use crate::html;
use crate::search::{self, SearchTerm};
use crate::AppState;

pub mod components;
pub mod files;
pub mod pages;
