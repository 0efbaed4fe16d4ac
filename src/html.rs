use maud::{html, Markup, DOCTYPE};

use crate::data::*;

pub mod components;
pub mod pages;
mod wrappers;
