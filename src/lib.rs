//! Linux command reference: a curated catalog of shell commands with
//! category-scoped, all-terms-must-match search, plus the bookmark, history,
//! export and AI-suggestion pieces around it.

pub mod api;
pub mod bookmarks;
pub mod catalog;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod history;
pub mod io_util;
pub mod logging;
pub mod search;
pub mod seed;
pub mod suggest;
pub mod text;

pub use catalog::{Catalog, MemoryCatalog};
pub use command::{Category, Command, CommandParameter, NewCommand};
pub use error::{Error, Result};
pub use search::SearchEngine;
