//! Core library for normalizing scraped FFXI game data.

pub mod error;
pub mod extract;
pub mod file_utils;
pub mod merchants;
pub mod mobdrops;
pub mod models;
pub mod recipe;

pub use error::{FfxiError, Result};
pub use recipe::{extract_crystals, normalize_recipes, referenced_item_names};
