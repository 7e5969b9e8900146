//! Headless rendering engine for the agency marketing site.
//!
//! The site's pages are synthesized from three externally owned static JSON
//! documents (`models.json`, `events.json`, `translations.json`). Each page
//! loader fetches what it needs, builds an owned element tree, and leaves
//! interactive behavior (carousel, unit toggles, section tabs, language
//! switches, the header hide-on-scroll) to explicit state machines that
//! mutate the tree.

pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod dom;
pub mod events;
pub mod fetch;
pub mod grid;
pub mod i18n;
pub mod mosaic;
pub mod portfolio;
pub mod storage;
