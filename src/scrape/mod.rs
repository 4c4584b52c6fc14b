// src/scrape/mod.rs
//! Traversal layer: turns the navigation indexes into lazy, one-shot record
//! sequences. `specs` reads individual pages; this module decides which pages
//! to visit, in what order, and what happens when one of them is broken.

pub mod core_site;
pub mod extended;

pub use core_site::CoreClassIter;
pub use extended::{fetch_globals, ExtendedClassIter};
