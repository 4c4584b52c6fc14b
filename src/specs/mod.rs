// src/specs/mod.rs
//! # Page "specs" module
//!
//! This module hosts the **page-specific parsing specifications** for the two
//! documentation sites. Each spec focuses on a single page shape and encodes
//! *where the ground truth lives in the HTML* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML/JS parsing** for remote pages (`hierarchy.js`, class pages,
//!   the extended index, the globals page).
//! - **Selector choice & precedence** (e.g., mlabel spans over heading text
//!   when categorizing members).
//! - **Tolerant extraction** using `core::html` helpers (case-insensitive tag
//!   blocks, depth-aware element scanning, tag stripping, whitespace/entity
//!   normalization).
//! - **Light shaping** of results into `records::*` structs.
//!
//! ## What does **not** live here
//! - **Fetching/caching** — that's `source::DocSource` and the scrape
//!   iterators.
//! - **Type normalization policy** — `types::convert_type` (the extended spec
//!   applies it eagerly because that site hard-fails on leftover wrappers).
//! - **Emission** — `emit` consumes records, specs never write output.
//!
//! ## Conventions & invariants
//! - **Case-insensitive** tag detection; avoid brittle full-document regexes.
//! - Prefer **local scanning within known blocks** (`<div class="memitem">`,
//!   `<table class="params">`).
//! - Specs are testable **offline** against captured fixtures (saved HTML).
//!
//! In short: **`specs` knows how to read the pages.** Other layers decide when
//! to fetch, how to cache, and how to emit.

pub mod class_page;
pub mod extended_page;
pub mod hierarchy;
