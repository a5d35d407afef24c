//! # Glaze Architecture
//!
//! Glaze is the interactive layer of a pottery portfolio: filtering, sorting
//! and URL state for the gallery, an image lightbox, and a light/dark theme.
//! It is a library first. The browser glue and the `glaze` CLI are both
//! clients of the same core.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, normalizes query strings and flags          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Returns CmdResult, no I/O assumptions                    │
//! └─────────────────────────────────────────────────────────────┘
//!                │                                │
//!                ▼                                ▼
//! ┌───────────────────────────┐   ┌─────────────────────────────┐
//! │  Engine (gallery/,        │   │  Storage (store/, theme.rs) │
//! │  lightbox.rs) + binders   │   │  Catalog, Preferences       │
//! │  over dom::Document       │   │                             │
//! └───────────────────────────┘   └─────────────────────────────┘
//! ```
//!
//! The engine is pure: it takes piece records and a [`gallery::FilterState`]
//! and returns new values. Everything that touches a page goes through the
//! [`dom::Document`] trait, so the binders run unchanged against the
//! in-memory document used by tests and by `glaze render`.
//!
//! ## Testing Strategy
//!
//! 1. **Engine** (`gallery/`, `lightbox.rs`): exhaustive unit tests.
//! 2. **Binders** (`dom/`): driven through `MemoryDocument` with synthetic
//!    events.
//! 3. **Commands/API**: against `InMemoryCatalog` and `MemoryPreferences`.
//! 4. **CLI** (`tests/`): the binary against a temporary catalog.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per CLI command
//! - [`gallery`]: Filter, sort, query codec and presenter
//! - [`lightbox`]: Image viewer state machine
//! - [`dom`]: Document abstraction, in-memory document, binders, markup
//! - [`theme`]: Theme preference
//! - [`store`]: Piece catalog abstraction and implementations
//! - [`model`]: Piece records
//! - [`config`]: Configuration management
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod dom;
pub mod error;
pub mod gallery;
pub mod lightbox;
pub mod logging;
pub mod model;
pub mod store;
pub mod theme;
