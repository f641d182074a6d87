//! # Core Navigation Logic
//!
//! This module contains navstack's sync engine and everything it needs.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Router (sync engine) │
//!                    │  • Action (intents)     │
//!                    │  • reduce()             │
//!                    │                         │
//!                    │  No I/O in the engine.  │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Replay   │      │  Your app  │
//!     │   host     │      │  scripts   │      │    host    │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`router`]: The `Router`: owns both paths and runs the sync pipelines
//! - [`action`]: The `NavigationAction` enum: push, set, remove_last
//! - [`path`]: `OpaquePath` and `ProjectedPath`
//! - [`reconcile`]: The two pipelines as pure functions
//! - [`observable`]: The publish/subscribe cell both paths live in
//! - [`page`]: Page and element capabilities, plus the type-erased `AnyPage`
//! - [`config`]: Layered configuration for the binary
//! - [`script`]: Scripted replays against a router

pub mod action;
pub mod config;
pub mod observable;
pub mod page;
pub mod path;
pub mod reconcile;
pub mod router;
pub mod script;

// Re-export commonly used types for convenience
pub use action::{NavigationAction, Reduced, RoutedAction};
pub use page::{AnyPage, Page};
pub use path::{OpaquePath, ProjectedEntry, ProjectedPath};
pub use router::Router;
