//! # Core Application Logic
//!
//! This module contains EmotionEye's business logic.
//! It knows nothing about any specific UI technology or transport.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐               ┌──────────────┐
//!          │    TUI     │  spawns ───►  │   analysis   │
//!          │  Adapter   │  ◄─── Action  │  (reqwest)   │
//!          └────────────┘               └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`transcript`]: The chat message log
//! - [`stats`]: Session counters
//! - [`trend`]: Trend overlay and chart lifecycle
//! - [`replies`]: Bot message wording
//! - [`config`]: Settings and their override hierarchy

pub mod action;
pub mod config;
pub mod replies;
pub mod state;
pub mod stats;
pub mod transcript;
pub mod trend;
