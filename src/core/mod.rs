//! # Core Application Logic
//!
//! This module contains Wellcheck's business logic.
//! It knows nothing about any specific UI technology.
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
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ Dispatcher │      │  Analysis  │
//!     │  Adapter   │      │  (timers,  │      │  service   │
//!     │ (ratatui)  │      │  requests) │      │  (HTTP)    │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all conversation state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`messages`]: Ordered chat log with transient typing indicators
//! - [`mood`]: Rolling seven-sample mood trend
//! - [`resources`]: Support resources panel
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod messages;
pub mod mood;
pub mod resources;
pub mod state;
