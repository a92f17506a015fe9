//! Core library for tooltracker
//!
//! This crate implements the **Functional Core** of the tooltracker application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`tooltracker_core`** (this crate): domain models and pure state transitions, zero I/O
//! - **`tooltracker`**: HTTP client, async orchestration, rendering and CLI (the Imperative Shell)
//!
//! Nothing in here knows where catalog data comes from. The shell fetches it, this
//! crate decides what it means.
//!
//! # Module Organization
//!
//! - [`catalog`]: Tools, categories and stats, plus normalization of the API's sparse payloads
//! - [`filter`]: Category/pricing selection and the tool list query
//! - [`dashboard`]: The dashboard state machine with sequenced tool list requests
//!
//! # Example Usage
//!
//! ```rust
//! use tooltracker_core::dashboard::{FetchOutcome, ViewState};
//!
//! let mut state = ViewState::new();
//! let ticket = state.begin_initial().unwrap();
//! let newer = state.set_category("Writing").unwrap();
//!
//! // The newer request wins even if the older one resolves last.
//! state.apply_tools(newer.seq, FetchOutcome::Fresh(vec![]));
//! assert!(state.is_stale(ticket.seq));
//! ```

pub mod catalog;
pub mod dashboard;
pub mod filter;
