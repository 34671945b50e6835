//! # recipebox
//!
//! Client library for the recipe-sharing backend.
//!
//! ## Overview
//!
//! recipebox covers the token-gated API access layer of the recipe app: it
//! keeps the login token and cached identity on disk, builds HTTP requests
//! that carry the bearer token, and exposes one repository per backend
//! resource. Repository calls never fail loudly; every failure is logged and
//! surfaces as `None` or `false`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Repositories                          │
//! │  recipes · books · shopping · meal plans · challenges ·     │
//! │  users · reviews · newsletter · feedback                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ApiClient                            │
//! │  base URL · bearer header injection · JSON in/out           │
//! └─────────────────────────────────────────────────────────────┘
//!          │                                       │
//!          ▼                                       ▼
//! ┌─────────────────┐                     ┌─────────────────┐
//! │    Transport    │                     │ CredentialStore │
//! │                 │                     │                 │
//! │ • reqwest       │                     │ • JWT + identity│
//! │ • scripted mock │                     │ • AES-GCM file  │
//! └─────────────────┘                     └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — HTTP client factory and transport seam
//! - [`auth`] — Credential store and JWT claims
//! - [`config`] — Configuration management
//! - [`dates`] — Timestamp parsing and relative labels
//! - [`models`] — Data models mirroring the backend JSON
//! - [`repos`] — Per-resource repositories
//! - [`storage`] — Public URLs for uploaded files
//! - [`text`] — Fuzzy matching and the profanity filter
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use recipebox::repos::{RecipeRepository, Repository};
//! use recipebox::{ApiClient, Config, CredentialStore};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let credentials = Arc::new(CredentialStore::open()?);
//! let api = Arc::new(ApiClient::from_config(&config, credentials)?);
//!
//! let recipes = RecipeRepository::new(api);
//! if let Some(list) = recipes.list().await {
//!     println!("{} recipes", list.len());
//! }
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/recipebox/0.1.0")]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::future_not_send)]
#![allow(clippy::missing_const_for_fn)]

pub mod api;
pub mod auth;
pub mod config;
pub mod dates;
pub mod models;
pub mod paths;
pub mod repos;
pub mod storage;
pub mod text;

// Re-export main types for convenience
pub use api::{ApiClient, CallError, ReqwestTransport, Transport};
pub use auth::{CredentialStore, Session};
pub use config::Config;
pub use repos::{Repository, SubscriptionResult};
pub use storage::StorageConfig;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
