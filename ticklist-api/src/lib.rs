//! # Ticklist API Server Library
//!
//! HTTP surface of the ticklist service, built with Axum on top of
//! `ticklist-core`.
//!
//! ## Modules
//!
//! - `app`: Application state, router, and bearer-auth middleware
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
