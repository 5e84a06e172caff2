//! # citas-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API**: `/register`, `/login`, `/appointments`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and [`CitasError`](citas_domain::error::CitasError)
//!   variants into HTTP status codes and JSON bodies
//!
//! ## Dependency rule
//! Depends on `citas-app` (for port traits and services) and `citas-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
