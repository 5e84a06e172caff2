//! # citas-domain
//!
//! Pure domain model for the citas medical-appointment backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error taxonomy, timestamps
//! - Define **Users** (accounts that own appointments and authenticate)
//! - Define **Appointments** (scheduled visits with a lifecycle status)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod appointment;
pub mod user;
