//! # citas-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserRepository`: create and look up accounts
//!   - `AppointmentRepository`: CRUD for appointments
//!   - `PasswordHasher`: one-way salted hashing and verification
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AccountService`: register, login
//!   - `AppointmentService`: create, update, delete, list, get
//! - Orchestrate domain objects without knowing *how* persistence or hashing works
//!
//! ## Dependency rule
//! Depends on `citas-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
