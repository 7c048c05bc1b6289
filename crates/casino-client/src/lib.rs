//! Client for the credit wheel casino backend.
//!
//! The backend owns all state: profiles, balances, transactions, wheel
//! outcomes, manual payment requests and admin configuration. This crate
//! exposes that surface as the [`CasinoBackend`] trait and implements it over
//! HTTP in [`CasinoClient`].

mod backend;
mod client;
mod error;
mod types;

pub use backend::CasinoBackend;
pub use client::CasinoClient;
pub use error::CasinoError;
pub use types::*;
