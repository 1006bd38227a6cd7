//! Core library exports for the rental catalog.
//!
//! The `data` feature exposes the domain model, the taxonomy normalizer,
//! Diesel persistence and the service layer. The `cli` feature adds
//! configuration loading and the `migrate` binary.

#[cfg(feature = "data")]
pub mod catalog;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod normalizer;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;
