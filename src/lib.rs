//! Core library exports for the tourism catalog editorial engine.
//!
//! The `data` feature exposes the storage-agnostic domain layer and its
//! rendering DTOs. The default `services` feature adds forms, repository
//! traits, configuration and the editorial service layer on top.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;

#[cfg(feature = "services")]
pub mod config;
#[cfg(feature = "services")]
pub mod error_conversions;
#[cfg(feature = "services")]
pub mod forms;
#[cfg(feature = "services")]
pub mod repository;
#[cfg(feature = "services")]
pub mod services;

#[cfg(feature = "data")]
pub use domain::locale::resolve_display;
#[cfg(feature = "data")]
pub use domain::moderation::{approve, reject, submit};
#[cfg(feature = "data")]
pub use domain::query::build_query;
#[cfg(feature = "data")]
pub use domain::validation::validate;
