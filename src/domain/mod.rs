//! Storage-agnostic editorial core: value objects, entities, the moderation
//! workflow, validation tables and list predicates.

pub mod errors;
pub mod geo;
pub mod locale;
pub mod moderation;
pub mod place;
pub mod query;
pub mod record;
pub mod types;
pub mod validation;
