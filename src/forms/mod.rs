pub mod content;
pub mod filters;
pub mod places;
