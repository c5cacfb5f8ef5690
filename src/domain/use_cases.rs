pub mod extractors;
pub mod profile;
pub mod sanitizer;
pub mod validation;
