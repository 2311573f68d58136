//! Client-side form validation: rule functions plus the per-field error map
//! they feed.

pub mod field_errors;
pub mod rules;

pub use field_errors::FieldErrors;

/// A form that can check its own fields before submission
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}
