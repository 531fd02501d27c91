//! Generic record management
//!
//! One controller drives every record screen: list with filters and
//! pagination, fetch by slug, slug-uniqueness probe and guarded mutations
//! followed by a re-fetch of the list.

pub mod controller;
pub mod query;
pub mod schema;
pub mod schemas;

pub use controller::{CrudController, MutationOutcome};
use mizan_common::validation::ValidationError;
use mizan_domain::FieldErrors;
pub use query::ListQuery;
pub use schema::{ResourceSchema, SaveMode};
pub use schemas::*;

/// Field errors in the shape the backend uses for 422 responses.
pub fn to_field_errors(errors: &ValidationError) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, message) in errors.messages() {
        fields.insert(field, message);
    }
    fields
}
