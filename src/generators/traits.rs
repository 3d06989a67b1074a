//! Traits for generator system standardization.

use super::{GeneratedDocument, GeneratorError};
use crate::service_log::models::CanonicalRecord;

/// Trait for document generators.
pub trait Generator: Send + Sync {
    /// Render the record into a document on local storage.
    fn generate(&self, record: &CanonicalRecord) -> Result<GeneratedDocument, GeneratorError>;
}
