//! Per-resource rules plugged into the generic controller

use mizan_common::validation::ValidationError;
use mizan_domain::{Record, ResourceKind};

/// Whether a record is being created or edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

pub trait ResourceSchema: Send + Sync + 'static {
    /// Endpoint family the records live under
    const KIND: ResourceKind;

    /// Form field a slug collision is reported on
    const UNIQUE_FIELD: &'static str = "name";

    type Record: Record;

    /// Client-side rules checked before anything is sent.
    ///
    /// # Errors
    /// Every failing field, with its message.
    fn validate(_record: &Self::Record, _mode: SaveMode) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Name the backend derives the slug from; `None` skips the uniqueness
    /// probe.
    fn unique_name(_record: &Self::Record) -> Option<&str> {
        None
    }

    /// Slug the record already has on the backend; an edit that derives the
    /// same one skips the uniqueness probe.
    fn slug_of(record: &Self::Record) -> Option<&str> {
        record.slug()
    }
}
