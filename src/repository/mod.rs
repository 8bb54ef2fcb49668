//! Persistence seams consumed by the service layer.
//!
//! The editorial core is storage-agnostic: implementors receive fully
//! validated records and a [`CatalogQuery`] whose [`CatalogQuery::matches`]
//! predicate defines which records a listing must return.

use thiserror::Error;

use crate::domain::place::Place;
use crate::domain::query::CatalogQuery;
use crate::domain::record::ContentRecord;
use crate::domain::types::RecordId;


/// Failures reported by a persistence backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Stored data could not be turned back into domain types.
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("storage error: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Page selection for list queries. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Query parameters used when listing content records.
#[derive(Debug, Clone)]
pub struct RecordListQuery {
    /// Predicate every returned record must satisfy.
    pub query: CatalogQuery,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl RecordListQuery {
    pub fn new(query: CatalogQuery) -> Self {
        Self {
            query,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for content records.
pub trait ContentReader {
    /// List records matching the query. Returns the unpaginated total alongside the page.
    fn list_records(&self, query: RecordListQuery)
    -> RepositoryResult<(usize, Vec<ContentRecord>)>;
    /// Retrieve a record by its identifier.
    fn get_record_by_id(&self, id: &RecordId) -> RepositoryResult<Option<ContentRecord>>;
}

/// Write operations for content records.
pub trait ContentWriter {
    /// Allocate an identifier for a new record.
    fn next_record_id(&self) -> RepositoryResult<RecordId>;
    /// Insert or replace a record.
    fn save_record(&self, record: &ContentRecord) -> RepositoryResult<usize>;
    /// Delete a record by id.
    fn delete_record(&self, id: &RecordId) -> RepositoryResult<usize>;
}

/// Write operations for provinces and cities.
pub trait PlaceWriter {
    fn save_place(&self, place: &Place) -> RepositoryResult<usize>;
}
