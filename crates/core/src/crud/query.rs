//! List filters and pagination

use mizan_domain::constants::{PAGE_PARAM, PER_PAGE_PARAM};
use mizan_domain::QueryParams;

/// What a list screen asks for
///
/// Blank filters are kept (the filter form round-trips) but never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filters: QueryParams,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key, value);
        self
    }

    pub fn filter_opt(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.filters.insert_opt(key, value);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Query string parameters: filters first, then pagination.
    pub fn to_params(&self) -> QueryParams {
        let mut params = self.filters.clone();
        params.insert_opt(PAGE_PARAM, self.page.map(|p| p.to_string()));
        params.insert_opt(PER_PAGE_PARAM, self.per_page.map(|p| p.to_string()));
        params
    }
}
