//! Stores owning the three caches the view is derived from.
//!
//! Each store owns its cache exclusively. Callers only reach it through
//! the store's fetch and invalidate operations.
pub use by_employee::{ByEmployeeStore, FilteredTransactions};
pub use employees::EmployeeStore;
pub use paginated::{PaginatedStore, PaginatedTransactions};

mod by_employee;
mod employees;
mod paginated;

/// What a store fetch did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fetch {
    /// A request completed and its result was written to the cache.
    Applied,
    /// The data is already cached; no request was issued.
    Cached,
    /// The last page reported no successor; no request was issued.
    Exhausted,
    /// Another fetch is outstanding; no request was issued.
    InFlight,
    /// The request completed after an invalidation or a newer fetch and its
    /// result was dropped.
    Stale,
}
