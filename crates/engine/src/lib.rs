//! Transaction data orchestration.
//!
//! Three stores cache the employee directory, the paged list of every
//! transaction, and the unpaged transactions of one employee. The
//! [`ViewController`] decides which of the two transaction stores is
//! authoritative and derives a single [`ViewSnapshot`] from them.
pub use api::TransactionsApi;
pub use cache::Cache;
pub use controller::{ViewController, ViewControllerBuilder};
pub use error::EngineError;
pub use stores::{
    ByEmployeeStore, EmployeeStore, Fetch, FilteredTransactions, PaginatedStore,
    PaginatedTransactions,
};
pub use view::{ActiveSource, FilterSelection, Mode, ViewSnapshot, ViewState};

mod api;
mod cache;
mod controller;
mod error;
mod stores;
mod view;

pub type ResultEngine<T> = Result<T, EngineError>;
