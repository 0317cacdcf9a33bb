//! Request collaborator consumed by the stores.

use api_types::{
    employee::Employee,
    transaction::{PaginatedResponse, Transaction, TransactionPage, TransactionsByEmployee},
};
use async_trait::async_trait;

use crate::ResultEngine;

/// Remote API the stores fetch from.
///
/// Implementations own transport concerns (HTTP, retries, latency). Every
/// call either resolves with typed data or fails with an [`EngineError`].
///
/// [`EngineError`]: crate::EngineError
#[async_trait]
pub trait TransactionsApi: Send + Sync {
    /// Returns the complete employee directory.
    async fn get_employees(&self) -> ResultEngine<Vec<Employee>>;

    /// Returns one page of the full transaction list.
    async fn get_transaction_page(
        &self,
        request: TransactionPage,
    ) -> ResultEngine<PaginatedResponse<Transaction>>;

    /// Returns every transaction of a single employee.
    async fn get_transactions_by_employee(
        &self,
        request: TransactionsByEmployee,
    ) -> ResultEngine<Vec<Transaction>>;
}
