use std::{ops::ControlFlow, sync::Arc};

use api_types::transaction::{Transaction, TransactionsByEmployee};
use serde::Serialize;

use super::Fetch;
use crate::{
    EngineError, ResultEngine,
    api::TransactionsApi,
    cache::{Cache, CacheCell},
};

/// The complete transaction set of one employee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredTransactions {
    pub employee_id: String,
    pub data: Vec<Transaction>,
}

/// Unpaginated transactions for a single employee.
///
/// A fetch for another employee supersedes the one in flight; the older
/// response is dropped when it resolves.
pub struct ByEmployeeStore {
    api: Arc<dyn TransactionsApi>,
    cache: CacheCell<FilteredTransactions, String>,
}

impl ByEmployeeStore {
    pub fn new(api: Arc<dyn TransactionsApi>) -> Self {
        Self {
            api,
            cache: CacheCell::default(),
        }
    }

    /// Fetches every transaction of `employee_id` and replaces the cache.
    ///
    /// A failure clears the cache, so a set fetched earlier is never shown
    /// as the result of a request that just failed.
    pub async fn fetch_by_id(&self, employee_id: &str) -> ResultEngine<Fetch> {
        if employee_id.is_empty() {
            return Err(EngineError::InvalidRequest(
                "employee id cannot be empty".to_string(),
            ));
        }

        let admitted = self
            .cache
            .begin(employee_id.to_string(), |_, pending| match pending {
                Some(pending) if pending.as_str() == employee_id => ControlFlow::Break(Fetch::InFlight),
                Some(pending) => {
                    tracing::debug!(superseded = %pending, employee_id, "superseding employee fetch");
                    ControlFlow::Continue(())
                }
                None => ControlFlow::Continue(()),
            });
        let ticket = match admitted {
            ControlFlow::Continue((ticket, ())) => ticket,
            ControlFlow::Break(outcome) => {
                tracing::debug!(?outcome, employee_id, "employee transactions fetch skipped");
                return Ok(outcome);
            }
        };

        let request = TransactionsByEmployee {
            employee_id: employee_id.to_string(),
        };
        match self.api.get_transactions_by_employee(request).await {
            Ok(transactions) => {
                let received = transactions.len();
                let outcome = self.cache.commit(ticket, |data| {
                    *data = Some(FilteredTransactions {
                        employee_id: employee_id.to_string(),
                        data: transactions,
                    })
                });
                match outcome {
                    Fetch::Stale => {
                        tracing::debug!(employee_id, "dropping employee transactions fetched before invalidation")
                    }
                    _ => tracing::debug!(employee_id, received, "employee transactions loaded"),
                }
                Ok(outcome)
            }
            Err(err) => {
                if !self.cache.fail(ticket) {
                    tracing::debug!(employee_id, "ignoring failure of a superseded fetch: {err}");
                    return Ok(Fetch::Stale);
                }
                tracing::warn!(employee_id, "failed to load employee transactions: {err}");
                Err(err)
            }
        }
    }

    /// Drops the cached transactions. Any fetch in flight is discarded when
    /// it resolves.
    pub fn invalidate_data(&self) {
        self.cache.invalidate();
    }

    pub fn cache(&self) -> Cache<FilteredTransactions> {
        self.cache.snapshot()
    }

    pub fn loading(&self) -> bool {
        self.cache.is_loading()
    }

    pub fn has_data(&self) -> bool {
        self.cache.has_data()
    }
}
