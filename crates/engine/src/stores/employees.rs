use std::{ops::ControlFlow, sync::Arc};

use api_types::employee::Employee;

use super::Fetch;
use crate::{
    ResultEngine,
    api::TransactionsApi,
    cache::{Cache, CacheCell},
};

/// Employee directory, fetched once and kept for the whole session.
///
/// There is no invalidation path: a failed fetch leaves the directory unset
/// so a later call can try again.
pub struct EmployeeStore {
    api: Arc<dyn TransactionsApi>,
    cache: CacheCell<Vec<Employee>>,
}

impl EmployeeStore {
    pub fn new(api: Arc<dyn TransactionsApi>) -> Self {
        Self {
            api,
            cache: CacheCell::default(),
        }
    }

    /// Fetches the directory unless it is already cached or being fetched.
    pub async fn fetch_all(&self) -> ResultEngine<Fetch> {
        let admitted = self.cache.begin((), |data, pending| {
            if data.is_some() {
                return ControlFlow::Break(Fetch::Cached);
            }
            if pending.is_some() {
                return ControlFlow::Break(Fetch::InFlight);
            }
            ControlFlow::Continue(())
        });
        let ticket = match admitted {
            ControlFlow::Continue((ticket, ())) => ticket,
            ControlFlow::Break(outcome) => {
                tracing::debug!(?outcome, "employee directory fetch skipped");
                return Ok(outcome);
            }
        };

        match self.api.get_employees().await {
            Ok(employees) => {
                tracing::debug!(count = employees.len(), "employee directory loaded");
                Ok(self.cache.commit(ticket, |data| *data = Some(employees)))
            }
            Err(err) => {
                self.cache.release(ticket);
                tracing::warn!("failed to load employee directory: {err}");
                Err(err)
            }
        }
    }

    pub fn cache(&self) -> Cache<Vec<Employee>> {
        self.cache.snapshot()
    }

    pub fn loading(&self) -> bool {
        self.cache.is_loading()
    }

    pub fn has_data(&self) -> bool {
        self.cache.has_data()
    }
}
