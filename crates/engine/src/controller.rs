//! The view controller: composes the three stores and drives mode switches.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    EngineError, ResultEngine,
    api::TransactionsApi,
    stores::{ByEmployeeStore, EmployeeStore, Fetch, PaginatedStore},
    view::{ActiveSource, FilterSelection, Mode, ViewSnapshot, ViewState},
};

/// Decides which store is authoritative and derives the visible list.
///
/// The controller never writes store caches directly; it only issues fetch
/// and invalidate commands and reads snapshots back.
pub struct ViewController {
    employees: EmployeeStore,
    paginated: PaginatedStore,
    by_employee: ByEmployeeStore,
    state: Mutex<ViewState>,
}

impl ViewController {
    /// Return a builder for `ViewController`.
    pub fn builder() -> ViewControllerBuilder {
        ViewControllerBuilder::default()
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, transition: impl FnOnce(ViewState) -> ViewState) {
        let mut state = self.lock_state();
        let current = std::mem::take(&mut *state);
        *state = transition(current);
    }

    pub fn state(&self) -> ViewState {
        self.lock_state().clone()
    }

    /// Loads the first page on startup, unless the directory is already
    /// loaded or loading.
    pub async fn start(&self) -> ResultEngine<()> {
        if self.employees.has_data() || self.employees.loading() {
            return Ok(());
        }
        self.load_all_transactions().await
    }

    /// Switches to (or stays in) all-transactions mode and fetches the next
    /// page.
    ///
    /// The employee directory is requested first and the page only after it
    /// resolved. If another load is still fetching the directory, that load
    /// fetches the page and this one returns without a request. `is_loading`
    /// is cleared on every exit path.
    pub async fn load_all_transactions(&self) -> ResultEngine<()> {
        self.by_employee.invalidate_data();
        self.update(ViewState::begin_load_all);
        tracing::info!("loading all transactions");

        let result = self.fetch_directory_then_page().await;
        self.update(ViewState::finish_load_all);
        result
    }

    async fn fetch_directory_then_page(&self) -> ResultEngine<()> {
        if self.employees.fetch_all().await? == Fetch::InFlight {
            tracing::debug!("directory still loading elsewhere, skipping page fetch");
            return Ok(());
        }

        if self.lock_state().is_filtered() {
            tracing::debug!("filter applied while the directory loaded, skipping page fetch");
            return Ok(());
        }

        let outcome = self.paginated.fetch_all().await?;
        if outcome == Fetch::Stale {
            return Ok(());
        }
        let exhausted = self.paginated.is_exhausted();
        self.update(|state| state.observe_pages(exhausted));
        Ok(())
    }

    /// Switches to one employee's transactions.
    pub async fn load_transactions_by_employee(&self, employee_id: &str) -> ResultEngine<()> {
        if employee_id.is_empty() {
            return Err(EngineError::InvalidRequest(
                "employee id cannot be empty".to_string(),
            ));
        }

        self.paginated.invalidate_data();
        self.update(|state| state.enter_filtered(employee_id));
        tracing::info!(employee_id, "loading transactions by employee");

        self.by_employee.fetch_by_id(employee_id).await?;
        Ok(())
    }

    /// Applies a choice from the employee filter. An empty choice is ignored.
    pub async fn select_filter(&self, selection: Option<FilterSelection>) -> ResultEngine<()> {
        match selection {
            None => {
                tracing::debug!("empty filter selection ignored");
                Ok(())
            }
            Some(FilterSelection::AllEmployees) => {
                // Re-enabled before loading so an exhausted first page still
                // hides the button.
                self.update(ViewState::reset_view_more);
                self.load_all_transactions().await
            }
            Some(FilterSelection::Employee(employee_id)) => {
                self.load_transactions_by_employee(&employee_id).await
            }
        }
    }

    /// Fetches the next page while "view more" is offered.
    pub async fn view_more(&self) -> ResultEngine<()> {
        if !self.snapshot().view_more_visible() {
            tracing::debug!("view more is not available");
            return Ok(());
        }
        self.load_all_transactions().await
    }

    /// Derives the state read by the presentation layer.
    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.state();
        let source = match &state.mode {
            Mode::All => ActiveSource::All(self.paginated.cache()),
            Mode::Filtered { employee_id } => {
                let mut cache = self.by_employee.cache();
                // Another employee's set is still cached until the new fetch lands.
                if cache
                    .data
                    .as_ref()
                    .is_some_and(|set| set.employee_id != *employee_id)
                {
                    cache.data = None;
                }
                ActiveSource::Filtered(cache)
            }
        };

        ViewSnapshot {
            employees: self.employees.cache(),
            source,
            is_loading: state.is_loading,
            show_view_more: state.show_view_more,
        }
    }

    pub fn employees(&self) -> &EmployeeStore {
        &self.employees
    }

    pub fn paginated(&self) -> &PaginatedStore {
        &self.paginated
    }

    pub fn by_employee(&self) -> &ByEmployeeStore {
        &self.by_employee
    }
}

#[derive(Default)]
pub struct ViewControllerBuilder {
    api: Option<Arc<dyn TransactionsApi>>,
}

impl ViewControllerBuilder {
    /// Pass the request collaborator shared by every store.
    pub fn api(mut self, api: Arc<dyn TransactionsApi>) -> ViewControllerBuilder {
        self.api = Some(api);
        self
    }

    /// Construct `ViewController`.
    pub fn build(self) -> ResultEngine<ViewController> {
        let api = self.api.ok_or(EngineError::MissingApi)?;
        Ok(ViewController {
            employees: EmployeeStore::new(Arc::clone(&api)),
            paginated: PaginatedStore::new(Arc::clone(&api)),
            by_employee: ByEmployeeStore::new(api),
            state: Mutex::new(ViewState::default()),
        })
    }
}
