//! View state owned by the controller and the snapshot derived from it.
use api_types::{employee::Employee, transaction::Transaction};
use serde::Serialize;

use crate::{
    cache::Cache,
    stores::{FilteredTransactions, PaginatedTransactions},
};

/// Which store drives the transaction list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Every transaction, paged.
    #[default]
    All,
    /// One employee's transactions, unpaged.
    Filtered { employee_id: String },
}

/// UI flags owned by the controller.
///
/// Transitions consume the state and return the next one, so each step can
/// be checked without a store or a renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub mode: Mode,
    pub is_loading: bool,
    pub show_view_more: bool,
    /// Overlapping loads; `is_loading` holds until the last one finishes.
    pending_loads: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: Mode::All,
            is_loading: false,
            show_view_more: true,
            pending_loads: 0,
        }
    }
}

impl ViewState {
    /// A page of every transaction is about to load.
    pub fn begin_load_all(self) -> Self {
        Self {
            mode: Mode::All,
            is_loading: true,
            pending_loads: self.pending_loads + 1,
            ..self
        }
    }

    pub fn finish_load_all(self) -> Self {
        let pending_loads = self.pending_loads.saturating_sub(1);
        Self {
            is_loading: pending_loads > 0,
            pending_loads,
            ..self
        }
    }

    /// Paging does not apply to a single employee.
    pub fn enter_filtered(self, employee_id: impl Into<String>) -> Self {
        Self {
            mode: Mode::Filtered {
                employee_id: employee_id.into(),
            },
            show_view_more: false,
            ..self
        }
    }

    /// The "all employees" entry was picked: a fresh session may have more
    /// pages.
    pub fn reset_view_more(self) -> Self {
        Self {
            show_view_more: true,
            ..self
        }
    }

    /// One-way latch: once the pages are exhausted "view more" stays hidden
    /// until [`reset_view_more`](Self::reset_view_more).
    pub fn observe_pages(self, exhausted: bool) -> Self {
        if exhausted {
            Self {
                show_view_more: false,
                ..self
            }
        } else {
            self
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self.mode, Mode::Filtered { .. })
    }
}

/// The cache backing the visible list. Only one source is ever active, so
/// there is no precedence rule between the two transaction stores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "cache", rename_all = "snake_case")]
pub enum ActiveSource {
    All(Cache<PaginatedTransactions>),
    Filtered(Cache<FilteredTransactions>),
}

impl ActiveSource {
    pub fn transactions(&self) -> Option<&[Transaction]> {
        match self {
            Self::All(cache) => cache.data.as_ref().map(|page| page.data.as_slice()),
            Self::Filtered(cache) => cache.data.as_ref().map(|set| set.data.as_slice()),
        }
    }

    pub fn loading(&self) -> bool {
        match self {
            Self::All(cache) => cache.loading,
            Self::Filtered(cache) => cache.loading,
        }
    }
}

/// Everything the presentation layer reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub employees: Cache<Vec<Employee>>,
    pub source: ActiveSource,
    pub is_loading: bool,
    pub show_view_more: bool,
}

impl ViewSnapshot {
    /// `None` until the active store has fetched successfully. An empty
    /// slice is a successful, empty result.
    pub fn transactions(&self) -> Option<&[Transaction]> {
        self.source.transactions()
    }

    pub fn employees_loading(&self) -> bool {
        self.employees.loading
    }

    pub fn paginated_transactions_loading(&self) -> bool {
        matches!(&self.source, ActiveSource::All(cache) if cache.loading)
    }

    pub fn view_more_visible(&self) -> bool {
        matches!(self.source, ActiveSource::All(_))
            && self.transactions().is_some()
            && self.show_view_more
    }

    /// Entries of the employee filter: the "all employees" sentinel first,
    /// then the directory. Empty until the directory is loaded.
    pub fn filter_items(&self) -> Vec<Employee> {
        match &self.employees.data {
            Some(employees) => std::iter::once(Employee::all_employees())
                .chain(employees.iter().cloned())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// A choice made in the employee filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterSelection {
    AllEmployees,
    Employee(String),
}

impl From<&Employee> for FilterSelection {
    fn from(employee: &Employee) -> Self {
        if employee.is_all_employees() {
            Self::AllEmployees
        } else {
            Self::Employee(employee.id.clone())
        }
    }
}
