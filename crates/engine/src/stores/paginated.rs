use std::{ops::ControlFlow, sync::Arc};

use api_types::transaction::{PaginatedResponse, Transaction, TransactionPage};

use super::Fetch;
use crate::{
    ResultEngine,
    api::TransactionsApi,
    cache::{Cache, CacheCell},
};

/// Transactions accumulated across pages, in fetch order.
///
/// `next_page` always comes from the most recent response.
pub type PaginatedTransactions = PaginatedResponse<Transaction>;

/// Page-by-page view over every transaction.
///
/// Pages are appended between invalidations; the accumulated list never
/// shrinks except through [`PaginatedStore::invalidate_data`].
pub struct PaginatedStore {
    api: Arc<dyn TransactionsApi>,
    cache: CacheCell<PaginatedTransactions>,
}

impl PaginatedStore {
    pub fn new(api: Arc<dyn TransactionsApi>) -> Self {
        Self {
            api,
            cache: CacheCell::default(),
        }
    }

    /// Fetches the page after the current cursor and appends it.
    ///
    /// The first call after creation or invalidation asks for the first
    /// page. Once a response reports no next page, further calls are
    /// answered with [`Fetch::Exhausted`] without touching the API.
    pub async fn fetch_all(&self) -> ResultEngine<Fetch> {
        let admitted = self.cache.begin((), |data, pending| {
            if pending.is_some() {
                return ControlFlow::Break(Fetch::InFlight);
            }
            match data {
                None => ControlFlow::Continue(TransactionPage { page: None }),
                Some(PaginatedResponse {
                    next_page: Some(page),
                    ..
                }) => ControlFlow::Continue(TransactionPage { page: Some(*page) }),
                Some(_) => ControlFlow::Break(Fetch::Exhausted),
            }
        });
        let (ticket, request) = match admitted {
            ControlFlow::Continue(admitted) => admitted,
            ControlFlow::Break(outcome) => {
                tracing::debug!(?outcome, "transaction page fetch skipped");
                return Ok(outcome);
            }
        };

        match self.api.get_transaction_page(request).await {
            Ok(page) => {
                let received = page.data.len();
                let next_page = page.next_page;
                let outcome = self.cache.commit(ticket, |data| {
                    let accumulated = data.get_or_insert_with(|| PaginatedResponse {
                        data: Vec::new(),
                        next_page: None,
                    });
                    accumulated.data.extend(page.data);
                    accumulated.next_page = page.next_page;
                });
                match outcome {
                    Fetch::Stale => {
                        tracing::debug!(page = ?request.page, "dropping page fetched before invalidation")
                    }
                    _ => tracing::debug!(page = ?request.page, received, ?next_page, "page appended"),
                }
                Ok(outcome)
            }
            Err(err) => {
                if !self.cache.release(ticket) {
                    tracing::debug!("ignoring failure of a page fetch made before invalidation: {err}");
                    return Ok(Fetch::Stale);
                }
                tracing::warn!(page = ?request.page, "failed to load transaction page: {err}");
                Err(err)
            }
        }
    }

    /// Drops every accumulated page and rewinds the cursor.
    ///
    /// Any page still in flight is discarded when it resolves.
    pub fn invalidate_data(&self) {
        self.cache.invalidate();
    }

    pub fn cache(&self) -> Cache<PaginatedTransactions> {
        self.cache.snapshot()
    }

    pub fn loading(&self) -> bool {
        self.cache.is_loading()
    }

    pub fn has_data(&self) -> bool {
        self.cache.has_data()
    }

    /// `true` after a successful fetch reported no further page.
    pub fn is_exhausted(&self) -> bool {
        self.cache
            .read(|data| data.is_some_and(|data| data.next_page.is_none()))
    }
}
