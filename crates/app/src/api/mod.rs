//! Fixture-backed request collaborator.
//!
//! Serves the employee directory and transactions from a static JSON data
//! set, paging the full list the way the remote API does.
use std::{num::NonZeroUsize, path::Path, sync::Arc, time::Duration};

use api_types::{
    employee::Employee,
    transaction::{PaginatedResponse, Transaction, TransactionPage, TransactionsByEmployee},
};
use async_trait::async_trait;
use engine::{EngineError, ResultEngine, TransactionsApi};
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct DataSet {
    pub employees: Vec<Employee>,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone)]
pub struct FixtureApi {
    data: Arc<DataSet>,
    page_size: usize,
    latency: Duration,
}

impl FixtureApi {
    pub fn new(data: DataSet, page_size: NonZeroUsize, latency: Duration) -> Self {
        Self {
            data: Arc::new(data),
            page_size: page_size.get(),
            latency,
        }
    }

    pub async fn from_path(
        path: impl AsRef<Path>,
        page_size: NonZeroUsize,
        latency: Duration,
    ) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let data: DataSet = serde_json::from_str(&raw)?;
        tracing::debug!(
            employees = data.employees.len(),
            transactions = data.transactions.len(),
            "fixture data parsed"
        );
        Ok(Self::new(data, page_size, latency))
    }

    async fn respond(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl TransactionsApi for FixtureApi {
    async fn get_employees(&self) -> ResultEngine<Vec<Employee>> {
        self.respond().await;
        Ok(self.data.employees.clone())
    }

    async fn get_transaction_page(
        &self,
        request: TransactionPage,
    ) -> ResultEngine<PaginatedResponse<Transaction>> {
        self.respond().await;

        let page = request.page.unwrap_or(0);
        let total = self.data.transactions.len();
        let start = (page as usize).saturating_mul(self.page_size);
        if start > total {
            return Err(EngineError::InvalidRequest(format!("invalid page {page}")));
        }
        let end = (start + self.page_size).min(total);

        Ok(PaginatedResponse {
            data: self.data.transactions[start..end].to_vec(),
            next_page: (end < total).then_some(page + 1),
        })
    }

    async fn get_transactions_by_employee(
        &self,
        request: TransactionsByEmployee,
    ) -> ResultEngine<Vec<Transaction>> {
        self.respond().await;

        let employee_id = request.employee_id;
        if employee_id.is_empty() {
            return Err(EngineError::InvalidRequest(
                "employee id cannot be empty".to_string(),
            ));
        }
        if !self
            .data
            .employees
            .iter()
            .any(|employee| employee.id == employee_id)
        {
            return Err(EngineError::NotFound(employee_id));
        }

        Ok(self
            .data
            .transactions
            .iter()
            .filter(|transaction| transaction.employee.id == employee_id)
            .cloned()
            .collect())
    }
}
