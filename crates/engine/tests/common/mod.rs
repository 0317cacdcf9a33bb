#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use api_types::{
    employee::Employee,
    transaction::{PaginatedResponse, Transaction, TransactionPage, TransactionsByEmployee},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use engine::{EngineError, ResultEngine, TransactionsApi, ViewController};
use tokio::sync::Notify;

/// Suspends a request until the test releases it.
#[derive(Default)]
pub struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }

    /// Waits until a request is parked at the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// In-memory API answering from fixed pages, counting every call.
#[derive(Default)]
pub struct ScriptedApi {
    employees: Vec<Employee>,
    pages: Vec<PaginatedResponse<Transaction>>,
    by_employee: HashMap<String, Vec<Transaction>>,
    employee_calls: AtomicUsize,
    page_calls: AtomicUsize,
    by_employee_calls: AtomicUsize,
    requested_pages: Mutex<Vec<Option<u32>>>,
    employee_failures: Mutex<Vec<EngineError>>,
    page_failures: Mutex<Vec<EngineError>>,
    by_employee_failures: Mutex<Vec<EngineError>>,
    employee_gate: Mutex<Option<Arc<Gate>>>,
    page_gate: Mutex<Option<Arc<Gate>>>,
    by_employee_gate: Mutex<Option<Arc<Gate>>>,
}

impl ScriptedApi {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            ..Self::default()
        }
    }

    pub fn with_page(mut self, data: Vec<Transaction>, next_page: Option<u32>) -> Self {
        self.pages.push(PaginatedResponse { data, next_page });
        self
    }

    pub fn with_employee_transactions(mut self, employee_id: &str, data: Vec<Transaction>) -> Self {
        self.by_employee.insert(employee_id.to_string(), data);
        self
    }

    pub fn fail_next_employees(&self, err: EngineError) {
        self.employee_failures.lock().unwrap().push(err);
    }

    pub fn fail_next_page(&self, err: EngineError) {
        self.page_failures.lock().unwrap().push(err);
    }

    pub fn fail_next_by_employee(&self, err: EngineError) {
        self.by_employee_failures.lock().unwrap().push(err);
    }

    pub fn gate_employees(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.employee_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn gate_pages(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.page_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn gate_by_employee(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.by_employee_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn employee_calls(&self) -> usize {
        self.employee_calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn by_employee_calls(&self) -> usize {
        self.by_employee_calls.load(Ordering::SeqCst)
    }

    pub fn requested_pages(&self) -> Vec<Option<u32>> {
        self.requested_pages.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionsApi for ScriptedApi {
    async fn get_employees(&self) -> ResultEngine<Vec<Employee>> {
        self.employee_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.employee_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }

        if let Some(err) = self.employee_failures.lock().unwrap().pop() {
            return Err(err);
        }
        Ok(self.employees.clone())
    }

    async fn get_transaction_page(
        &self,
        request: TransactionPage,
    ) -> ResultEngine<PaginatedResponse<Transaction>> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_pages.lock().unwrap().push(request.page);

        let gate = self.page_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }

        if let Some(err) = self.page_failures.lock().unwrap().pop() {
            return Err(err);
        }
        let index = request.page.unwrap_or(0) as usize;
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| EngineError::InvalidRequest(format!("invalid page {index}")))
    }

    async fn get_transactions_by_employee(
        &self,
        request: TransactionsByEmployee,
    ) -> ResultEngine<Vec<Transaction>> {
        self.by_employee_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.by_employee_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }

        if let Some(err) = self.by_employee_failures.lock().unwrap().pop() {
            return Err(err);
        }
        self.by_employee
            .get(&request.employee_id)
            .cloned()
            .ok_or(EngineError::NotFound(request.employee_id))
    }
}

pub fn employee(id: &str, first_name: &str, last_name: &str) -> Employee {
    Employee {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

pub fn transaction(id: &str, employee: &Employee, amount_minor: i64) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount_minor,
        employee: employee.clone(),
        merchant: "Social Media Ads Inc".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        approved: false,
    }
}

pub fn transactions(prefix: &str, employee: &Employee, count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|n| transaction(&format!("{prefix}-{n}"), employee, 1_000 + n as i64))
        .collect()
}

pub fn ids(transactions: Option<&[Transaction]>) -> Vec<String> {
    transactions
        .unwrap_or_default()
        .iter()
        .map(|transaction| transaction.id.clone())
        .collect()
}

pub fn view_controller(api: &Arc<ScriptedApi>) -> ViewController {
    ViewController::builder()
        .api(Arc::clone(api) as Arc<dyn TransactionsApi>)
        .build()
        .unwrap()
}
