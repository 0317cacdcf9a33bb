use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod employee {
    use super::*;

    /// An employee from the company directory.
    ///
    /// The directory is fetched once per session and never mutated.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Employee {
        pub id: String,
        pub first_name: String,
        pub last_name: String,
    }

    impl Employee {
        /// Client-side pseudo-employee standing for "no filter".
        ///
        /// It is never returned by the API and carries an empty id.
        pub fn all_employees() -> Self {
            Self {
                id: String::new(),
                first_name: "All".to_string(),
                last_name: "Employees".to_string(),
            }
        }

        pub fn is_all_employees(&self) -> bool {
            self.id.is_empty()
        }

        /// Label shown in the employee filter.
        pub fn display_name(&self) -> String {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

pub mod transaction {
    use super::*;
    use crate::employee::Employee;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: String,
        /// Signed amount in minor units (cents).
        pub amount_minor: i64,
        pub employee: Employee,
        pub merchant: String,
        pub date: NaiveDate,
        pub approved: bool,
    }

    /// Request for one page of the full transaction list.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionPage {
        /// Page index taken from `next_page`. `None` asks for the first page.
        pub page: Option<u32>,
    }

    /// Request for every transaction of one employee. Not paginated.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionsByEmployee {
        pub employee_id: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaginatedResponse<T> {
        pub data: Vec<T>,
        /// Index of the next page, `None` once the result set is exhausted.
        pub next_page: Option<u32>,
    }
}
