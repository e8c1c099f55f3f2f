//! Request domain types.

use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::id::RequestId;

/// Lifecycle state of a request.
///
/// Only `Pending` is ever assigned; there is no transition operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// One requested line item. `qty` is always positive once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    pub qty: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    #[serde(rename = "type")]
    pub kind: String,
    pub items: Vec<RequestItem>,
    pub status: RequestStatus,
    pub date: Day,
    pub employee_email: String,
}

impl Request {
    /// `Laptop (1), Mouse (2)`
    pub fn item_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{} ({})", item.name, item.qty))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
