use serde::{Deserialize, Serialize};
use std::fmt;

/// Status an order carries through a batch run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    New,
    Exported,
    ExportFailed,
    Processed,
    Pending,
    Error,
    ApiError,
    ApiFailure,
    Completed,
    InProgress,
    UnknownType,
    DbError,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Exported => "exported",
            OrderStatus::ExportFailed => "export_failed",
            OrderStatus::Processed => "processed",
            OrderStatus::Pending => "pending",
            OrderStatus::Error => "error",
            OrderStatus::ApiError => "api_error",
            OrderStatus::ApiFailure => "api_failure",
            OrderStatus::Completed => "completed",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::UnknownType => "unknown_type",
            OrderStatus::DbError => "db_error",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Processing priority derived from the order amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Business category of an order, parsed from its raw type code.
///
/// Only the exact codes `A`, `B` and `C` are recognised. Anything else, including
/// an absent code, lowercase letters or padded whitespace, is [`OrderCategory::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderCategory {
    /// `A`: written to a report artifact
    Export,
    /// `B`: resolved through the remote lookup service
    Lookup,
    /// `C`: resolved from the order flag alone
    Flag,
    Unknown,
}

impl OrderCategory {
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("A") => OrderCategory::Export,
            Some("B") => OrderCategory::Lookup,
            Some("C") => OrderCategory::Flag,
            _ => OrderCategory::Unknown,
        }
    }
}

/// A single order belonging to a user's batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub category: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub flag: Option<bool>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub priority: Priority,
}

impl Order {
    pub fn new(id: i64, category: Option<String>, amount: f64, flag: Option<bool>) -> Self {
        Self {
            id,
            category,
            amount,
            flag,
            status: OrderStatus::New,
            priority: Priority::Low,
        }
    }

    pub fn category(&self) -> OrderCategory {
        OrderCategory::from_code(self.category.as_deref())
    }

    /// Absent flags count as false for every rule.
    pub fn is_flagged(&self) -> bool {
        self.flag.unwrap_or(false)
    }

    /// Lowercase text form used in report rows (`true`, `false` or `none`)
    pub fn flag_label(&self) -> &'static str {
        match self.flag {
            Some(true) => "true",
            Some(false) => "false",
            None => "none",
        }
    }
}
