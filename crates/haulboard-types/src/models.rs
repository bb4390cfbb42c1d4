use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author side of a message in a driver's thread. Stored in the DB as the
/// lowercase string; anything else is rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Driver,
    Company,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Driver => "driver",
            Role::Company => "company",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub active: bool,
}

/// One day's assignment for one driver. At most one entry exists per
/// (driver, date) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub driver: String,
    pub date: String,
    pub destination: String,
    pub cargo: String,
    pub truck_number: String,
    pub company_message: String,
}

/// Schedule row as it appears in the history view — no id or driver, the
/// query is already scoped to one driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub destination: String,
    pub cargo: String,
    pub truck_number: String,
    pub company_message: String,
}

/// A chat-style note in one driver's thread. `timestamp` is assigned by the
/// store at insert; `date` is whatever the client sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub driver: String,
    pub role: Role,
    pub subject: String,
    pub message: String,
    pub date: String,
    pub timestamp: DateTime<Utc>,
    pub read_flag: bool,
}
