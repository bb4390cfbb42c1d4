use serde::{Deserialize, Serialize};

use crate::models::Role;

// -- Schedule --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpsertScheduleRequest {
    pub driver: String,
    pub date: String,
    pub destination: String,
    pub cargo: String,
    pub truck_number: String,
    pub company_message: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendMessageRequest {
    pub driver: String,
    pub role: Role,
    pub subject: String,
    pub message: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkReadRequest {
    pub driver: String,
}

// -- Drivers --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterDriverRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteDriverRequest {
    pub name: String,
}

// -- Shared --

/// Fixed success envelope used by every mutating endpoint.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
