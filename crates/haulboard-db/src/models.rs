/// Database row types — these map directly to SQLite rows.
/// Distinct from the haulboard-types API models to keep the DB layer
/// independent.

pub struct DriverRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub active: bool,
}

pub struct ScheduleRow {
    pub id: i64,
    pub driver: String,
    pub date: String,
    pub destination: String,
    pub cargo: String,
    pub truck_number: String,
    pub company_message: String,
}

pub struct HistoryRow {
    pub date: String,
    pub destination: String,
    pub cargo: String,
    pub truck_number: String,
    pub company_message: String,
}

pub struct MessageRow {
    pub id: i64,
    pub driver: String,
    pub role: String,
    pub subject: String,
    pub message: String,
    pub date: String,
    pub timestamp: String,
    pub read_flag: bool,
}
