use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

use crate::Database;
use crate::models::{DriverRow, HistoryRow, MessageRow, ScheduleRow};

/// Outcome of a schedule upsert. Only picks the response wording; nothing
/// branches on it downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl Database {
    // -- Drivers --

    pub fn active_drivers(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT name FROM driver_list WHERE active = 1 ORDER BY id ASC")?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(names)
        })
    }

    pub fn driver_by_name(&self, name: &str) -> Result<Option<DriverRow>> {
        self.with_conn(|conn| query_driver_by_name(conn, name))
    }

    /// With `require_unique_name` the existence check and the insert share a
    /// transaction, so two concurrent registrations of the same name cannot
    /// both pass the check.
    pub fn register_driver(
        &self,
        name: &str,
        phone: &str,
        address: &str,
        require_unique_name: bool,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            if require_unique_name && query_driver_by_name(&tx, name)?.is_some() {
                anyhow::bail!("Driver '{}' is already registered", name);
            }
            tx.execute(
                "INSERT INTO driver_list (name, phone, address, active) VALUES (?1, ?2, ?3, 1)",
                (name, phone, address),
            )?;
            tx.commit()?;
            Ok(())
        })
    }

    /// Soft-delete: flips `active` off and removes the driver's schedule and
    /// message history. One transaction, so a failure mid-cascade leaves no
    /// orphaned rows.
    pub fn deactivate_driver(&self, name: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute("UPDATE driver_list SET active = 0 WHERE name = ?1", [name])?;
            tx.execute("DELETE FROM schedule WHERE driver = ?1", [name])?;
            tx.execute("DELETE FROM messages WHERE driver = ?1", [name])?;
            tx.commit()?;
            Ok(())
        })
    }

    // -- Schedule --

    /// Insert-or-update keyed on (driver, date), preserving the row id on
    /// update. The check and the write share a transaction on the writer
    /// connection; UNIQUE(driver, date) backstops the invariant.
    pub fn upsert_schedule(
        &self,
        driver: &str,
        date: &str,
        destination: &str,
        cargo: &str,
        truck_number: &str,
        company_message: &str,
    ) -> Result<UpsertOutcome> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM schedule WHERE driver = ?1 AND date = ?2",
                    (driver, date),
                    |row| row.get(0),
                )
                .optional()?;

            let outcome = if existing.is_some() {
                tx.execute(
                    "UPDATE schedule SET destination = ?1, cargo = ?2, truck_number = ?3, company_message = ?4
                     WHERE driver = ?5 AND date = ?6",
                    params![destination, cargo, truck_number, company_message, driver, date],
                )?;
                UpsertOutcome::Updated
            } else {
                tx.execute(
                    "INSERT INTO schedule (driver, date, destination, cargo, truck_number, company_message)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![driver, date, destination, cargo, truck_number, company_message],
                )?;
                UpsertOutcome::Created
            };

            tx.commit()?;
            Ok(outcome)
        })
    }

    pub fn schedule_for_driver(&self, driver: &str) -> Result<Vec<ScheduleRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, driver, date, destination, cargo, truck_number, company_message
                 FROM schedule WHERE driver = ?1 ORDER BY date ASC",
            )?;
            let rows = stmt
                .query_map([driver], |row| {
                    Ok(ScheduleRow {
                        id: row.get(0)?,
                        driver: row.get(1)?,
                        date: row.get(2)?,
                        destination: row.get(3)?,
                        cargo: row.get(4)?,
                        truck_number: row.get(5)?,
                        company_message: row.get(6)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn history_for_driver(&self, driver: &str) -> Result<Vec<HistoryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT date, destination, cargo, truck_number, company_message
                 FROM schedule WHERE driver = ?1 ORDER BY date DESC",
            )?;
            let rows = stmt
                .query_map([driver], |row| {
                    Ok(HistoryRow {
                        date: row.get(0)?,
                        destination: row.get(1)?,
                        cargo: row.get(2)?,
                        truck_number: row.get(3)?,
                        company_message: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Messages --

    /// Appends a message. `timestamp` comes from the store's own clock at
    /// insert; `read_flag` starts unset.
    pub fn insert_message(
        &self,
        driver: &str,
        role: &str,
        subject: &str,
        message: &str,
        date: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO messages (driver, role, subject, message, date, timestamp, read_flag)
                 VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'), 0)",
                params![driver, role, subject, message, date],
            )?;
            Ok(())
        })
    }

    /// All of a driver's messages, oldest first. The id tiebreak keeps
    /// insertion order when two inserts land in the same clock second.
    pub fn messages_for_driver(&self, driver: &str) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, driver, role, subject, message, date, timestamp, read_flag
                 FROM messages WHERE driver = ?1 ORDER BY timestamp ASC, id ASC",
            )?;
            let rows = stmt
                .query_map([driver], |row| {
                    Ok(MessageRow {
                        id: row.get(0)?,
                        driver: row.get(1)?,
                        role: row.get(2)?,
                        subject: row.get(3)?,
                        message: row.get(4)?,
                        date: row.get(5)?,
                        timestamp: row.get(6)?,
                        read_flag: row.get(7)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Marks the driver-authored half of a thread as read. Idempotent.
    pub fn mark_messages_read(&self, driver: &str) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let count = conn.execute(
                "UPDATE messages SET read_flag = 1 WHERE driver = ?1 AND role = 'driver'",
                [driver],
            )?;
            Ok(count)
        })
    }

    /// Deletes messages older than the retention window. Idempotent.
    pub fn purge_expired_messages(&self, retention_days: u32) -> Result<usize> {
        let cutoff = format!("-{} days", retention_days);
        self.with_conn_mut(|conn| {
            let count = conn.execute(
                "DELETE FROM messages WHERE timestamp < datetime('now', ?1)",
                [cutoff.as_str()],
            )?;
            Ok(count)
        })
    }
}

fn query_driver_by_name(conn: &Connection, name: &str) -> Result<Option<DriverRow>> {
    let mut stmt = conn
        .prepare("SELECT id, name, phone, address, active FROM driver_list WHERE name = ?1")?;

    let row = stmt
        .query_row([name], |row| {
            Ok(DriverRow {
                id: row.get(0)?,
                name: row.get(1)?,
                phone: row.get(2)?,
                address: row.get(3)?,
                active: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}
