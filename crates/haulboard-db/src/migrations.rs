use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE driver_list (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                phone       TEXT NOT NULL,
                address     TEXT NOT NULL,
                active      INTEGER NOT NULL DEFAULT 1
            );

            CREATE TABLE schedule (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                driver          TEXT NOT NULL,
                date            TEXT NOT NULL,
                destination     TEXT NOT NULL,
                cargo           TEXT NOT NULL,
                truck_number    TEXT NOT NULL,
                company_message TEXT NOT NULL,
                UNIQUE(driver, date)
            );

            CREATE TABLE messages (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                driver      TEXT NOT NULL,
                role        TEXT NOT NULL,
                subject     TEXT NOT NULL,
                message     TEXT NOT NULL,
                date        TEXT NOT NULL,
                timestamp   TEXT NOT NULL DEFAULT (datetime('now')),
                read_flag   INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX idx_messages_driver_time
                ON messages(driver, timestamp);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    Ok(())
}
