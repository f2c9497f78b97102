use rusqlite::{Connection, Result};

/// Initialize the greetings schema, applying any missing versions
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current_version < 1 {
        create_schema(conn)?;
        conn.execute("INSERT INTO schema_version (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Version 1. Photos are a JSON array of `/uploads/...` references in
/// upload order.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS greetings (
            id TEXT PRIMARY KEY NOT NULL,
            recipient_name TEXT NOT NULL CHECK(length(trim(recipient_name)) > 0),
            recipient_age INTEGER NOT NULL CHECK(recipient_age BETWEEN 1 AND 150),
            photos TEXT NOT NULL CHECK(json_valid(photos) AND json_array_length(photos) BETWEEN 2 AND 12),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    Ok(())
}
