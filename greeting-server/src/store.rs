use crate::error::AppError;
use greeting_core::{Greeting, NewGreeting};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

const GREETING_COLUMNS: &str = "id, recipient_name, recipient_age, photos";

fn greeting_from_row(row: &Row) -> rusqlite::Result<Greeting> {
    let photos: String = row.get(3)?;
    let photos = serde_json::from_str(&photos)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Greeting {
        id: row.get(0)?,
        recipient_name: row.get(1)?,
        recipient_age: row.get(2)?,
        photos,
    })
}

/// Validates and inserts a greeting under a fresh id
pub fn create_greeting(conn: &Connection, greeting: &NewGreeting) -> Result<Greeting, AppError> {
    greeting.validate()?;

    let id = Uuid::new_v4().to_string();
    let photos = serde_json::to_string(&greeting.photos)?;

    let created = conn.query_row(
        &format!(
            "INSERT INTO greetings ({GREETING_COLUMNS}) VALUES (?1, ?2, ?3, ?4)
             RETURNING {GREETING_COLUMNS}"
        ),
        params![
            id,
            greeting.recipient_name.trim(),
            greeting.recipient_age,
            photos
        ],
        greeting_from_row,
    )?;

    Ok(created)
}

pub fn get_greeting(conn: &Connection, id: &str) -> Result<Option<Greeting>, AppError> {
    let greeting = conn
        .query_row(
            &format!("SELECT {GREETING_COLUMNS} FROM greetings WHERE id = ?1"),
            params![id],
            greeting_from_row,
        )
        .optional()?;

    Ok(greeting)
}

pub fn count_greetings(conn: &Connection) -> Result<i64, AppError> {
    let count = conn.query_row("SELECT COUNT(*) FROM greetings", [], |row| row.get(0))?;
    Ok(count)
}

/// Shared connection for request handlers. Queries run on the blocking
/// pool so a slow disk never stalls the async workers.
pub struct GreetingStore {
    conn: Arc<Mutex<Connection>>,
}

impl GreetingStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn run<T, F>(&self, query: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, AppError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            // a panicked query leaves no open transaction behind
            let conn = conn.lock().unwrap_or_else(PoisonError::into_inner);
            query(&conn)
        })
        .await?
    }

    pub async fn create(&self, greeting: NewGreeting) -> Result<Greeting, AppError> {
        self.run(move |conn| create_greeting(conn, &greeting)).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Greeting>, AppError> {
        let id = id.to_string();
        self.run(move |conn| get_greeting(conn, &id)).await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.run(count_greetings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::init_schema;
    use greeting_core::ValidationError;
    use pretty_assertions::assert_eq;

    fn setup_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn photos(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("/uploads/photo-{i}.jpg")).collect()
    }

    #[test]
    fn test_create_and_get_greeting() {
        let conn = setup_test_db();
        let new = NewGreeting::new("Sam", 30, photos(3));

        let created = create_greeting(&conn, &new).unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.recipient_name, "Sam");
        assert_eq!(created.recipient_age, 30);
        assert_eq!(created.photos, photos(3));

        let loaded = get_greeting(&conn, &created.id).unwrap();
        assert_eq!(loaded, Some(created));
    }

    #[test]
    fn test_ids_are_unique() {
        let conn = setup_test_db();
        let new = NewGreeting::new("Sam", 30, photos(2));

        let a = create_greeting(&conn, &new).unwrap();
        let b = create_greeting(&conn, &new).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(count_greetings(&conn).unwrap(), 2);
    }

    #[test]
    fn test_get_unknown_id() {
        let conn = setup_test_db();
        assert_eq!(get_greeting(&conn, "does-not-exist").unwrap(), None);
    }

    #[test]
    fn test_invalid_greeting_is_not_stored() {
        let conn = setup_test_db();

        let err = create_greeting(&conn, &NewGreeting::new("Sam", 30, photos(1))).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::TooFewPhotos(1))
        ));

        let err = create_greeting(&conn, &NewGreeting::new("  ", 30, photos(2))).unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::NameRequired)));

        assert_eq!(count_greetings(&conn).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_store_wraps_connection() {
        let store = GreetingStore::new(setup_test_db());
        let created = store
            .create(NewGreeting::new("Ada", 7, photos(12)))
            .await
            .unwrap();

        let loaded = store.get(&created.id).await.unwrap();
        assert_eq!(loaded.map(|g| g.photos.len()), Some(12));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_store_survives_panicked_query() {
        let store = GreetingStore::new(setup_test_db());
        store
            .create(NewGreeting::new("Ada", 7, photos(2)))
            .await
            .unwrap();

        let conn = Arc::clone(&store.conn);
        let crashed = std::thread::spawn(move || {
            let _conn = conn.lock().unwrap();
            panic!("query crashed while holding the connection");
        })
        .join();
        assert!(crashed.is_err());
        assert!(store.conn.is_poisoned());

        assert_eq!(store.count().await.unwrap(), 1);
        let created = store
            .create(NewGreeting::new("Bea", 8, photos(2)))
            .await
            .unwrap();
        assert!(store.get(&created.id).await.unwrap().is_some());
    }
}
