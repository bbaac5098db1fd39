use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{Address, Book, BookId, Customer, Reservation, ReservationLedger};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting books and their reservation ledgers.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Book operations
    // ========================

    /// Save a new book together with any reservations it already holds.
    pub async fn save_book(&self, book: &Book) -> Result<()> {
        let mut tx = self.pool.begin().await.context("Failed to open transaction")?;

        sqlx::query("INSERT INTO books (id, title, created_at) VALUES (?, ?, ?)")
            .bind(book.id.to_string())
            .bind(&book.title)
            .bind(book.created_at.to_rfc3339())
            .execute(&mut *tx)
            .await
            .context("Failed to save book")?;

        for (position, entry) in book.reservations.entries().iter().enumerate() {
            Self::insert_reservation(&mut tx, book.id, position as i64, entry).await?;
        }

        tx.commit().await.context("Failed to commit book")?;
        Ok(())
    }

    /// Get a book by title, with its reservations in order.
    pub async fn get_book_by_title(&self, title: &str) -> Result<Option<Book>> {
        let row = sqlx::query("SELECT id, title, created_at FROM books WHERE title = ?")
            .bind(title)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch book by title")?;

        match row {
            Some(row) => Ok(Some(self.row_to_book(&row).await?)),
            None => Ok(None),
        }
    }

    /// List all books ordered by title.
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query("SELECT id, title, created_at FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list books")?;

        let mut books = Vec::with_capacity(rows.len());
        for row in &rows {
            books.push(self.row_to_book(row).await?);
        }
        Ok(books)
    }

    async fn row_to_book(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Book> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");
        let id = Uuid::parse_str(&id_str).context("Invalid book ID")?;

        Ok(Book {
            id,
            title: row.get("title"),
            created_at: parse_timestamp(&created_at_str).context("Invalid created_at timestamp")?,
            reservations: ReservationLedger::from_entries(self.list_reservations(id).await?),
        })
    }

    // ========================
    // Reservation operations
    // ========================

    /// Append a reservation at the given position.
    /// Fails if the position is already taken.
    pub async fn append_reservation(
        &self,
        book_id: BookId,
        position: usize,
        entry: &Reservation<Customer>,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await.context("Failed to open transaction")?;
        Self::insert_reservation(&mut tx, book_id, position as i64, entry).await?;
        tx.commit().await.context("Failed to commit reservation")?;
        Ok(())
    }

    async fn insert_reservation(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        book_id: BookId,
        position: i64,
        entry: &Reservation<Customer>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reservations (book_id, position, customer_id, customer_name, customer_state, is_priority, reserved_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(book_id.to_string())
        .bind(position)
        .bind(entry.record.id)
        .bind(&entry.record.name)
        .bind(entry.record.state())
        .bind(entry.is_priority)
        .bind(entry.reserved_at.to_rfc3339())
        .execute(&mut **tx)
        .await
        .context("Failed to save reservation")?;
        Ok(())
    }

    /// List reservations for a book in the order they were taken.
    pub async fn list_reservations(&self, book_id: BookId) -> Result<Vec<Reservation<Customer>>> {
        let rows = sqlx::query(
            r#"
            SELECT customer_id, customer_name, customer_state, is_priority, reserved_at
            FROM reservations
            WHERE book_id = ?
            ORDER BY position
            "#,
        )
        .bind(book_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list reservations")?;

        rows.iter().map(Self::row_to_reservation).collect()
    }

    /// Number of reservations stored for a book.
    pub async fn count_reservations(&self, book_id: BookId) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM reservations WHERE book_id = ?")
            .bind(book_id.to_string())
            .fetch_one(&self.pool)
            .await
            .context("Failed to count reservations")?;
        Ok(row.get("count"))
    }

    fn row_to_reservation(row: &sqlx::sqlite::SqliteRow) -> Result<Reservation<Customer>> {
        let state: Option<String> = row.get("customer_state");
        let reserved_at_str: String = row.get("reserved_at");

        Ok(Reservation {
            record: Customer {
                id: row.get("customer_id"),
                name: row.get("customer_name"),
                address: state.map(|state| Address { state }),
            },
            is_priority: row.get::<i32, _>("is_priority") != 0,
            reserved_at: parse_timestamp(&reserved_at_str)
                .context("Invalid reserved_at timestamp")?,
        })
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}
