use tracing::{debug, info, warn};

use crate::domain::{Book, Customer, RegionGroup, Reservation};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations over books and reservations.
/// This is the primary interface for any client (CLI, importers, tests).
pub struct CirculationService {
    repo: Repository,
}

/// Result of taking a reservation
pub struct ReservationResult {
    pub book_title: String,
    /// Zero-based place in the book's queue
    pub position: usize,
    pub reservation: Reservation<Customer>,
}

impl CirculationService {
    /// Create a new service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        info!(database = database_path, "database initialized");
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        debug!(database = database_path, "connected");
        Ok(Self::new(repo))
    }

    // ========================
    // Book operations
    // ========================

    /// Create a new book with an empty reservation list.
    pub async fn create_book(&self, title: &str) -> Result<Book, AppError> {
        self.create_book_with_reservations(title, Vec::new()).await
    }

    /// Create a new book seeded with existing reservations.
    pub async fn create_book_with_reservations(
        &self,
        title: &str,
        reservations: Vec<Customer>,
    ) -> Result<Book, AppError> {
        if self.repo.get_book_by_title(title).await?.is_some() {
            return Err(AppError::BookAlreadyExists(title.to_string()));
        }

        let book = Book::with_reservations(title, reservations);
        self.repo.save_book(&book).await?;
        info!(title, seeded = book.reservations.len(), "book created");
        Ok(book)
    }

    /// Get a book by title.
    pub async fn get_book(&self, title: &str) -> Result<Book, AppError> {
        self.repo
            .get_book_by_title(title)
            .await?
            .ok_or_else(|| AppError::BookNotFound(title.to_string()))
    }

    /// List all books.
    pub async fn list_books(&self) -> Result<Vec<Book>, AppError> {
        Ok(self.repo.list_books().await?)
    }

    // ========================
    // Reservation operations
    // ========================

    /// Reserve a book for a customer.
    ///
    /// `is_priority` is optional because it comes from untyped input; a missing
    /// flag is rejected before anything is written.
    pub async fn add_reservation(
        &self,
        title: &str,
        customer: Customer,
        is_priority: Option<bool>,
    ) -> Result<ReservationResult, AppError> {
        let mut book = self.get_book(title).await?;
        let position = book.reservations.len();

        let reservation = match book.reservations.try_add_reservation(customer, is_priority) {
            Ok(entry) => entry.clone(),
            Err(err) => {
                warn!(title, error = %err, "reservation rejected");
                return Err(err.into());
            }
        };

        self.repo
            .append_reservation(book.id, position, &reservation)
            .await?;

        info!(
            title,
            customer_id = reservation.record.id,
            position,
            priority = reservation.is_priority,
            "reservation added"
        );

        Ok(ReservationResult {
            book_title: book.title,
            position,
            reservation,
        })
    }

    /// Customers holding reservations for a book, in reservation order.
    pub async fn fetch_reservations(&self, title: &str) -> Result<Vec<Customer>, AppError> {
        Ok(self.get_book(title).await?.reservations.fetch_reservations())
    }

    /// Customers holding priority reservations for a book, in reservation order.
    pub async fn priority_reservations(&self, title: &str) -> Result<Vec<Customer>, AppError> {
        Ok(self.get_book(title).await?.reservations.priority_records())
    }

    /// Number of reservations stored for a book.
    pub async fn count_reservations(&self, title: &str) -> Result<i64, AppError> {
        let book = self.get_book(title).await?;
        Ok(self.repo.count_reservations(book.id).await?)
    }
}

// ========================
// Region operations
// ========================

/// Look up a region group by its slug (e.g. "new-england").
pub fn region_group(name: &str) -> Result<RegionGroup, AppError> {
    RegionGroup::from_name(name).ok_or_else(|| AppError::UnknownRegion(name.to_string()))
}

/// Ids of the customers whose state falls inside the group, in input order.
pub fn customers_in_region(group: &RegionGroup, customers: &[Customer]) -> Vec<i64> {
    let ids: Vec<i64> = group.filter(customers).iter().map(|c| c.id).collect();
    debug!(group = group.slug, matched = ids.len(), total = customers.len(), "region filter");
    ids
}

/// One-line summary such as `new englanders: 1, 2, 3, 4`.
pub fn region_summary(group: &RegionGroup, ids: &[i64]) -> String {
    let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("{}: {}", group.demonym, ids.join(", "))
}
