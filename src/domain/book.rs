use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Customer, ReservationLedger};

pub type BookId = Uuid;

/// A book and the customers waiting for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub reservations: ReservationLedger<Customer>,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_reservations(title, Vec::new())
    }

    /// Create a book that takes ownership of an existing reservation list.
    pub fn with_reservations(title: impl Into<String>, reservations: Vec<Customer>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: Utc::now(),
            reservations: ReservationLedger::from_records(reservations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_has_no_reservations() {
        let book = Book::new("Refactoring");
        assert!(book.reservations.is_empty());
    }

    #[test]
    fn test_books_do_not_share_reservations() {
        let mut first = Book::new("Refactoring");
        let second = Book::new("Refactoring");

        first
            .reservations
            .add_reservation(Customer::new(1, "Kaio Silveira"), false);

        assert_eq!(first.reservations.len(), 1);
        assert!(second.reservations.is_empty());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_with_reservations() {
        let existing = vec![Customer::new(1, "Kaio Silveira")];
        let book = Book::with_reservations("Refactoring", existing.clone());
        assert_eq!(book.reservations.fetch_reservations(), existing);
    }
}
