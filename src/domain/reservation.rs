use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message carried by [`ReservationError::InvalidArgument`] when a priority flag is missing.
pub const PRIORITY_REQUIRED: &str = "Expected the isPriority: Boolean parameter to be provided.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    #[error("{0}")]
    InvalidArgument(String),
}

/// A single entry in a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation<T> {
    pub record: T,
    pub is_priority: bool,
    pub reserved_at: DateTime<Utc>,
}

impl<T> Reservation<T> {
    pub fn new(record: T, is_priority: bool) -> Self {
        Self {
            record,
            is_priority,
            reserved_at: Utc::now(),
        }
    }
}

/// Append-only list of reservations, kept in the order they were taken.
///
/// Records are opaque to the ledger: whatever goes in comes back out unchanged.
/// There is no removal; a ledger only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationLedger<T> {
    entries: Vec<Reservation<T>>,
}

impl<T> Default for ReservationLedger<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Clone> ReservationLedger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a ledger with existing records. Seeded entries are non-priority.
    pub fn from_records(records: Vec<T>) -> Self {
        Self {
            entries: records
                .into_iter()
                .map(|record| Reservation::new(record, false))
                .collect(),
        }
    }

    /// Rebuild a ledger from previously stored entries, keeping their order.
    pub fn from_entries(entries: Vec<Reservation<T>>) -> Self {
        Self { entries }
    }

    /// Append a reservation. New entries always go last.
    pub fn add_reservation(&mut self, record: T, is_priority: bool) -> &Reservation<T> {
        self.entries.push(Reservation::new(record, is_priority));
        &self.entries[self.entries.len() - 1]
    }

    /// Append a reservation whose priority comes from untyped input.
    ///
    /// A missing flag is rejected before anything is appended.
    pub fn try_add_reservation(
        &mut self,
        record: T,
        is_priority: Option<bool>,
    ) -> Result<&Reservation<T>, ReservationError> {
        let is_priority = is_priority
            .ok_or_else(|| ReservationError::InvalidArgument(PRIORITY_REQUIRED.to_string()))?;
        Ok(self.add_reservation(record, is_priority))
    }

    /// One-argument form kept for callers that predate priority reservations.
    #[cfg(feature = "legacy-api")]
    #[deprecated(since = "0.1.0", note = "use `add_reservation` with an explicit priority")]
    pub fn add_reservation_legacy(&mut self, record: T) -> &Reservation<T> {
        self.add_reservation(record, false)
    }

    /// Owned copy of the records in reservation order.
    pub fn fetch_reservations(&self) -> Vec<T> {
        self.entries.iter().map(|e| e.record.clone()).collect()
    }

    pub fn priority_records(&self) -> Vec<T> {
        self.entries
            .iter()
            .filter(|e| e.is_priority)
            .map(|e| e.record.clone())
            .collect()
    }

    pub fn entries(&self) -> &[Reservation<T>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Customer;

    fn a_customer() -> Customer {
        Customer::new(1, "Kaio Silveira")
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger: ReservationLedger<Customer> = ReservationLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.fetch_reservations(), Vec::<Customer>::new());
    }

    #[test]
    fn test_add_reservation_single() {
        let mut ledger = ReservationLedger::new();
        ledger.add_reservation(Customer::new(1, "A"), false);

        let reservations = ledger.fetch_reservations();
        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations, vec![Customer::new(1, "A")]);
    }

    #[test]
    fn test_seeded_ledger_appends_last() {
        let existing = vec![Customer::new(1, "A"), Customer::new(2, "B")];
        let mut ledger = ReservationLedger::from_records(existing.clone());

        ledger.add_reservation(Customer::new(3, "C"), true);

        let mut expected = existing;
        expected.push(Customer::new(3, "C"));
        assert_eq!(ledger.fetch_reservations(), expected);
    }

    #[test]
    fn test_seeded_ledger_returns_existing() {
        let existing = vec![a_customer()];
        let ledger = ReservationLedger::from_records(existing.clone());
        assert_eq!(ledger.fetch_reservations(), existing);
    }

    #[test]
    fn test_fetch_returns_detached_copy() {
        let mut ledger = ReservationLedger::new();
        ledger.add_reservation(a_customer(), false);

        let mut snapshot = ledger.fetch_reservations();
        snapshot.push(Customer::new(99, "Intruder"));
        snapshot[0].name = "Changed".into();

        assert_eq!(ledger.fetch_reservations(), vec![a_customer()]);
    }

    #[test]
    fn test_both_priorities_append_one_entry() {
        let mut ledger = ReservationLedger::new();

        ledger.add_reservation(a_customer(), true);
        assert_eq!(ledger.len(), 1);

        ledger.add_reservation(a_customer(), false);
        assert_eq!(ledger.len(), 2);

        assert!(ledger.entries()[0].is_priority);
        assert!(!ledger.entries()[1].is_priority);
    }

    #[test]
    fn test_try_add_without_priority_fails_without_mutation() {
        let mut ledger = ReservationLedger::from_records(vec![a_customer()]);

        let result = ledger.try_add_reservation(Customer::new(2, "B"), None);

        assert_eq!(
            result.unwrap_err(),
            ReservationError::InvalidArgument(PRIORITY_REQUIRED.to_string())
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_try_add_with_priority_succeeds() {
        let mut ledger = ReservationLedger::new();

        let entry = ledger
            .try_add_reservation(a_customer(), Some(true))
            .unwrap();
        assert!(entry.is_priority);

        ledger.try_add_reservation(a_customer(), Some(false)).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_error_message() {
        let err = ReservationError::InvalidArgument(PRIORITY_REQUIRED.to_string());
        assert_eq!(
            err.to_string(),
            "Expected the isPriority: Boolean parameter to be provided."
        );
    }

    #[test]
    fn test_priority_records_keep_order() {
        let mut ledger = ReservationLedger::new();
        ledger.add_reservation(Customer::new(1, "A"), true);
        ledger.add_reservation(Customer::new(2, "B"), false);
        ledger.add_reservation(Customer::new(3, "C"), true);

        let ids: Vec<_> = ledger.priority_records().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    #[cfg(feature = "legacy-api")]
    #[allow(deprecated)]
    fn test_legacy_add_forwards_as_non_priority() {
        let mut ledger = ReservationLedger::new();

        ledger.add_reservation_legacy(a_customer());

        assert_eq!(ledger.fetch_reservations(), vec![a_customer()]);
        assert!(!ledger.entries()[0].is_priority);
    }
}
