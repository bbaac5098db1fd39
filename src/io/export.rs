use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::CirculationService;
use crate::domain::{Customer, Reservation};

/// Snapshot of one book's reservation list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub title: String,
    pub reservations: Vec<Reservation<Customer>>,
}

/// Exporter for writing reservation lists in various formats
pub struct Exporter<'a> {
    service: &'a CirculationService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a CirculationService) -> Self {
        Self { service }
    }

    /// Export a book's reservations to CSV format
    pub async fn export_reservations_csv<W: Write>(&self, title: &str, writer: W) -> Result<usize> {
        let book = self.service.get_book(title).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "position",
            "customer_id",
            "customer_name",
            "state",
            "is_priority",
            "reserved_at",
        ])?;

        let mut count = 0;
        for (position, entry) in book.reservations.entries().iter().enumerate() {
            csv_writer.write_record(&[
                position.to_string(),
                entry.record.id.to_string(),
                entry.record.name.clone(),
                entry.record.state().unwrap_or_default().to_string(),
                entry.is_priority.to_string(),
                entry.reserved_at.to_rfc3339(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export a book's reservations as a JSON snapshot
    pub async fn export_reservations_json<W: Write>(&self, title: &str, writer: W) -> Result<usize> {
        let book = self.service.get_book(title).await?;

        let snapshot = BookSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            title: book.title,
            reservations: book.reservations.entries().to_vec(),
        };

        serde_json::to_writer_pretty(writer, &snapshot)?;
        Ok(snapshot.reservations.len())
    }
}
