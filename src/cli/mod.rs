use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{
    CirculationService, customers_in_region, region_group, region_summary,
};
use crate::domain::{Customer, migration};
use crate::logging;

/// Reserva - book reservations and region lookups
#[derive(Parser)]
#[command(name = "reserva")]
#[command(about = "Keeps ordered reservation lists for books and classifies customers by region")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "RESERVA_DATABASE", default_value = "reserva.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Book management commands
    #[command(subcommand)]
    Book(BookCommands),

    /// Reserve a book for a customer
    Reserve {
        /// Book title
        book: String,

        /// Customer identifier
        #[arg(long)]
        customer_id: i64,

        /// Customer display name
        #[arg(long)]
        name: String,

        /// Customer state code (e.g., "MA")
        #[arg(long)]
        state: Option<String>,

        /// Whether this is a priority reservation (true or false)
        #[arg(long)]
        priority: Option<bool>,
    },

    /// List reservations for a book in the order they were taken
    Reservations {
        /// Book title
        book: String,

        /// Only show priority reservations
        #[arg(long)]
        priority_only: bool,
    },

    /// Region classification commands
    #[command(subcommand)]
    Region(RegionCommands),

    /// Export a book's reservations to CSV or JSON
    Export {
        /// Book title
        book: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// Import reservations for a book from a JSON array
    Import {
        /// Book title
        book: String,

        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Validate without importing
        #[arg(long)]
        dry_run: bool,
    },

    /// List deprecated entry points and the API stage of this build
    Legacy,
}

#[derive(Subcommand)]
pub enum BookCommands {
    /// Create a new book
    Create {
        /// Book title (must be unique)
        title: String,
    },

    /// List all books
    List,
}

#[derive(Subcommand)]
pub enum RegionCommands {
    /// Check whether a state code belongs to a region group
    Check {
        /// State code (case-sensitive, e.g. "MA")
        code: String,

        /// Region group
        #[arg(short, long, default_value = "new-england")]
        group: String,
    },

    /// List the customers of a CSV file (id,name,state) living in a region group
    Report {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Region group
        #[arg(short, long, default_value = "new-england")]
        group: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        logging::init_cli_logger(self.verbose);

        match self.command {
            Commands::Init => {
                CirculationService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Book(book_cmd) => {
                let service = CirculationService::connect(&self.database).await?;
                run_book_command(&service, book_cmd).await?;
            }

            Commands::Reserve {
                book,
                customer_id,
                name,
                state,
                priority,
            } => {
                let service = CirculationService::connect(&self.database).await?;

                let mut customer = Customer::new(customer_id, name);
                if let Some(state) = state {
                    customer = customer.with_state(state);
                }

                let result = service.add_reservation(&book, customer, priority).await?;
                println!(
                    "Reserved '{}' for {} (#{}){} - position {}",
                    result.book_title,
                    result.reservation.record.name,
                    result.reservation.record.id,
                    if result.reservation.is_priority {
                        " [priority]"
                    } else {
                        ""
                    },
                    result.position + 1
                );
            }

            Commands::Reservations {
                book,
                priority_only,
            } => {
                let service = CirculationService::connect(&self.database).await?;
                run_reservations_command(&service, &book, priority_only).await?;
            }

            Commands::Region(region_cmd) => {
                run_region_command(region_cmd)?;
            }

            Commands::Export {
                book,
                output,
                format,
            } => {
                let service = CirculationService::connect(&self.database).await?;
                run_export_command(&service, &book, output.as_deref(), &format).await?;
            }

            Commands::Import {
                book,
                input,
                dry_run,
            } => {
                let service = CirculationService::connect(&self.database).await?;
                run_import_command(&service, &book, input.as_deref(), dry_run).await?;
            }

            Commands::Legacy => {
                run_legacy_command();
            }
        }

        Ok(())
    }
}

async fn run_book_command(service: &CirculationService, cmd: BookCommands) -> Result<()> {
    match cmd {
        BookCommands::Create { title } => {
            let book = service.create_book(&title).await?;
            println!("Created book: {} ({})", book.title, book.id);
        }

        BookCommands::List => {
            let books = service.list_books().await?;
            if books.is_empty() {
                println!("No books found.");
            } else {
                println!("{:<40} {:>12}", "TITLE", "RESERVATIONS");
                println!("{}", "-".repeat(53));
                for book in books {
                    println!("{:<40} {:>12}", book.title, book.reservations.len());
                }
            }
        }
    }
    Ok(())
}

async fn run_reservations_command(
    service: &CirculationService,
    title: &str,
    priority_only: bool,
) -> Result<()> {
    let book = service.get_book(title).await?;

    let entries: Vec<_> = book
        .reservations
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| !priority_only || e.is_priority)
        .collect();

    if entries.is_empty() {
        println!("No reservations for '{}'.", book.title);
        return Ok(());
    }

    println!(
        "{:<4} {:<10} {:<24} {:<6} {:<9} {}",
        "#", "ID", "NAME", "STATE", "PRIORITY", "RESERVED"
    );
    println!("{}", "-".repeat(78));
    for (position, entry) in entries {
        println!(
            "{:<4} {:<10} {:<24} {:<6} {:<9} {}",
            position + 1,
            entry.record.id,
            entry.record.name,
            entry.record.state().unwrap_or("-"),
            if entry.is_priority { "yes" } else { "no" },
            entry.reserved_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

fn run_region_command(cmd: RegionCommands) -> Result<()> {
    use crate::io::read_customers_csv;
    use std::fs::File;
    use std::io::{Read, stdin};

    match cmd {
        RegionCommands::Check { code, group } => {
            let group = region_group(&group)?;
            if group.contains(&code) {
                println!("yes: {} is in {}", code, group.name);
            } else {
                println!("no: {} is not in {}", code, group.name);
            }
        }

        RegionCommands::Report { input, group } => {
            let group = region_group(&group)?;

            let reader: Box<dyn Read> = match input.as_deref() {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("Failed to open input file: {}", path))?;
                    Box::new(file)
                }
                None => Box::new(stdin()),
            };

            let customers = read_customers_csv(reader)?;
            let ids = customers_in_region(&group, &customers);
            println!("{}", region_summary(&group, &ids));
        }
    }
    Ok(())
}

async fn run_export_command(
    service: &CirculationService,
    title: &str,
    output: Option<&str>,
    format: &str,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{Write, stdout};

    let exporter = Exporter::new(service);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = match format {
        "csv" => exporter.export_reservations_csv(title, writer).await?,
        "json" => exporter.export_reservations_json(title, writer).await?,
        _ => {
            anyhow::bail!("Invalid export format '{}'. Valid formats: csv, json", format);
        }
    };

    if output.is_some() {
        eprintln!("Exported {} reservations", count);
    }
    Ok(())
}

async fn run_import_command(
    service: &CirculationService,
    title: &str,
    input: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    use crate::io::{ImportOptions, Importer};
    use std::fs::File;
    use std::io::{Read, stdin};

    let importer = Importer::new(service);

    let reader: Box<dyn Read> = match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdin()),
    };

    let result = importer
        .import_reservations_json(title, reader, ImportOptions { dry_run })
        .await?;

    if dry_run {
        println!("Validation complete");
    } else {
        println!("Import complete");
    }
    println!("  Imported: {}", result.imported);
    println!("  Errors:   {}", result.errors.len());

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in result.errors.iter().take(10) {
            println!(
                "  Row {}: {}",
                error.row,
                error
                    .field
                    .as_ref()
                    .map(|f| format!("{}: ", f))
                    .unwrap_or_default()
                    + &error.error
            );
        }
        if result.errors.len() > 10 {
            println!("  ... and {} more errors", result.errors.len() - 10);
        }
    }

    Ok(())
}

fn run_legacy_command() {
    println!("API stage: {}", migration::current_stage());

    let entries = migration::active_legacy_entry_points();
    if entries.is_empty() {
        println!("No legacy entry points in this build.");
        return;
    }

    println!();
    println!("{:<44} {:<38} {:<7} {}", "DEPRECATED", "USE INSTEAD", "SINCE", "CHANGE");
    println!("{}", "-".repeat(110));
    for entry in entries {
        println!(
            "{:<44} {:<38} {:<7} {}",
            entry.path, entry.replacement, entry.since, entry.change
        );
    }
}
