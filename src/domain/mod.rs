mod book;
mod customer;
pub mod geometry;
pub mod migration;
pub mod region;
mod reservation;

pub use book::*;
pub use customer::*;
pub use geometry::circumference;
pub use migration::{ApiStage, LegacyEntryPoint};
pub use region::{NEW_ENGLAND, RegionGroup, is_in_new_england};
pub use reservation::*;
