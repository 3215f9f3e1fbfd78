pub mod controller;
pub mod error;
pub mod pagination;
pub mod pipeline;

pub use controller::{ScrapeHandle, spawn_scrape};
pub use error::ScrapeError;
pub use pagination::{PaginationState, Paginator};
pub use pipeline::{ScrapeStats, Scraper, scrape};

#[cfg(test)]
mod tests;
