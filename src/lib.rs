pub mod config;
pub mod fetch_error;
pub mod report;
pub mod requests;
pub mod schedule_scraper;
pub mod scraping_context;
pub mod text_manipulators;
pub mod trip;

pub use config::{ScheduleSource, ScrapingConfig};
pub use fetch_error::FetchError;
pub use schedule_scraper::ScheduleScraper;
pub use scraping_context::ScrapingContext;
pub use trip::{DayPattern, Trip};
