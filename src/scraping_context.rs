use crate::{
    config::ScrapingConfig, requests::RequestClient, schedule_scraper::ScheduleScraper,
    trip::Trip,
};

pub struct ScrapingContext {
    pub scraping_config: ScrapingConfig,
    pub schedule_scraper: ScheduleScraper,
    pub request_client: RequestClient,
}

impl ScrapingContext {
    pub fn new(scraping_config: ScrapingConfig) -> anyhow::Result<Self> {
        let schedule_scraper = ScheduleScraper::new()?;
        let request_client = RequestClient::new()?;
        Ok(ScrapingContext {
            scraping_config,
            schedule_scraper,
            request_client,
        })
    }

    /// Loads the configured page and extracts its trips. Fetch failures are
    /// fatal; malformed rows are simply skipped.
    pub async fn scrape(&self) -> anyhow::Result<Vec<Trip>> {
        let html = self
            .request_client
            .load(&self.scraping_config.source)
            .await?;
        Ok(self
            .schedule_scraper
            .parse_schedule(&html, self.scraping_config.day_filter))
    }
}
