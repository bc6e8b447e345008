use anyhow::Context;
use elektrichka::{ScrapingConfig, ScrapingContext, config::Args, report};
use log::LevelFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    let scraping_config = ScrapingConfig::from(Args::parse_known(std::env::args()));
    let context = ScrapingContext::new(scraping_config)?;

    let trips = context.scrape().await?;

    report::print_trips(&mut std::io::stdout().lock(), &trips)
        .context("failed to print trips")?;
    report::write_json(&context.scraping_config.output, &trips)?;
    Ok(())
}
