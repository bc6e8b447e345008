use std::collections::HashSet;

use log::{debug, info};
use regex::Regex;
use scraper::{Html, Selector};

use crate::{
    text_manipulators::{RouteCleaner, extract_text},
    trip::{DayPattern, Trip},
};

const ROUTE_DASHES: [char; 3] = ['—', '–', '-'];

/// Pulls trips out of a station timetable page.
///
/// The page has a single schedule table, but every `tr` in the document is
/// considered; rows that don't look like a departure are skipped.
pub struct ScheduleScraper {
    row_selector: Selector,
    cell_selector: Selector,
    time_regex: Regex,
    route_cleaner: RouteCleaner,
}

impl ScheduleScraper {
    pub fn new() -> anyhow::Result<Self> {
        let parse = |css: &str| {
            Selector::parse(css).map_err(|e| anyhow::anyhow!("invalid selector {css:?}: {e:?}"))
        };
        Ok(Self {
            row_selector: parse("tr")?,
            cell_selector: parse("td")?,
            time_regex: Regex::new(r"\b\d{2}:\d{2}\b")?,
            route_cleaner: RouteCleaner::new()?,
        })
    }

    /// Parses `html` and returns its trips in page order, without duplicates.
    pub fn parse_schedule(&self, html: &str, day_filter: Option<DayPattern>) -> Vec<Trip> {
        let document = Html::parse_document(html);
        self.collect_trips(self.rows(&document), day_filter)
    }

    /// Non-empty cell texts of every table row that has any.
    pub fn rows<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = Vec<String>> + 'a {
        document.select(&self.row_selector).filter_map(|row| {
            let texts: Vec<String> = row
                .select(&self.cell_selector)
                .map(extract_text)
                .filter(|text| !text.is_empty())
                .collect();
            (!texts.is_empty()).then_some(texts)
        })
    }

    pub fn collect_trips<I>(&self, rows: I, day_filter: Option<DayPattern>) -> Vec<Trip>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut seen = HashSet::new();
        let mut trips = Vec::new();
        let mut row_count = 0usize;

        for texts in rows {
            row_count += 1;
            let Some(trip) = self.parse_row(&texts, day_filter) else {
                continue;
            };
            if seen.contains(&trip) {
                debug!("Skipping duplicate row: {trip}");
                continue;
            }
            seen.insert(trip.clone());
            trips.push(trip);
        }

        info!("Kept {} trips out of {} table rows", trips.len(), row_count);
        trips
    }

    /// Builds a trip from one row's cell texts, or `None` when the row lacks a
    /// time or a route, or runs on days other than `day_filter`.
    pub fn parse_row(&self, texts: &[String], day_filter: Option<DayPattern>) -> Option<Trip> {
        let time = self.extract_time(texts)?;
        let days = extract_days(texts);

        if let Some(wanted) = day_filter {
            if days != Some(wanted) {
                return None;
            }
        }

        let route = self.extract_route(texts)?;
        Some(Trip::new(time, route, days.map(DayPattern::as_str).unwrap_or_default()))
    }

    pub fn extract_time(&self, texts: &[String]) -> Option<String> {
        texts
            .iter()
            .find_map(|text| self.time_regex.find(text))
            .map(|time| time.as_str().to_string())
    }

    /// First cleaned cell that mentions a dash, i.e. looks like "A — B".
    pub fn extract_route(&self, texts: &[String]) -> Option<String> {
        texts
            .iter()
            .filter(|text| text.contains(ROUTE_DASHES))
            .map(|text| self.route_cleaner.clean(text))
            .find(|route| !route.is_empty())
    }
}

pub fn extract_days(texts: &[String]) -> Option<DayPattern> {
    texts.iter().find_map(|text| {
        let lowered = text.to_lowercase();
        DayPattern::ALL
            .into_iter()
            .find(|pattern| lowered.contains(pattern.as_str()))
    })
}
