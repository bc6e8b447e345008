use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::trip::DayPattern;

/// Station page with the full suburban timetable.
pub const STATION_URL: &str = "https://www.tutu.ru/station.php?nnst=45807&date=all";

pub const DEFAULT_OUTPUT: &str = "schedule.json";

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Train-type names the site puts in front of the route. Checked in order.
pub const TRAIN_PREFIXES: [&str; 4] = ["Электричка", "Спутник", "Иволга", "Ласточка"];

const VALUE_FLAGS: [&str; 4] = ["--days", "--file", "--output", "--url"];
const SWITCH_FLAGS: [&str; 4] = ["-h", "--help", "-V", "--version"];

#[derive(Debug, Parser)]
#[command(
    name = "elektrichka",
    version,
    about = "Scrapes the suburban train timetable of a tutu.ru station page into JSON"
)]
pub struct Args {
    /// Keep only trips running on these days. All trips are kept when omitted.
    #[arg(long, value_enum)]
    pub days: Option<DayPattern>,

    /// Read a saved copy of the station page instead of downloading it.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Where to write the JSON result.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Station page to download.
    #[arg(long, default_value = STATION_URL)]
    pub url: String,
}

impl Args {
    /// Parses the command line, silently dropping arguments we don't know.
    pub fn parse_known<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::parse_from(retain_known_args(args))
    }
}

/// Keeps the program name, the recognised flags and the values that follow
/// them. Everything else is discarded so that clap never rejects it.
pub fn retain_known_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut kept: Vec<String> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            kept.push(arg);
            if let Some(value) = args.next() {
                kept.push(value);
            }
        } else if SWITCH_FLAGS.contains(&arg.as_str())
            || VALUE_FLAGS
                .iter()
                .any(|flag| arg.strip_prefix(flag).is_some_and(|rest| rest.starts_with('=')))
        {
            kept.push(arg);
        }
    }

    kept
}

/// Where the timetable markup comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleSource {
    Url(String),
    File(PathBuf),
}

impl std::fmt::Display for ScheduleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleSource::Url(url) => f.write_str(url),
            ScheduleSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Everything one run needs to know.
#[derive(Debug, Clone)]
pub struct ScrapingConfig {
    pub source: ScheduleSource,
    pub day_filter: Option<DayPattern>,
    pub output: PathBuf,
}

impl ScrapingConfig {
    pub fn new(source: ScheduleSource) -> Self {
        Self {
            source,
            day_filter: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl From<Args> for ScrapingConfig {
    fn from(args: Args) -> Self {
        let source = match args.file {
            Some(path) => ScheduleSource::File(path),
            None => ScheduleSource::Url(args.url),
        };
        Self {
            source,
            day_filter: args.days,
            output: args.output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unknown_arguments_are_dropped() {
        let kept = retain_known_args(argv(&[
            "elektrichka",
            "--verbose",
            "--days",
            "будни",
            "stray",
            "--output=out.json",
            "-x",
        ]));
        assert_eq!(kept, argv(&["elektrichka", "--days", "будни", "--output=out.json"]));
    }

    #[test]
    fn flag_prefixes_are_not_mistaken_for_flags() {
        let kept = retain_known_args(argv(&["elektrichka", "--daysoff", "--filename=x"]));
        assert_eq!(kept, argv(&["elektrichka"]));
    }

    #[test]
    fn defaults_download_the_station_page() {
        let config = ScrapingConfig::from(Args::parse_known(argv(&["elektrichka", "--junk"])));
        assert_eq!(config.source, ScheduleSource::Url(STATION_URL.to_string()));
        assert_eq!(config.day_filter, None);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn file_takes_precedence_over_url() {
        let config = ScrapingConfig::from(Args::parse_known(argv(&[
            "elektrichka",
            "--file",
            "saved.html",
            "--days",
            "ежедневно",
            "--output",
            "out/trips.json",
        ])));
        assert_eq!(config.source, ScheduleSource::File(PathBuf::from("saved.html")));
        assert_eq!(config.day_filter, Some(DayPattern::Daily));
        assert_eq!(config.output, PathBuf::from("out/trips.json"));
    }
}
