use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which calendar days a train runs on, as the timetable page words it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DayPattern {
    #[value(name = "ежедневно")]
    Daily,
    #[value(name = "будни")]
    Weekdays,
    #[value(name = "выходные")]
    Weekends,
}

impl DayPattern {
    /// Keyword scan order used when a cell mentions more than one pattern.
    pub const ALL: [DayPattern; 3] = [DayPattern::Daily, DayPattern::Weekdays, DayPattern::Weekends];

    pub fn as_str(self) -> &'static str {
        match self {
            DayPattern::Daily => "ежедневно",
            DayPattern::Weekdays => "будни",
            DayPattern::Weekends => "выходные",
        }
    }
}

impl fmt::Display for DayPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One departure parsed from a timetable row.
///
/// `days` holds a [`DayPattern`] keyword, or is empty when the row does not
/// say which days the train runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trip {
    pub time: String,
    pub route: String,
    pub days: String,
}

impl Trip {
    pub fn new(time: impl Into<String>, route: impl Into<String>, days: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            route: route.into(),
            days: days.into(),
        }
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.time, self.route, self.days)
    }
}
