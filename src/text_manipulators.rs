use regex::Regex;
use scraper::ElementRef;

use crate::{config::TRAIN_PREFIXES, trip::DayPattern};

/// Text of an element the way it reads on screen: every text node trimmed,
/// blank ones dropped, the rest joined by single spaces.
pub fn extract_text(node: ElementRef) -> String {
    node.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns a raw route cell such as `"Спутник Москва — Тверь будни 6301"`
/// into the bare `"Москва — Тверь"`.
pub struct RouteCleaner {
    day_keywords: Regex,
    train_number: Regex,
    whitespace: Regex,
}

impl RouteCleaner {
    pub fn new() -> anyhow::Result<Self> {
        let keywords = DayPattern::ALL
            .iter()
            .map(|pattern| regex::escape(pattern.as_str()))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Self {
            day_keywords: Regex::new(&format!("(?i){keywords}"))?,
            // Only whole trailing numbers: "Поварово-1" is a station, not a train.
            train_number: Regex::new(r"(?:^|\s)[\s,]*\d+(?:[\s,]+\d+)*[\s,]*$")?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Strips one train-type prefix, every day keyword and the trailing train
    /// number, then normalises spaces. Running it on its own output changes
    /// nothing unless the cell started with two train-type names.
    pub fn clean(&self, text: &str) -> String {
        let without_days = self.day_keywords.replace_all(text, "");
        let mut route = without_days.trim_matches(|c: char| c.is_whitespace() || c == ',');
        if let Some(rest) = TRAIN_PREFIXES.iter().find_map(|prefix| route.strip_prefix(prefix)) {
            route = rest.trim_start();
        }

        let route = self.train_number.replace(route, "");
        let route = self.whitespace.replace_all(&route, " ");
        route.trim_matches(|c: char| c == ' ' || c == ',').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn cleaner() -> RouteCleaner {
        RouteCleaner::new().unwrap()
    }

    #[test]
    fn strips_prefix_keyword_and_train_number() {
        assert_eq!(cleaner().clean("Спутник Москва — Тверь будни 6301"), "Москва — Тверь");
        assert_eq!(cleaner().clean("Электричка Москва – Клин ЕЖЕДНЕВНО 6003"), "Москва – Клин");
    }

    #[test]
    fn keeps_plain_route_untouched() {
        assert_eq!(cleaner().clean("Москва — Тверь"), "Москва — Тверь");
        assert_eq!(cleaner().clean("Москва-3 — Поварово-1 ст."), "Москва-3 — Поварово-1 ст.");
    }

    #[test]
    fn prefix_is_only_stripped_at_the_start() {
        assert_eq!(cleaner().clean("Москва — Спутник"), "Москва — Спутник");
        assert_eq!(cleaner().clean("  Ласточка\u{a0}Москва — Тверь"), "Москва — Тверь");
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        assert_eq!(cleaner().clean("спутник Москва — Тверь"), "спутник Москва — Тверь");
    }

    #[test]
    fn collapses_whitespace_and_trims_commas() {
        assert_eq!(cleaner().clean(" , Москва   —\n Тверь, выходные, "), "Москва — Тверь");
    }

    #[test]
    fn cleaning_is_idempotent() {
        for raw in [
            "Спутник Москва — Тверь будни 6301",
            "Тверь 12, 6301",
            "Москва — Поварово-1 6301",
            "будни Спутник Москва — Тверь",
            "Москва — Тверь, будни",
            "Иволга 123",
        ] {
            let once = cleaner().clean(raw);
            assert_eq!(cleaner().clean(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn only_one_prefix_is_stripped() {
        assert_eq!(cleaner().clean("Спутник Электричка Москва — Клин 7"), "Электричка Москва — Клин");
    }

    #[test]
    fn station_numbers_survive_train_number_removal() {
        assert_eq!(cleaner().clean("Москва — Поварово-1 6301"), "Москва — Поварово-1");
        assert_eq!(cleaner().clean("Москва — Поварово-1"), "Москва — Поварово-1");
        assert_eq!(cleaner().clean("Москва — Тверь 12, 6301"), "Москва — Тверь");
    }

    #[test]
    fn route_of_only_a_number_cleans_to_nothing() {
        assert_eq!(cleaner().clean("Иволга 123"), "");
    }

    #[test]
    fn extract_text_joins_nested_nodes() {
        let html = Html::parse_fragment("<table><tr><td> <a>Москва</a>\n — <b>Тверь</b> </td></tr></table>");
        let td = Selector::parse("td").unwrap();
        let cell = html.select(&td).next().unwrap();
        assert_eq!(extract_text(cell), "Москва — Тверь");
    }
}
