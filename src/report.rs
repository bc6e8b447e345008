use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use log::info;

use crate::trip::Trip;

/// Writes one `time | route | days` line per trip.
pub fn print_trips<W: Write>(out: &mut W, trips: &[Trip]) -> std::io::Result<()> {
    for trip in trips {
        writeln!(out, "{trip}")?;
    }
    Ok(())
}

/// Pretty-printed JSON array; Cyrillic is written as-is, not `\u` escaped.
pub fn trips_to_json(trips: &[Trip]) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(trips).context("failed to serialize trips")?;
    json.push('\n');
    Ok(json)
}

pub fn write_json(path: &Path, trips: &[Trip]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }

    let json = trips_to_json(trips)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {} trips to {}", trips.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_lines_follow_trip_order() {
        let trips = vec![
            Trip::new("06:10", "Москва — Тверь", "будни"),
            Trip::new("06:40", "Москва — Клин", ""),
        ];
        let mut out = Vec::new();
        print_trips(&mut out, &trips).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "06:10 | Москва — Тверь | будни\n06:40 | Москва — Клин | \n"
        );
    }

    #[test]
    fn json_keeps_cyrillic_and_indents() {
        let json = trips_to_json(&[Trip::new("07:45", "Москва — Тверь", "будни")]).unwrap();
        assert_eq!(
            json,
            "[\n  {\n    \"time\": \"07:45\",\n    \"route\": \"Москва — Тверь\",\n    \"days\": \"будни\"\n  }\n]\n"
        );
    }

    #[test]
    fn no_trips_is_an_empty_array() {
        assert_eq!(trips_to_json(&[]).unwrap(), "[]\n");
    }
}
