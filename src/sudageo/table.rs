use crate::sudageo::{presets::CrsPreset, utm::UtmSuggestion};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

fn styled() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table
}

pub fn presets(presets: &[CrsPreset]) -> Table {
    let mut table = styled();
    table.set_header(vec!["EPSG", "Name", "Region", "Description"]);
    for p in presets {
        table.add_row(vec![
            p.epsg.to_string(),
            p.name.to_string(),
            p.region.to_string(),
            p.description.to_string(),
        ]);
    }
    table
}

/// Rank 1 is the recommended system.
pub fn suggestions(suggestions: &[UtmSuggestion]) -> Table {
    let mut table = styled();
    table.set_header(vec!["Rank", "EPSG", "Name", "Zone", "Datum"]);
    for (i, s) in suggestions.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            s.epsg.to_string(),
            s.name.clone(),
            format!("{}{}", s.zone, s.hemisphere),
            s.datum.clone(),
        ]);
    }
    table
}

pub fn key_values(title: &str, rows: &[(&str, String)]) -> Table {
    let mut table = styled();
    table.set_header(vec![title, ""]);
    for (key, value) in rows {
        table.add_row(vec![key.to_string(), value.clone()]);
    }
    table
}
