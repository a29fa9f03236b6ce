//! Global search output formatting.

use owo_colors::OwoColorize;
use ra_api_rs::models::SearchResult;
use ra_api_rs::search::group_by_search_type;
use serde::Serialize;
use serde_json::Value;

use super::helpers::truncate_str;

/// JSON output structure for the search command.
#[derive(Serialize)]
struct SearchOutput<'a> {
    total: usize,
    results: &'a [Value],
}

/// Prints search results as pretty JSON.
pub fn format_search_json(records: &[Value]) -> serde_json::Result<()> {
    let output = SearchOutput {
        total: records.len(),
        results: records,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Prints search results grouped by hit type.
pub fn format_search_table(records: &[Value], use_colors: bool) {
    if records.is_empty() {
        println!("No results matched.");
        return;
    }

    for (search_type, group) in group_by_search_type(records) {
        let header = format!("{search_type} ({})", group.len());
        if use_colors {
            println!("{}", header.green().bold());
        } else {
            println!("{header}");
        }

        for record in &group {
            match SearchResult::from_record(record) {
                Some(result) => print_result(&result, use_colors),
                None => println!("  {}", truncate_str(&record.to_string(), 70)),
            }
        }
        println!();
    }
}

fn print_result(result: &SearchResult, use_colors: bool) {
    let value = truncate_str(&result.value, 40);

    let mut detail = Vec::new();
    if let Some(area) = &result.area_name {
        detail.push(area.clone());
    }
    if let Some(country) = &result.country_name {
        detail.push(country.clone());
    }
    if let Some(club) = &result.club_name {
        detail.push(club.clone());
    }
    if let Some(date) = &result.date {
        detail.push(date.split('T').next().unwrap_or(date).to_string());
    }
    let detail = detail.join(" · ");

    if use_colors {
        println!("  {:<42} {}", value, detail.dimmed());
    } else {
        println!("  {value:<42} {detail}");
    }
}
