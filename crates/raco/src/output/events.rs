//! Event listing output formatting.

use owo_colors::OwoColorize;
use ra_api_rs::events::FetchedEvents;
use ra_api_rs::models::EventListing;
use serde::Serialize;
use serde_json::Value;

use super::helpers::truncate_str;

/// JSON output structure for the events command.
#[derive(Serialize)]
struct EventsOutput<'a> {
    total_reported: Option<u64>,
    fetched: usize,
    shown: usize,
    events: Vec<&'a Value>,
}

/// Prints events as pretty JSON.
///
/// Raw records are emitted, not the typed render model, so every field
/// the upstream returned stays available to scripts.
pub fn format_events_json(fetched: &FetchedEvents) -> serde_json::Result<()> {
    let output = EventsOutput {
        total_reported: fetched.total_reported,
        fetched: fetched.fetched,
        shown: fetched.records.len(),
        events: fetched.records.iter().collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Prints events as a human-readable table.
pub fn format_events_table(fetched: &FetchedEvents, use_colors: bool) {
    if fetched.records.is_empty() {
        println!("No events matched.");
        return;
    }

    let header = format!(
        "{:<12} {:<40} {:<24} {}",
        "DATE", "TITLE", "VENUE", "ARTISTS"
    );
    if use_colors {
        println!("{}", header.bold());
    } else {
        println!("{header}");
    }

    for record in &fetched.records {
        match EventListing::from_record(record) {
            Some(listing) => print_listing(&listing, use_colors),
            None => println!("{:<12} {}", "?", truncate_str(&record.to_string(), 66)),
        }
    }

    let summary = match fetched.total_reported {
        Some(total) => format!(
            "\n{} shown ({} fetched, {} reported upstream)",
            fetched.records.len(),
            fetched.fetched,
            total
        ),
        None => format!(
            "\n{} shown ({} fetched)",
            fetched.records.len(),
            fetched.fetched
        ),
    };
    if use_colors {
        println!("{}", summary.dimmed());
    } else {
        println!("{summary}");
    }
}

fn print_listing(listing: &EventListing, use_colors: bool) {
    let event = &listing.event;

    let date = event
        .date
        .as_deref()
        .or(listing.listing_date.as_deref())
        .map(|d| d.split('T').next().unwrap_or(d).to_string())
        .unwrap_or_default();
    let title = truncate_str(&event.title, 40);
    let venue = event
        .venue
        .as_ref()
        .map(|venue| truncate_str(&venue.name, 24))
        .unwrap_or_default();
    let artists: Vec<&str> = event
        .artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect();
    let artists = truncate_str(&artists.join(", "), 40);

    if use_colors {
        println!(
            "{:<12} {:<40} {:<24} {}",
            date.cyan(),
            title,
            venue.green(),
            artists.dimmed()
        );
    } else {
        println!("{date:<12} {title:<40} {venue:<24} {artists}");
    }
}
