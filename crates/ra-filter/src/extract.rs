//! Field extraction from heterogeneous records.
//!
//! Records are opaque JSON objects and the "same" logical field can live
//! under different shapes: a plain string, an array, or nested inside
//! related sub-objects (`genre` may only exist on an event's artists).
//! Extraction is a registry of named projection functions with a default
//! fallback, so supporting a new field is a data addition, not a parser or
//! evaluator change.

use std::collections::HashMap;

use serde_json::Value;

/// Projects zero or more string values for one field out of a record.
pub type Projection = fn(&Value) -> Vec<String>;

/// Registry of per-field projections with a direct-lookup fallback.
#[derive(Clone)]
pub struct FieldProjections {
    projections: HashMap<String, Projection>,
}

impl FieldProjections {
    /// Creates an empty registry; every field uses the default projection
    /// (direct key lookup at the record root, then under the `event`
    /// sub-object).
    pub fn new() -> Self {
        Self {
            projections: HashMap::new(),
        }
    }

    /// Registers a projection for a field name, replacing any existing one.
    pub fn register(&mut self, field: impl Into<String>, projection: Projection) -> &mut Self {
        self.projections.insert(field.into(), projection);
        self
    }

    /// Extracts the value sequence for a field from a record.
    pub fn extract(&self, record: &Value, field: &str) -> Vec<String> {
        match self.projections.get(field) {
            Some(projection) => projection(record),
            None => direct_lookup(record, field),
        }
    }

    /// Projections for event-listing records (`{"id": .., "event": {..}}`).
    pub fn event_listing() -> Self {
        let mut p = Self::new();
        p.register("genre", event_genre)
            .register("artists", event_artists)
            .register("venue", event_venue)
            .register("area", event_area)
            .register("eventType", event_type);
        p
    }

    /// Projections for global-search result records.
    pub fn search_result() -> Self {
        let mut p = Self::new();
        p.register("type", search_type)
            .register("name", search_value)
            .register("title", search_value)
            .register("value", search_value)
            .register("area", search_area)
            .register("country", search_country)
            .register("venue", search_club)
            .register("club", search_club)
            .register("artist", search_artist)
            .register("artists", search_artist)
            .register("label", search_label)
            .register("promoter", search_promoter);
        p
    }
}

impl Default for FieldProjections {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FieldProjections {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields: Vec<&str> = self.projections.keys().map(String::as_str).collect();
        fields.sort_unstable();
        f.debug_struct("FieldProjections")
            .field("fields", &fields)
            .finish()
    }
}

/// Renders a scalar JSON value as a string; objects, arrays and null
/// project to nothing.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One scalar, or one level of scalars from an array.
fn scalars(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar).collect(),
        other => scalar(other).into_iter().collect(),
    }
}

/// The event sub-object for listing records, or the record itself.
fn event_object(record: &Value) -> &Value {
    match record.get("event") {
        Some(event) if event.is_object() => event,
        _ => record,
    }
}

/// Default projection: key at the record root, then under `event`.
fn direct_lookup(record: &Value, field: &str) -> Vec<String> {
    if let Some(value) = record.get(field) {
        let found = scalars(value);
        if !found.is_empty() {
            return found;
        }
    }
    match event_object(record).get(field) {
        Some(value) => scalars(value),
        None => Vec::new(),
    }
}

/// Genre of an event: the editorial pick first, then per-artist genres,
/// then a direct `genre` key.
fn event_genre(record: &Value) -> Vec<String> {
    let event = event_object(record);

    if let Some(genre) = event.get("pick").and_then(|pick| pick.get("genre")) {
        let found = scalars(genre);
        if !found.is_empty() {
            return found;
        }
    }

    if let Some(Value::Array(artists)) = event.get("artists") {
        let genres: Vec<String> = artists
            .iter()
            .filter_map(|artist| artist.get("genre"))
            .flat_map(scalars)
            .collect();
        if !genres.is_empty() {
            return genres;
        }
    }

    event.get("genre").map(scalars).unwrap_or_default()
}

/// Names of the event's billed artists.
fn event_artists(record: &Value) -> Vec<String> {
    match event_object(record).get("artists") {
        Some(Value::Array(artists)) => artists
            .iter()
            .filter_map(|artist| artist.get("name").and_then(scalar))
            .collect(),
        _ => Vec::new(),
    }
}

fn event_venue(record: &Value) -> Vec<String> {
    event_object(record)
        .get("venue")
        .and_then(|venue| venue.get("name"))
        .and_then(scalar)
        .into_iter()
        .collect()
}

/// Area lives under the venue; it can be a plain string or a named object.
fn event_area(record: &Value) -> Vec<String> {
    let Some(area) = event_object(record).get("venue").and_then(|v| v.get("area")) else {
        return Vec::new();
    };
    match area {
        Value::Object(_) => area.get("name").and_then(scalar).into_iter().collect(),
        other => scalar(other).into_iter().collect(),
    }
}

fn event_type(record: &Value) -> Vec<String> {
    event_object(record)
        .get("eventType")
        .map(scalars)
        .unwrap_or_default()
}

fn search_type(record: &Value) -> Vec<String> {
    record
        .get("searchType")
        .and_then(scalar)
        .map(|t| t.to_lowercase())
        .into_iter()
        .collect()
}

fn search_value(record: &Value) -> Vec<String> {
    record.get("value").and_then(scalar).into_iter().collect()
}

fn search_area(record: &Value) -> Vec<String> {
    record.get("areaName").and_then(scalar).into_iter().collect()
}

/// Country matches by name or ISO code.
fn search_country(record: &Value) -> Vec<String> {
    ["countryName", "countryCode"]
        .iter()
        .filter_map(|key| record.get(*key).and_then(scalar))
        .collect()
}

/// Venue of a search hit: `clubName` for event hits, the hit's own value
/// for club hits.
fn search_club(record: &Value) -> Vec<String> {
    match search_type(record).first().map(String::as_str) {
        Some("upcomingevent") | Some("event") => {
            record.get("clubName").and_then(scalar).into_iter().collect()
        }
        Some("club") => search_value(record),
        _ => Vec::new(),
    }
}

fn search_artist(record: &Value) -> Vec<String> {
    typed_search_value(record, "artist")
}

fn search_label(record: &Value) -> Vec<String> {
    typed_search_value(record, "label")
}

fn search_promoter(record: &Value) -> Vec<String> {
    typed_search_value(record, "promoter")
}

/// The hit's value, but only for hits of the expected search type.
fn typed_search_value(record: &Value, expected: &str) -> Vec<String> {
    if search_type(record).first().map(String::as_str) == Some(expected) {
        search_value(record)
    } else {
        Vec::new()
    }
}
