//! Event listings: query construction, pagination, hybrid filtering.
//!
//! The outbound filter map is built in three layers: base filters (area and
//! listing-date bounds), legacy single-value genre/eventType filters, and
//! the server-delegable clauses of a [`FilterPlan`]. The plan's client
//! clauses are applied once over the union of all fetched pages.

use chrono::NaiveDate;
use ra_filter_rs::{FieldProjections, FilterPlan};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tokio::time::sleep;

use crate::client::RaClient;
use crate::error::Result;
use crate::graphql::GraphQlRequest;

/// Default events per page; the upstream ignores larger values.
pub const PAGE_SIZE: u32 = 20;

/// Hard cap on pages fetched for one query.
pub const MAX_PAGES: u32 = 50;

/// Default pause between page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

/// The event-listings operation.
const EVENT_LISTINGS_QUERY: &str = r#"query GET_EVENT_LISTINGS($filters: FilterInputDtoInput, $filterOptions: FilterOptionsInputDtoInput, $page: Int, $pageSize: Int, $sort: SortInputDtoInput) {
  eventListings(filters: $filters, filterOptions: $filterOptions, pageSize: $pageSize, page: $page, sort: $sort) {
    data {
      id
      listingDate
      event {
        id
        date
        startTime
        title
        contentUrl
        isTicketed
        interestedCount
        pick {
          id
          blurb
          __typename
        }
        venue {
          id
          name
          contentUrl
          __typename
        }
        artists {
          id
          name
          __typename
        }
        __typename
      }
      __typename
    }
    totalResults
    __typename
  }
}"#;

/// Sort presets for event listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// By listing date, ascending (the default).
    #[default]
    ListingDate,
    /// By relevance score, descending.
    Score,
    /// By title, ascending.
    Title,
}

impl SortField {
    /// The upstream sort configuration for this preset. Each preset orders
    /// by its primary key and keeps the other two as tie-breakers.
    pub fn sort_config(&self) -> Value {
        match self {
            SortField::ListingDate => json!({
                "listingDate": {"order": "ASCENDING"},
                "score": {"order": "DESCENDING"},
                "titleKeyword": {"order": "ASCENDING"},
            }),
            SortField::Score => json!({
                "score": {"order": "DESCENDING"},
                "listingDate": {"order": "ASCENDING"},
                "titleKeyword": {"order": "ASCENDING"},
            }),
            SortField::Title => json!({
                "titleKeyword": {"order": "ASCENDING"},
                "listingDate": {"order": "ASCENDING"},
                "score": {"order": "DESCENDING"},
            }),
        }
    }
}

/// Formats listing-date bounds covering the given days inclusively.
pub fn listing_date_bounds(start: NaiveDate, end: NaiveDate) -> (String, String) {
    (
        format!("{start}T00:00:00.000Z"),
        format!("{end}T23:59:59.999Z"),
    )
}

/// Merges extra filter descriptors into a base filter map.
///
/// When both sides hold an object for the same field, the extra object's
/// keys are merged in one by one (so a plan's `{"lte": ..}` composes with a
/// base `{"gte": ..}` on `listingDate`); otherwise the extra value replaces
/// the base one. Conflicting keys resolve last-write-wins.
pub fn merge_filters(base: &mut Map<String, Value>, extra: Map<String, Value>) {
    for (field, value) in extra {
        match (base.get_mut(&field), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                for (key, incoming_value) in incoming {
                    existing.insert(key, incoming_value);
                }
            }
            (_, value) => {
                base.insert(field, value);
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventListingsVariables {
    filters: Value,
    filter_options: Value,
    page_size: u32,
    page: u32,
    sort: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListingsData {
    event_listings: EventListingsPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListingsPayload {
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default)]
    total_results: Option<u64>,
}

/// One fetched page of listings.
#[derive(Debug)]
pub struct EventsPage {
    /// The raw listing records.
    pub records: Vec<Value>,
    /// The total the upstream reports across all pages.
    pub total_results: Option<u64>,
}

/// All pages of one query, after client-side filtering.
#[derive(Debug)]
pub struct FetchedEvents {
    /// The records that survived the plan's client clauses.
    pub records: Vec<Value>,
    /// How many records were fetched before client-side filtering.
    pub fetched: usize,
    /// The total the upstream reported.
    pub total_reported: Option<u64>,
}

/// An event-listings query for one area and date window.
#[derive(Debug, Clone)]
pub struct EventListingsQuery {
    area: u64,
    listing_date_gte: String,
    listing_date_lte: Option<String>,
    genre: Option<String>,
    event_type: Option<String>,
    sort: SortField,
    page_size: u32,
    page_delay: Duration,
}

impl EventListingsQuery {
    /// Creates a query for an area from a listing-date lower bound.
    pub fn new(area: u64, listing_date_gte: impl Into<String>) -> Self {
        Self {
            area,
            listing_date_gte: listing_date_gte.into(),
            listing_date_lte: None,
            genre: None,
            event_type: None,
            sort: SortField::default(),
            page_size: PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Sets the listing-date upper bound.
    pub fn until(mut self, listing_date_lte: impl Into<String>) -> Self {
        self.listing_date_lte = Some(listing_date_lte.into());
        self
    }

    /// Sets the legacy single-genre equality filter.
    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Sets the legacy event-type equality filter.
    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Sets the sort preset.
    pub fn sort(mut self, sort: SortField) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the events requested per page.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the pause between page requests.
    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// The filter map sent upstream: base filters plus the plan's server
    /// clauses, merged with [`merge_filters`].
    pub fn filters(&self, plan: &FilterPlan) -> Map<String, Value> {
        let mut filters = Map::new();
        filters.insert("areas".to_string(), json!({"eq": self.area}));

        let mut listing_date = Map::new();
        listing_date.insert("gte".to_string(), json!(self.listing_date_gte));
        if let Some(lte) = &self.listing_date_lte {
            listing_date.insert("lte".to_string(), json!(lte));
        }
        filters.insert("listingDate".to_string(), Value::Object(listing_date));

        if let Some(genre) = &self.genre {
            filters.insert("genre".to_string(), json!({"eq": genre}));
        }
        if let Some(event_type) = &self.event_type {
            filters.insert("eventType".to_string(), json!({"eq": event_type}));
        }

        merge_filters(&mut filters, plan.server_clauses_json());
        filters
    }

    /// Fetches one page of listings.
    pub async fn fetch_page(
        &self,
        client: &RaClient,
        plan: &FilterPlan,
        page: u32,
    ) -> Result<EventsPage> {
        let request = GraphQlRequest {
            operation_name: "GET_EVENT_LISTINGS",
            variables: EventListingsVariables {
                filters: Value::Object(self.filters(plan)),
                filter_options: json!({"genre": true, "eventType": true}),
                page_size: self.page_size,
                page,
                sort: self.sort.sort_config(),
            },
            query: EVENT_LISTINGS_QUERY,
        };
        let data: EventListingsData = client.post(&request).await?;
        Ok(EventsPage {
            records: data.event_listings.data,
            total_results: data.event_listings.total_results,
        })
    }

    /// Fetches every page and applies the plan's client clauses once over
    /// the union.
    ///
    /// Stops at the first empty page or at [`MAX_PAGES`], pausing
    /// [`page_delay`](Self::page_delay) between requests.
    pub async fn fetch_all(&self, client: &RaClient, plan: &FilterPlan) -> Result<FetchedEvents> {
        let mut records = Vec::new();
        let mut total_reported = None;

        for page in 1..=MAX_PAGES {
            let fetched = self.fetch_page(client, plan, page).await?;
            if fetched.records.is_empty() {
                break;
            }
            records.extend(fetched.records);
            if fetched.total_results.is_some() {
                total_reported = fetched.total_results;
            }
            if page < MAX_PAGES {
                sleep(self.page_delay).await;
            }
        }

        let fetched = records.len();
        let records = plan.filter(records, &FieldProjections::event_listing());
        Ok(FetchedEvents {
            records,
            fetched,
            total_reported,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_filters_shape() {
        let query = EventListingsQuery::new(13, "2024-06-01T00:00:00.000Z")
            .until("2024-06-30T23:59:59.999Z")
            .genre("techno");
        let filters = query.filters(&FilterPlan::parse(None));
        assert_eq!(
            Value::Object(filters),
            json!({
                "areas": {"eq": 13},
                "listingDate": {
                    "gte": "2024-06-01T00:00:00.000Z",
                    "lte": "2024-06-30T23:59:59.999Z",
                },
                "genre": {"eq": "techno"},
            })
        );
    }

    #[test]
    fn test_plan_clauses_merge_into_base() {
        let query = EventListingsQuery::new(13, "2024-06-01T00:00:00.000Z");
        let plan = FilterPlan::parse(Some("genre:any:techno,house AND eventType:eq:club"));
        let filters = query.filters(&plan);
        assert_eq!(filters["genre"], json!({"any": ["techno", "house"]}));
        assert_eq!(filters["eventType"], json!({"eq": "club"}));
        assert_eq!(filters["areas"], json!({"eq": 13}));
    }

    #[test]
    fn test_merge_updates_nested_objects_key_by_key() {
        let mut base = Map::new();
        base.insert("listingDate".to_string(), json!({"gte": "a"}));
        let mut extra = Map::new();
        extra.insert("listingDate".to_string(), json!({"lte": "b"}));
        merge_filters(&mut base, extra);
        assert_eq!(base["listingDate"], json!({"gte": "a", "lte": "b"}));
    }

    #[test]
    fn test_merge_scalar_replaces() {
        let mut base = Map::new();
        base.insert("genre".to_string(), json!({"eq": "techno"}));
        let mut extra = Map::new();
        extra.insert("genre".to_string(), json!({"eq": "house"}));
        merge_filters(&mut base, extra);
        assert_eq!(base["genre"], json!({"eq": "house"}));
    }

    #[test]
    fn test_listing_date_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let (gte, lte) = listing_date_bounds(start, end);
        assert_eq!(gte, "2024-06-01T00:00:00.000Z");
        assert_eq!(lte, "2024-06-30T23:59:59.999Z");
    }

    #[test]
    fn test_sort_presets_primary_key() {
        assert_eq!(
            SortField::Score.sort_config()["score"],
            json!({"order": "DESCENDING"})
        );
        assert_eq!(
            SortField::Title.sort_config()["titleKeyword"],
            json!({"order": "ASCENDING"})
        );
    }
}
