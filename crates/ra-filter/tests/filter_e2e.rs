//! End-to-end scenarios for the filter-expression engine.

use ra_filter_rs::{FieldProjections, FilterPlan};
use serde_json::{json, Value};

fn event_records() -> Vec<Value> {
    vec![
        json!({"event": {
            "title": "Warehouse Night",
            "genre": ["techno"],
            "artists": [{"name": "Charlotte de Witte"}],
        }}),
        json!({"event": {
            "title": "Smooth Evening",
            "genre": ["jazz"],
            "artists": [{"name": "Someone Else"}],
        }}),
    ]
}

#[test]
fn scenario_contains_any_and_has() {
    let plan = FilterPlan::parse(Some(
        "genre:contains_any:techno,house AND artists:has:charlotte",
    ));
    let kept = plan.filter(event_records(), &FieldProjections::event_listing());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0]["event"]["title"], "Warehouse Night");
}

#[test]
fn scenario_price_between_is_inclusive() {
    let plan = FilterPlan::parse(Some("price:between:10,30"));
    let records: Vec<Value> = [5, 15, 30, 31]
        .iter()
        .map(|price| json!({"price": price}))
        .collect();
    let kept = plan.filter(records, &FieldProjections::new());
    let prices: Vec<i64> = kept.iter().map(|r| r["price"].as_i64().unwrap()).collect();
    assert_eq!(prices, vec![15, 30]);
}

#[test]
fn scenario_malformed_expression_is_a_noop() {
    let plan = FilterPlan::parse(Some("genre-techno"));
    let records = event_records();
    let kept = plan.filter(records.clone(), &FieldProjections::event_listing());
    assert_eq!(kept, records);
    assert_eq!(plan.diagnostics().len(), 1);
}

#[test]
fn scenario_filtering_is_idempotent() {
    let plan = FilterPlan::parse(Some("genre:contains_any:techno,house"));
    let projections = FieldProjections::event_listing();
    let once = plan.filter(event_records(), &projections);
    let twice = plan.filter(once.clone(), &projections);
    assert_eq!(once, twice);
}

#[test]
fn scenario_round_trip_server_only_plan() {
    let plan = FilterPlan::parse(Some("genre:eq:techno"));
    assert_eq!(
        serde_json::Value::Object(plan.server_clauses_json()),
        json!({"genre": {"eq": "techno"}})
    );
    assert!(plan.client_clauses().is_empty());

    // With nothing client-side, evaluation passes records through.
    let records = event_records();
    let kept = plan.filter(records.clone(), &FieldProjections::event_listing());
    assert_eq!(kept, records);
}

#[test]
fn scenario_case_insensitive_comparison() {
    let plan = FilterPlan::parse(Some("genre:contains_any:Techno"));
    let record = json!({"event": {"genre": ["Techno "]}});
    assert!(plan.matches(&record, &FieldProjections::event_listing()));

    // Same for a client-evaluated `eq` (empty capability set forces it
    // in-process).
    let caps = ra_filter_rs::ServerCapabilities::from_operators(Vec::<String>::new());
    let plan = FilterPlan::parse_with_capabilities(Some("genre:eq:Techno"), &caps);
    let record = json!({"event": {"genre": "techno "}});
    assert!(plan.matches(&record, &FieldProjections::event_listing()));
}

#[test]
fn scenario_or_fold_keeps_both_arms() {
    let plan = FilterPlan::parse(Some("genre:eq:techno OR genre:eq:house"));
    let records = vec![
        json!({"event": {"genre": ["techno"]}}),
        json!({"event": {"genre": ["house"]}}),
        json!({"event": {"genre": ["jazz"]}}),
    ];
    let kept = plan.filter(records, &FieldProjections::event_listing());
    assert_eq!(kept.len(), 2);
}

#[test]
fn scenario_late_or_arm_keeps_its_records() {
    // A record matching only the trailing OR arm must survive end to end:
    // nothing may be delegated, or the fetch would exclude it before the
    // fold ever sees it.
    let plan = FilterPlan::parse(Some(
        "genre:eq:techno AND venue:has:fabric OR artists:has:charlotte",
    ));
    assert!(plan.server_clauses().is_empty());

    let records = vec![
        json!({"event": {
            "genre": ["jazz"],
            "venue": {"name": "Blue Note"},
            "artists": [{"name": "Charlotte de Witte"}],
        }}),
        json!({"event": {
            "genre": ["techno"],
            "venue": {"name": "Fabric"},
            "artists": [{"name": "Someone Else"}],
        }}),
        json!({"event": {
            "genre": ["jazz"],
            "venue": {"name": "Blue Note"},
            "artists": [{"name": "Someone Else"}],
        }}),
    ];
    let kept = plan.filter(records, &FieldProjections::event_listing());
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0]["event"]["artists"][0]["name"], "Charlotte de Witte");
    assert_eq!(kept[1]["event"]["venue"]["name"], "Fabric");
}

#[test]
fn scenario_not_join_excludes_matches() {
    let plan = FilterPlan::parse(Some("genre:has:techno NOT artists:has:charlotte"));
    let records = vec![
        json!({"event": {"genre": ["techno"], "artists": [{"name": "Charlotte de Witte"}]}}),
        json!({"event": {"genre": ["techno"], "artists": [{"name": "Amelie Lens"}]}}),
    ];
    let kept = plan.filter(records, &FieldProjections::event_listing());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0]["event"]["artists"][0]["name"], "Amelie Lens");
}

#[test]
fn scenario_plan_is_shareable_across_threads() {
    let plan = std::sync::Arc::new(FilterPlan::parse(Some("genre:has:techno")));
    let projections = std::sync::Arc::new(FieldProjections::event_listing());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let plan = plan.clone();
            let projections = projections.clone();
            std::thread::spawn(move || plan.filter(event_records(), &projections).len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}

#[test]
fn scenario_filter_refs_borrows_matches() {
    let plan = FilterPlan::parse(Some("genre:has:jazz"));
    let records = event_records();
    let kept = plan.filter_refs(&records, &FieldProjections::event_listing());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0]["event"]["title"], "Smooth Evening");
}
