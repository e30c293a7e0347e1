use std::sync::Arc;

use dinemap::engine::{MapViewport, RenderEvent, TableState};
use dinemap::source::{FileRowSource, RowAdapter, TableFiles};
use dinemap::{
    ChainFilter, ChainStatus, Coordinates, Directory, FacetColumn, FilterState, RecordingTarget,
    TableKind, ViewStatus,
};
use pretty_assertions::assert_eq;

mod common;
use common::{
    init_tracing, standard_tables, write_tables, CALL_CSV, CUISINE_CSV, LEGACY_CUISINE_CSV,
    LEGACY_RESTAURANT_CSV, RESTAURANT_CSV,
};

fn viewport() -> MapViewport {
    MapViewport::new(Coordinates::new(29.4241, -98.4936).unwrap(), 10)
}

fn directory_at(path: &std::path::Path) -> Directory {
    let source = FileRowSource::new(path, TableFiles::default());
    Directory::new(Arc::new(source), RowAdapter::default(), viewport())
}

#[tokio::test]
async fn test_load_restaurants_from_files() {
    init_tracing();
    let dir = standard_tables();
    let directory = directory_at(dir.path());

    let restaurants = directory.load_restaurants().await.unwrap();

    assert_eq!(restaurants.len(), 5);
    assert_eq!(restaurants[0].name, "Taco Haven");
    assert_eq!(restaurants[0].cuisine_keywords, vec!["Tacos", "Burritos"]);
    assert_eq!(restaurants[2].cuisine_keywords, vec!["BBQ", "Tex-Mex", "Tacos"]);
    assert_eq!(restaurants[2].coordinates, None);
    assert_eq!(restaurants[3].chain, ChainStatus::Yes);
    assert!(!restaurants[3].operational);
    assert_eq!(restaurants[4].chain, ChainStatus::Unknown);
    assert_eq!(restaurants[4].coordinates, None);
}

#[tokio::test]
async fn test_cuisine_index_strips_bom() {
    init_tracing();
    let dir = standard_tables();
    let directory = directory_at(dir.path());
    let mut target = RecordingTarget::new();

    let status = directory.show_cuisine_index(&mut target).await;

    assert_eq!(status, ViewStatus::Rendered);
    assert_eq!(
        target.last(),
        Some(&RenderEvent::CuisineTiles {
            ids: vec![
                "Tacos".to_string(),
                "BBQ".to_string(),
                "Vietnamese".to_string()
            ],
        })
    );
}

#[tokio::test]
async fn test_cuisine_view_uses_token_membership_and_highlight() {
    init_tracing();
    let dir = standard_tables();
    let directory = directory_at(dir.path());
    let mut target = RecordingTarget::new();

    directory
        .show_cuisine(Some("Tacos"), Some("r3"), &mut target)
        .await;

    assert_eq!(
        target.last(),
        Some(&RenderEvent::TileList {
            ids: vec!["r1".to_string(), "r3".to_string()],
            selected_id: Some("r3".to_string()),
        })
    );
}

#[tokio::test]
async fn test_cuisine_view_ignores_selection_outside_matches() {
    let dir = standard_tables();
    let directory = directory_at(dir.path());
    let mut target = RecordingTarget::new();

    directory
        .show_cuisine(Some("Vietnamese"), Some("r1"), &mut target)
        .await;

    assert_eq!(
        target.last(),
        Some(&RenderEvent::TileList {
            ids: vec!["r4".to_string()],
            selected_id: None,
        })
    );
}

#[tokio::test]
async fn test_cuisine_view_without_cuisine_lists_everything() {
    let dir = standard_tables();
    let directory = directory_at(dir.path());
    let mut target = RecordingTarget::new();

    directory.show_cuisine(None, None, &mut target).await;

    let Some(RenderEvent::TileList { ids, .. }) = target.last() else {
        panic!("expected tile list");
    };
    assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn test_profile_renders_related_calls_in_source_order() {
    init_tracing();
    let dir = standard_tables();
    let directory = directory_at(dir.path());
    let mut target = RecordingTarget::new();

    let status = directory.show_profile("r1", &mut target).await;

    assert_eq!(status, ViewStatus::Rendered);
    assert_eq!(
        target.last(),
        Some(&RenderEvent::Profile {
            id: "r1".to_string(),
            call_dates: vec!["2024-03-01".to_string(), "2024-03-09".to_string()],
        })
    );
}

#[tokio::test]
async fn test_profile_unknown_id_is_not_found() {
    let dir = standard_tables();
    let directory = directory_at(dir.path());
    let mut target = RecordingTarget::new();

    let status = directory.show_profile("r404", &mut target).await;

    assert_eq!(status, ViewStatus::NotFound);
    assert_eq!(
        target.last(),
        Some(&RenderEvent::NotFound {
            what: "r404".to_string()
        })
    );
}

#[tokio::test]
async fn test_profile_survives_missing_call_table() {
    let dir = write_tables(&[("Restaurant.csv", RESTAURANT_CSV)]);
    let directory = directory_at(dir.path());
    let mut target = RecordingTarget::new();

    let status = directory.show_profile("r2", &mut target).await;

    assert_eq!(status, ViewStatus::Rendered);
    assert_eq!(
        target.last(),
        Some(&RenderEvent::Profile {
            id: "r2".to_string(),
            call_dates: vec![],
        })
    );
}

#[tokio::test]
async fn test_load_all_isolates_failures() {
    init_tracing();
    let dir = write_tables(&[("Cuisine.csv", CUISINE_CSV), ("Call.csv", CALL_CSV)]);
    let directory = directory_at(dir.path());

    let snapshot = directory.load_all().await;

    assert_eq!(snapshot.cuisines.records().map(|r| r.len()), Some(3));
    assert_eq!(snapshot.calls.records().map(|r| r.len()), Some(3));
    assert!(matches!(snapshot.restaurants, TableState::LoadFailed(_)));
    assert!(snapshot
        .restaurants
        .failure()
        .unwrap()
        .contains("restaurant table"));
}

#[tokio::test]
async fn test_unreadable_table_is_reported_apart_from_fetch_failure() {
    init_tracing();
    let dir = write_tables(&[("Cuisine.csv", "\n\n")]);
    let directory = directory_at(dir.path());

    let mut index = RecordingTarget::new();
    assert_eq!(
        directory.show_cuisine_index(&mut index).await,
        ViewStatus::LoadFailed
    );
    assert_eq!(
        index.last(),
        Some(&RenderEvent::LoadFailed {
            table: TableKind::Cuisine,
            reason: "Failed to read cuisine table: Parse error: Empty CSV file".to_string(),
        })
    );

    let mut grid = RecordingTarget::new();
    directory.show_cuisine(Some("Tacos"), None, &mut grid).await;
    let Some(RenderEvent::LoadFailed { reason, .. }) = grid.last() else {
        panic!("expected load failure");
    };
    assert!(reason.starts_with("Failed to fetch restaurant table"));
}

#[tokio::test]
async fn test_map_lifecycle() {
    init_tracing();
    let dir = standard_tables();
    let directory = directory_at(dir.path());
    let mut target = RecordingTarget::new();

    let mut engine = directory.open_map(&mut target).await;

    let facets: Vec<_> = target
        .events()
        .iter()
        .filter_map(|event| match event {
            RenderEvent::FacetControl { column, values } => Some((*column, values.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        facets,
        vec![
            (
                FacetColumn::Cuisine,
                vec!["BBQ", "Burritos", "Street Tacos", "Tacos", "Tex-Mex", "Vietnamese"]
                    .into_iter()
                    .map(String::from)
                    .collect()
            ),
            (
                FacetColumn::City,
                vec!["Austin".to_string(), "Dallas".to_string(), "San Antonio".to_string()]
            ),
            (
                FacetColumn::Neighborhood,
                vec!["Downtown".to_string(), "Midtown".to_string(), "Pearl".to_string()]
            ),
            (FacetColumn::Chain, vec!["No".to_string(), "Yes".to_string()]),
        ]
    );

    // r3 and r5 have no usable coordinates.
    let ids: Vec<_> = engine.markers().iter().map(|m| m.restaurant_id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2", "r4"]);
    let bounds = engine.viewport().bounds.unwrap();
    assert_eq!(bounds.south, 29.4241);
    assert_eq!(bounds.north, 29.45);
    assert_eq!(bounds.west, -98.5);
    assert_eq!(bounds.east, -98.4798);

    target.take();
    engine.set_filter(
        FilterState::new()
            .with_city("San Antonio")
            .with_chain(ChainFilter::No),
        &mut target,
    );
    let ids: Vec<_> = engine.markers().iter().map(|m| m.restaurant_id.as_str()).collect();
    assert_eq!(ids, vec!["r1"]);
    assert_eq!(target.events()[0], RenderEvent::ClearMarkers);

    engine.update_filter(&mut target, |filter| {
        filter.chain = None;
        filter.keyword = Some("TACO".to_string());
    });
    let ids: Vec<_> = engine.markers().iter().map(|m| m.restaurant_id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);
}

#[tokio::test]
async fn test_map_load_failure_renders_error_view() {
    let dir = write_tables(&[]);
    let directory = directory_at(dir.path());
    let mut target = RecordingTarget::new();

    let engine = directory.open_map(&mut target).await;

    assert!(matches!(engine.state(), TableState::LoadFailed(_)));
    assert!(matches!(
        target.last(),
        Some(RenderEvent::LoadFailed {
            table: TableKind::Restaurant,
            ..
        })
    ));
    assert!(engine.markers().is_empty());
}

#[tokio::test]
async fn test_legacy_tables_adapt_to_same_records() {
    init_tracing();
    let dir = write_tables(&[
        ("Cuisine.csv", LEGACY_CUISINE_CSV),
        ("Restaurant.csv", LEGACY_RESTAURANT_CSV),
    ]);
    let directory = directory_at(dir.path());

    let cuisines = directory.load_cuisines().await.unwrap();
    assert_eq!(cuisines[1].id, "BBQ");
    assert_eq!(cuisines[1].image_url, "https://img.example/bbq.png");

    let restaurants = directory.load_restaurants().await.unwrap();
    assert_eq!(restaurants[0].id, "Taco Haven");
    assert_eq!(restaurants[0].display_name(), "Taco Haven");
    assert_eq!(
        restaurants[0].coordinates,
        Coordinates::new(29.4241, -98.4936)
    );
    assert_eq!(restaurants[1].coordinates, None);
    assert_eq!(restaurants[1].chain, ChainStatus::Yes);

    let mut target = RecordingTarget::new();
    let mut engine = directory.open_map(&mut target).await;
    engine.set_filter(FilterState::new().with_keyword("smoke"), &mut target);
    assert!(engine.markers().is_empty());
    assert_eq!(engine.matches().len(), 1);
}
