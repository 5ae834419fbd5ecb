//! Behaviour tests for the catalog manager.
//!
//! Runs the manager against the in-memory store:
//! - Append-on-add position assignment
//! - Self-healing list and its idempotence
//! - Full-replacement update semantics
//! - Reorder with unknown ids
//! - Delete / NotFound paths
//! - Case-insensitive search without healing

use std::sync::Arc;

use assert_matches::assert_matches;
use gamelib_core::catalog::{CatalogManager, ReorderOutcome};
use gamelib_core::error::CoreError;
use gamelib_core::game::{Game, GameFields};
use gamelib_core::memory::InMemoryGameStore;
use gamelib_core::position::{Position, MAX_POSITION};
use gamelib_core::store::GameStore;
use gamelib_core::types::{DbId, ReleaseDate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn setup() -> (Arc<InMemoryGameStore>, CatalogManager) {
    let store = Arc::new(InMemoryGameStore::new());
    let manager = CatalogManager::new(store.clone());
    (store, manager)
}

fn ids(games: &[Game]) -> Vec<DbId> {
    games.iter().map(|g| g.id).collect()
}

fn positions(games: &[Game]) -> Vec<Position> {
    games.iter().map(|g| g.fields.sort_order).collect()
}

fn full_fields(title: &str) -> GameFields {
    GameFields {
        title: title.to_string(),
        description: Some("Open-world adventure".to_string()),
        release_date: ReleaseDate::from_ymd_opt(2017, 3, 3),
        rating: Some(9.5),
        genres: vec!["Adventure".to_string(), "Action".to_string()],
        platforms: vec!["Switch".to_string()],
        cover_image_url: Some("https://img/cover.png".to_string()),
        banner_image_url: Some("https://img/banner.png".to_string()),
        trailer_url: Some("https://video/trailer".to_string()),
        more_info_url: Some("https://info".to_string()),
        screenshots: vec!["https://img/1.png".to_string(), "https://img/2.png".to_string()],
        sort_order: Position::Unassigned,
    }
}

/// Asserts the read-path ordering invariant on a listed catalog.
fn assert_catalog_invariant(games: &[Game]) {
    for game in games {
        assert!(
            game.fields.sort_order.is_assigned(),
            "game {} has no position",
            game.id
        );
    }
    for pair in games.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            (a.fields.sort_order, a.id) < (b.fields.sort_order, b.id),
            "games {} and {} are out of order",
            a.id,
            b.id
        );
    }
}

// ---------------------------------------------------------------------------
// Test: add
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_without_position_appends_at_count() {
    let (_, manager) = setup();

    for n in 0..3u32 {
        let game = manager
            .add(GameFields::titled(format!("Game {n}")))
            .await
            .unwrap();
        assert_eq!(game.fields.sort_order, Position::At(n));
    }
}

#[tokio::test]
async fn add_with_explicit_position_keeps_it() {
    let (_, manager) = setup();
    manager.add(GameFields::titled("First")).await.unwrap();

    let game = manager
        .add(GameFields::titled("Pinned").at(Position::At(40)))
        .await
        .unwrap();
    assert_eq!(game.fields.sort_order, Position::At(40));
}

#[tokio::test]
async fn add_returns_every_field_with_store_id() {
    let (_, manager) = setup();
    let fields = full_fields("Breath of the Wild");

    let game = manager.add(fields.clone()).await.unwrap();
    assert_eq!(game.id, 1);
    assert_eq!(game.fields, fields.at(Position::At(0)));
}

#[tokio::test]
async fn add_duplicate_title_propagates_conflict() {
    let (_, manager) = setup();
    manager.add(GameFields::titled("Portal")).await.unwrap();

    assert_matches!(
        manager.add(GameFields::titled("Portal")).await,
        Err(CoreError::Conflict(_))
    );
}

#[tokio::test]
async fn add_blank_title_is_rejected_before_store() {
    let (store, manager) = setup();

    assert_matches!(
        manager.add(GameFields::titled("")).await,
        Err(CoreError::Validation(_))
    );
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn position_beyond_integer_range_is_rejected() {
    let (store, manager) = setup();
    let too_far = Position::At(MAX_POSITION + 1);

    assert_matches!(
        manager.add(GameFields::titled("Big").at(too_far)).await,
        Err(CoreError::Validation(_))
    );
    assert_eq!(store.count().await.unwrap(), 0);

    let game = manager.add(GameFields::titled("Small")).await.unwrap();
    assert_matches!(
        manager
            .update(game.id, GameFields::titled("Small").at(too_far))
            .await,
        Err(CoreError::Validation(_))
    );
    assert_eq!(
        manager.get_by_id(game.id).await.unwrap().fields.sort_order,
        Position::At(0)
    );
}

// ---------------------------------------------------------------------------
// Test: update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_replaces_all_fields_and_clears_omitted_ones() {
    let (_, manager) = setup();
    let created = manager.add(full_fields("Okami")).await.unwrap();

    let replacement = GameFields::titled("Okami HD").at(Position::At(7));
    let updated = manager.update(created.id, replacement.clone()).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.fields, replacement);
    assert!(updated.fields.description.is_none());
    assert!(updated.fields.genres.is_empty());
    assert!(updated.fields.screenshots.is_empty());

    let fetched = manager.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_without_position_unassigns_until_next_list() {
    let (_, manager) = setup();
    let a = manager.add(GameFields::titled("A")).await.unwrap();
    manager.add(GameFields::titled("B")).await.unwrap();

    let updated = manager
        .update(a.id, GameFields::titled("A"))
        .await
        .unwrap();
    assert_eq!(updated.fields.sort_order, Position::Unassigned);

    let listed = manager.list().await.unwrap();
    assert_catalog_invariant(&listed);
    // B keeps 1; A scans last (index 1) and ties with B, broken by id.
    assert_eq!(ids(&listed), vec![a.id, 2]);
    assert_eq!(positions(&listed), vec![Position::At(1), Position::At(1)]);
}

#[tokio::test]
async fn update_missing_id_is_not_found() {
    let (_, manager) = setup();
    assert_matches!(
        manager.update(99, GameFields::titled("Nope")).await,
        Err(CoreError::NotFound { entity: "Game", id: 99 })
    );
}

#[tokio::test]
async fn update_to_existing_title_is_conflict() {
    let (_, manager) = setup();
    manager.add(GameFields::titled("Taken")).await.unwrap();
    let other = manager.add(GameFields::titled("Free")).await.unwrap();

    assert_matches!(
        manager.update(other.id, GameFields::titled("Taken")).await,
        Err(CoreError::Conflict(_))
    );
}

// ---------------------------------------------------------------------------
// Test: list (self-healing)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_heals_unassigned_in_scan_order() {
    let (store, manager) = setup();
    // A(null), B(0), C(null) created in that order: ids 1, 2, 3.
    let a = store
        .create(&GameFields::titled("A").at(Position::Unassigned))
        .await
        .unwrap();
    let b = store
        .create(&GameFields::titled("B").at(Position::At(0)))
        .await
        .unwrap();
    let c = store
        .create(&GameFields::titled("C").at(Position::Unassigned))
        .await
        .unwrap();

    let first = manager.list().await.unwrap();
    assert_eq!(ids(&first), vec![b.id, a.id, c.id]);
    assert_eq!(
        positions(&first),
        vec![Position::At(0), Position::At(1), Position::At(2)]
    );

    let second = manager.list().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn list_persists_healed_positions() {
    let (store, manager) = setup();
    let a = store.create(&GameFields::titled("A")).await.unwrap();

    manager.list().await.unwrap();

    let stored = store.find_by_id(a.id).await.unwrap().unwrap();
    assert_eq!(stored.fields.sort_order, Position::At(0));
}

#[tokio::test]
async fn list_orders_ties_by_id() {
    let (_, manager) = setup();
    manager
        .add(GameFields::titled("X").at(Position::At(2)))
        .await
        .unwrap();
    manager
        .add(GameFields::titled("Y").at(Position::At(0)))
        .await
        .unwrap();
    manager
        .add(GameFields::titled("Z").at(Position::At(2)))
        .await
        .unwrap();

    let listed = manager.list().await.unwrap();
    assert_catalog_invariant(&listed);
    assert_eq!(ids(&listed), vec![2, 1, 3]);
}

#[tokio::test]
async fn list_of_empty_catalog_is_empty() {
    let (_, manager) = setup();
    assert!(manager.list().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: get_by_id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_by_id_missing_is_not_found() {
    let (_, manager) = setup();
    assert_matches!(
        manager.get_by_id(5).await,
        Err(CoreError::NotFound { id: 5, .. })
    );
}

// ---------------------------------------------------------------------------
// Test: search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_is_case_insensitive() {
    let (_, manager) = setup();
    manager
        .add(GameFields::titled("The Legend of Zelda"))
        .await
        .unwrap();
    manager.add(GameFields::titled("Metroid")).await.unwrap();
    manager
        .add(GameFields::titled("Zelda II: The Adventure of Link"))
        .await
        .unwrap();

    let lower = manager.search("zelda").await.unwrap();
    let upper = manager.search("ZELDA").await.unwrap();
    assert_eq!(lower, upper);
    assert_eq!(ids(&lower), vec![1, 3]);
}

#[tokio::test]
async fn search_empty_query_returns_list_order() {
    let (_, manager) = setup();
    manager.add(GameFields::titled("One")).await.unwrap();
    manager.add(GameFields::titled("Two")).await.unwrap();
    manager.add(GameFields::titled("Three")).await.unwrap();
    manager.reorder(&[3, 1, 2]).await.unwrap();

    let listed = manager.list().await.unwrap();
    let searched = manager.search("").await.unwrap();
    assert_eq!(searched, listed);
}

#[tokio::test]
async fn search_matches_title_only() {
    let (_, manager) = setup();
    manager
        .add(GameFields {
            description: Some("zelda-like".to_string()),
            ..GameFields::titled("Tunic")
        })
        .await
        .unwrap();

    assert!(manager.search("zelda").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_does_not_heal() {
    let (store, manager) = setup();
    let a = store.create(&GameFields::titled("Unplaced")).await.unwrap();

    let found = manager.search("unplaced").await.unwrap();
    assert_eq!(found[0].fields.sort_order, Position::Unassigned);

    let stored = store.find_by_id(a.id).await.unwrap().unwrap();
    assert_eq!(stored.fields.sort_order, Position::Unassigned);
}

// ---------------------------------------------------------------------------
// Test: reorder
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reorder_assigns_sequence_indexes() {
    let (_, manager) = setup();
    for n in 1..=8 {
        manager
            .add(GameFields::titled(format!("Game {n}")))
            .await
            .unwrap();
    }

    let outcome = manager.reorder(&[5, 3, 8]).await.unwrap();
    assert_eq!(
        outcome,
        ReorderOutcome {
            applied: 3,
            skipped: vec![]
        }
    );

    assert_eq!(manager.get_by_id(5).await.unwrap().fields.sort_order, Position::At(0));
    assert_eq!(manager.get_by_id(3).await.unwrap().fields.sort_order, Position::At(1));
    assert_eq!(manager.get_by_id(8).await.unwrap().fields.sort_order, Position::At(2));
    // Untouched entries keep their positions.
    assert_eq!(manager.get_by_id(4).await.unwrap().fields.sort_order, Position::At(3));
}

#[tokio::test]
async fn reorder_skips_unknown_ids() {
    let (_, manager) = setup();
    manager.add(GameFields::titled("A")).await.unwrap();
    manager.add(GameFields::titled("B")).await.unwrap();

    let outcome = manager.reorder(&[2, 404, 1]).await.unwrap();
    assert_eq!(outcome.applied, 2);
    assert_eq!(outcome.skipped, vec![404]);

    assert_eq!(manager.get_by_id(2).await.unwrap().fields.sort_order, Position::At(0));
    // Index 2, not 1: skipped ids still consume their slot.
    assert_eq!(manager.get_by_id(1).await.unwrap().fields.sort_order, Position::At(2));
}

#[tokio::test]
async fn reorder_empty_sequence_changes_nothing() {
    let (_, manager) = setup();
    manager.add(GameFields::titled("A")).await.unwrap();
    let before = manager.list().await.unwrap();

    let outcome = manager.reorder(&[]).await.unwrap();
    assert_eq!(outcome, ReorderOutcome::default());
    assert_eq!(manager.list().await.unwrap(), before);
}

#[tokio::test]
async fn partial_reorder_relies_on_id_tie_break() {
    let (_, manager) = setup();
    for title in ["A", "B", "C"] {
        manager.add(GameFields::titled(title)).await.unwrap();
    }

    // C moves to 0 and now ties with A (id 1, position 0).
    manager.reorder(&[3]).await.unwrap();

    let listed = manager.list().await.unwrap();
    assert_catalog_invariant(&listed);
    assert_eq!(ids(&listed), vec![1, 3, 2]);
}

// ---------------------------------------------------------------------------
// Test: delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let (_, manager) = setup();
    let game = manager.add(full_fields("Celeste")).await.unwrap();

    manager.delete(game.id).await.unwrap();

    assert_matches!(
        manager.get_by_id(game.id).await,
        Err(CoreError::NotFound { .. })
    );
    assert_matches!(
        manager.delete(game.id).await,
        Err(CoreError::NotFound { .. })
    );
}

#[tokio::test]
async fn delete_leaves_gaps_without_renumbering() {
    let (_, manager) = setup();
    for title in ["A", "B", "C"] {
        manager.add(GameFields::titled(title)).await.unwrap();
    }

    manager.delete(2).await.unwrap();

    let listed = manager.list().await.unwrap();
    assert_eq!(ids(&listed), vec![1, 3]);
    assert_eq!(positions(&listed), vec![Position::At(0), Position::At(2)]);
}

#[tokio::test]
async fn add_after_delete_appends_at_current_count() {
    let (_, manager) = setup();
    for title in ["A", "B", "C"] {
        manager.add(GameFields::titled(title)).await.unwrap();
    }
    manager.delete(1).await.unwrap();

    // Two games remain, so the new one gets position 2 and ties with C.
    let d = manager.add(GameFields::titled("D")).await.unwrap();
    assert_eq!(d.fields.sort_order, Position::At(2));

    let listed = manager.list().await.unwrap();
    assert_catalog_invariant(&listed);
    assert_eq!(ids(&listed), vec![2, 3, d.id]);
}
