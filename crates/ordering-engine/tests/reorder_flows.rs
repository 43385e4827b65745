//! # Reorder Flow Tests for the Ordering Engine
//!
//! End-to-end scenarios through the public API and the in-memory gateway.
//!
//! ## Test Categories
//!
//! 1. **Shared Boards** - Append, drag between neighbors, column changes
//! 2. **Private Lists** - Per-user renumbering, cross-list atomicity
//! 3. **Concurrency** - Independent moves without locking
//! 4. **Rejection** - Hostile or inconsistent input never reaches storage

use ordering_engine::{
    ActorId, Category, CollectionId, DenseReorder, GatewayError, InMemoryOrderingStore, ItemId,
    MoveKind, OrderedItem, OrderingConfig, OrderingError, PlacementApi, PlacementOutcome,
    PlacementRequest, PlacementService, RankKey, SparseMove, UserId,
};
use std::sync::Arc;

// =============================================================================
// TEST HELPERS
// =============================================================================

type InMemoryService = PlacementService<
    InMemoryOrderingStore,
    InMemoryOrderingStore,
    InMemoryOrderingStore,
    InMemoryOrderingStore,
>;

fn make_service() -> (Arc<InMemoryOrderingStore>, InMemoryService) {
    let store = Arc::new(InMemoryOrderingStore::new());
    let service = PlacementService::with_gateway(OrderingConfig::default(), store.clone());
    (store, service)
}

/// Create `count` items in a column, each appended after the previous one.
fn make_column(
    store: &InMemoryOrderingStore,
    service: &InMemoryService,
    column: CollectionId,
    count: usize,
) -> Vec<ItemId> {
    let mut last: Option<RankKey> = None;
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let rank = service.sparse().rank_for_append(last.as_ref());
        let item = OrderedItem::new(ItemId::new(), column, rank.clone(), Category::new("todo"));
        ids.push(item.id);
        store.insert_item(item);
        last = Some(rank);
    }
    ids
}

fn column_order(store: &InMemoryOrderingStore, column: CollectionId) -> Vec<ItemId> {
    store.items_in(column).into_iter().map(|item| item.id).collect()
}

fn rank_of(store: &InMemoryOrderingStore, id: ItemId) -> String {
    store.item(id).map(|item| item.rank.to_string()).unwrap_or_default()
}

// =============================================================================
// SHARED BOARDS
// =============================================================================

#[tokio::test]
async fn test_drag_to_middle_of_column() {
    let (store, service) = make_service();
    let column = CollectionId::new();
    let ids = make_column(&store, &service, column, 4);

    // Drag the last card between the first and second
    let prev = rank_of(&store, ids[0]);
    let next = rank_of(&store, ids[1]);
    let request = PlacementRequest::Sparse(
        SparseMove::new(ids[3], column, ActorId::new()).between(Some(&prev), Some(&next)),
    );
    service.place(request).await.unwrap();

    assert_eq!(column_order(&store, column), vec![ids[0], ids[3], ids[1], ids[2]]);
}

#[tokio::test]
async fn test_drag_to_top_and_bottom() {
    let (store, service) = make_service();
    let column = CollectionId::new();
    let ids = make_column(&store, &service, column, 3);

    let first = rank_of(&store, ids[0]);
    service
        .sparse()
        .move_item(SparseMove::new(ids[2], column, ActorId::new()).between(None, Some(&first)))
        .await
        .unwrap();

    let last = rank_of(&store, ids[1]);
    service
        .sparse()
        .move_item(SparseMove::new(ids[0], column, ActorId::new()).between(Some(&last), None))
        .await
        .unwrap();

    assert_eq!(column_order(&store, column), vec![ids[2], ids[1], ids[0]]);
}

#[tokio::test]
async fn test_move_to_other_column_changes_category_with_rank() {
    let (store, service) = make_service();
    let todo = CollectionId::new();
    let done = CollectionId::new();
    let todo_ids = make_column(&store, &service, todo, 2);
    let done_ids = make_column(&store, &service, done, 1);

    let existing = rank_of(&store, done_ids[0]);
    let mv = SparseMove::new(todo_ids[0], done, ActorId::new())
        .between(Some(&existing), None)
        .with_category(Category::new("done"));

    let outcome = service.place(PlacementRequest::Sparse(mv)).await.unwrap();

    let PlacementOutcome::Sparse(updated) = outcome else {
        panic!("expected sparse outcome");
    };
    assert_eq!(updated.collection_id, done);
    assert_eq!(updated.category, Category::new("done"));
    assert_eq!(column_order(&store, done), vec![done_ids[0], todo_ids[0]]);
    assert_eq!(column_order(&store, todo), vec![todo_ids[1]]);
    assert_eq!(store.activity().len(), 1);
}

#[tokio::test]
async fn test_repeated_drops_at_same_boundary_stay_ordered() {
    let (store, service) = make_service();
    let column = CollectionId::new();
    let ids = make_column(&store, &service, column, 2);
    let extra = make_column(&store, &service, CollectionId::new(), 30);

    // Keep dropping new cards directly after the first one
    let anchor = rank_of(&store, ids[0]);
    let mut expected = vec![ids[0]];
    for id in extra.iter().rev() {
        let next = store
            .items_in(column)
            .get(1)
            .map(|item| item.rank.to_string())
            .unwrap_or_default();
        let mv = SparseMove::new(*id, column, ActorId::new())
            .between(Some(&anchor), Some(&next))
            .with_category(Category::new("todo"));
        service.sparse().move_item(mv).await.unwrap();
        expected.insert(1, *id);
    }
    expected.push(ids[1]);

    assert_eq!(column_order(&store, column), expected);
}

// =============================================================================
// PRIVATE LISTS
// =============================================================================

#[tokio::test]
async fn test_renumber_scoped_to_one_user() {
    let (store, service) = make_service();
    let alice = UserId::new();
    let bob = UserId::new();
    let (t1, t2, t3) = (ItemId::new(), ItemId::new(), ItemId::new());

    service
        .dense()
        .renumber(DenseReorder::new(bob, t1, vec![t1, t2, t3]))
        .await
        .unwrap();
    service
        .dense()
        .renumber(DenseReorder::new(alice, t3, vec![t3, t1, t2]))
        .await
        .unwrap();

    let alice_order: Vec<_> = store.positions_for(alice).iter().map(|e| (e.item_id, e.position)).collect();
    assert_eq!(alice_order, vec![(t3, 1), (t1, 2), (t2, 3)]);

    let bob_order: Vec<_> = store.positions_for(bob).iter().map(|e| (e.item_id, e.position)).collect();
    assert_eq!(bob_order, vec![(t1, 1), (t2, 2), (t3, 3)]);
}

#[tokio::test]
async fn test_cross_list_failure_leaves_source_untouched() {
    let (store, service) = make_service();
    let user = UserId::new();
    let (s1, s2, s3) = (ItemId::new(), ItemId::new(), ItemId::new());
    let t1 = ItemId::new();

    service
        .dense()
        .renumber(DenseReorder::new(user, s1, vec![s1, s2, s3]))
        .await
        .unwrap();
    let before: Vec<_> = store.positions_for(user);

    // s2 moves to the target list; the target write is rejected
    store.fail_upserts_for(t1);
    let reorder = DenseReorder::new(user, s2, vec![t1, s2]).with_source(vec![s1, s3]);
    let result = service.dense().renumber(reorder).await;

    assert!(matches!(
        result,
        Err(OrderingError::Gateway(GatewayError::TransactionAborted(_)))
    ));
    assert_eq!(store.positions_for(user), before);
}

#[tokio::test]
async fn test_cross_list_move_writes_both_lists() {
    let (store, service) = make_service();
    let user = UserId::new();
    let (a, b, c) = (ItemId::new(), ItemId::new(), ItemId::new());

    let request = PlacementRequest::Dense {
        reorder: DenseReorder::new(user, b, vec![b, c]).with_source(vec![a]),
        change: MoveKind::ReorderOnly,
        actor: ActorId::new(),
    };
    let outcome = service.place(request).await.unwrap();

    assert_eq!(outcome, PlacementOutcome::Dense { rows_written: 3 });
    assert_eq!(store.position(user, b).map(|e| e.position), Some(1));
    assert_eq!(store.position(user, c).map(|e| e.position), Some(2));
    assert_eq!(store.position(user, a).map(|e| e.position), Some(1));
}

#[tokio::test]
async fn test_dense_category_failure_reported_unmodified() {
    let (store, service) = make_service();
    let column = CollectionId::new();
    let ids = make_column(&store, &service, column, 1);
    let user = UserId::new();
    store.fail_category_changes(true);

    let request = PlacementRequest::Dense {
        reorder: DenseReorder::new(user, ids[0], vec![ids[0]]),
        change: MoveKind::WithCategoryChange {
            category: Category::new("blocked"),
        },
        actor: ActorId::new(),
    };
    let result = service.place(request).await;

    match result {
        Err(OrderingError::CategoryChangeFailed(inner)) => {
            assert_eq!(inner, GatewayError::Unavailable("category write refused".into()))
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(store.positions_for(user).is_empty());
}

// =============================================================================
// CONCURRENCY
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_moves_of_different_items() {
    let (store, service) = make_service();
    let service = Arc::new(service);
    let column = CollectionId::new();
    let ids = make_column(&store, &service, column, 8);

    // Every item is re-ranked into a distinct slot after "zz" concurrently
    let mut handles = Vec::new();
    for (i, id) in ids.iter().copied().enumerate() {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let prev = format!("zz{}", i + 1);
            let next = format!("zz{}", i + 2);
            service
                .place(PlacementRequest::Sparse(
                    SparseMove::new(id, column, ActorId::new()).between(Some(&prev), Some(&next)),
                ))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(column_order(&store, column), ids);
}

#[tokio::test]
async fn test_same_slot_collision_both_succeed() {
    let (store, service) = make_service();
    let column = CollectionId::new();
    let ids = make_column(&store, &service, column, 4);

    let prev = rank_of(&store, ids[0]);
    let next = rank_of(&store, ids[1]);
    for id in [ids[2], ids[3]] {
        service
            .sparse()
            .move_item(SparseMove::new(id, column, ActorId::new()).between(Some(&prev), Some(&next)))
            .await
            .unwrap();
    }

    // Same neighbors, same midpoint: both writes land, the keys tie
    assert_eq!(rank_of(&store, ids[2]), rank_of(&store, ids[3]));
    let order = column_order(&store, column);
    assert_eq!(order.first(), Some(&ids[0]));
    assert_eq!(order.last(), Some(&ids[1]));
}

// =============================================================================
// REJECTION
// =============================================================================

#[tokio::test]
async fn test_hostile_neighbor_key_rejected() {
    let (store, service) = make_service();
    let column = CollectionId::new();
    let ids = make_column(&store, &service, column, 2);
    let original = rank_of(&store, ids[1]);

    for hostile in ["AB!", "", " ", "h\u{0}", "\u{212A}"] {
        let mv = SparseMove::new(ids[1], column, ActorId::new()).between(Some(hostile), None);
        let result = service.place(PlacementRequest::Sparse(mv)).await;
        assert!(
            matches!(result, Err(OrderingError::InvalidRank(_))),
            "{hostile:?} accepted"
        );
    }
    assert_eq!(rank_of(&store, ids[1]), original);
}

#[tokio::test]
async fn test_inverted_neighbors_rejected() {
    let (store, service) = make_service();
    let column = CollectionId::new();
    let ids = make_column(&store, &service, column, 3);

    let prev = rank_of(&store, ids[2]);
    let next = rank_of(&store, ids[0]);
    let mv = SparseMove::new(ids[1], column, ActorId::new()).between(Some(&prev), Some(&next));
    let result = service.place(PlacementRequest::Sparse(mv)).await;

    assert!(matches!(result, Err(OrderingError::InvalidRange { .. })));
    assert_eq!(column_order(&store, column), ids);
}

#[tokio::test]
async fn test_move_of_deleted_item_is_not_found() {
    let (_store, service) = make_service();
    let ghost = ItemId::new();

    let result = service
        .place(PlacementRequest::Sparse(SparseMove::new(
            ghost,
            CollectionId::new(),
            ActorId::new(),
        )))
        .await;

    assert!(matches!(result, Err(OrderingError::NotFound { item_id }) if item_id == ghost));
}
