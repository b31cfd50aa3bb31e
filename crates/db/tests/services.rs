//! Sequence allocation and referential-integrity behaviour, run against the
//! in-memory store.

use std::collections::HashSet;
use std::sync::Arc;

use assert_matches::assert_matches;
use drawreg_core::error::CoreError;
use drawreg_core::media::MediaKind;
use drawreg_db::models::category::CreateCategory;
use drawreg_db::models::drawing::CreateDrawing;
use drawreg_db::models::issue_sheet::{CreateIssueSheet, IssueDrawingRequest};
use drawreg_db::models::register::{CreateRegister, InlineCategory, UpdateRegister};
use drawreg_db::services::{categories, drawings, issue_sheets, registers};
use drawreg_db::store::{CategoryStore, DrawingStore, RegisterStore, SequenceStore};
use drawreg_db::{MemoryStore, StoreError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ready_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.ensure_counter().await.unwrap();
    store
}

fn drawing(number: &str) -> CreateDrawing {
    CreateDrawing {
        number: number.to_string(),
        project_number: "4410".to_string(),
        description: "Ground floor layout".to_string(),
        title: "Layout".to_string(),
        size: "A1".to_string(),
        revision_count: None,
    }
}

fn category(title: &str) -> CreateCategory {
    CreateCategory {
        title: title.to_string(),
        description: String::new(),
    }
}

fn register(project_number: i64, categories: Vec<InlineCategory>) -> CreateRegister {
    CreateRegister {
        project_name: "Harbour Bridge".to_string(),
        project_number,
        discipline: "Structural".to_string(),
        engineers: vec!["J. Bradfield".to_string()],
        start_date: None,
        end_date: None,
        categories,
    }
}

fn issue_sheet(drawings: Vec<IssueDrawingRequest>) -> CreateIssueSheet {
    CreateIssueSheet {
        recipient: "Site office".to_string(),
        attention_to: String::new(),
        client: "City Council".to_string(),
        project_name: "Harbour Bridge".to_string(),
        project_number: Some(4410),
        drawings,
        remarks: String::new(),
        purpose: "Construction".to_string(),
        media: MediaKind::Physical,
        issued_by: Default::default(),
        received_by: Default::default(),
        is_saved: false,
    }
}

fn assert_not_found(err: StoreError, expected: &str) {
    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound { entity, .. }) if entity == expected
    );
}

// ---------------------------------------------------------------------------
// Sequence allocation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn allocate_before_counter_exists_is_not_initialized() {
    let store = MemoryStore::new();
    let err = issue_sheets::create_issue_sheet(&store, &issue_sheet(vec![]))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::NotInitialized(_)));
}

#[tokio::test]
async fn first_three_sheets_are_numbered_two_to_four() {
    let store = ready_store().await;

    let mut numbers = Vec::new();
    for _ in 0..3 {
        let sheet = issue_sheets::create_issue_sheet(&store, &issue_sheet(vec![]))
            .await
            .unwrap();
        numbers.push(sheet.sequence_number);
    }

    assert_eq!(numbers, vec![2, 3, 4]);
    // The counter now holds 4, so the next allocation is 5.
    assert_eq!(store.allocate_next().await.unwrap(), 5);
}

#[tokio::test]
async fn concurrent_allocations_are_distinct() {
    let store = Arc::new(ready_store().await);

    let handles: Vec<_> = (0..64)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.allocate_next().await.unwrap() })
        })
        .collect();
    let values: Vec<i64> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let distinct: HashSet<i64> = values.iter().copied().collect();
    assert_eq!(distinct.len(), 64);
    assert_eq!(values.iter().max(), Some(&65));
}

#[tokio::test]
async fn rejected_sheet_does_not_consume_a_number() {
    let store = ready_store().await;

    let bad = issue_sheet(vec![IssueDrawingRequest {
        drawing_id: 999,
        copies: 1,
    }]);
    let err = issue_sheets::create_issue_sheet(&store, &bad).await.unwrap_err();
    assert_not_found(err, "Drawing");

    let sheet = issue_sheets::create_issue_sheet(&store, &issue_sheet(vec![]))
        .await
        .unwrap();
    assert_eq!(sheet.sequence_number, 2);
}

// ---------------------------------------------------------------------------
// Issued drawing list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn issuing_same_drawing_twice_merges_copies() {
    let store = ready_store().await;
    let d = store.create_drawing(&drawing("S-100")).await.unwrap();
    let sheet = issue_sheets::create_issue_sheet(&store, &issue_sheet(vec![]))
        .await
        .unwrap();

    issue_sheets::add_drawing(&store, sheet.id, d.id, 2).await.unwrap();
    let sheet = issue_sheets::add_drawing(&store, sheet.id, d.id, 3).await.unwrap();

    assert_eq!(sheet.issued_drawings.len(), 1);
    assert_eq!(sheet.issued_drawings[0].copies, 5);
}

#[tokio::test]
async fn inline_drawings_at_creation_are_merged() {
    let store = ready_store().await;
    let d = store.create_drawing(&drawing("S-100")).await.unwrap();

    let sheet = issue_sheets::create_issue_sheet(
        &store,
        &issue_sheet(vec![
            IssueDrawingRequest { drawing_id: d.id, copies: 1 },
            IssueDrawingRequest { drawing_id: d.id, copies: 4 },
        ]),
    )
    .await
    .unwrap();

    assert_eq!(sheet.issued_drawings.len(), 1);
    assert_eq!(sheet.issued_drawings[0].copies, 5);
}

#[tokio::test]
async fn issuing_zero_copies_is_rejected() {
    let store = ready_store().await;
    let d = store.create_drawing(&drawing("S-100")).await.unwrap();
    let sheet = issue_sheets::create_issue_sheet(&store, &issue_sheet(vec![]))
        .await
        .unwrap();

    let err = issue_sheets::add_drawing(&store, sheet.id, d.id, 0).await.unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));
}

#[tokio::test]
async fn removing_unknown_entry_leaves_list_unchanged() {
    let store = ready_store().await;
    let d = store.create_drawing(&drawing("S-100")).await.unwrap();
    let sheet = issue_sheets::create_issue_sheet(&store, &issue_sheet(vec![]))
        .await
        .unwrap();
    let before = issue_sheets::add_drawing(&store, sheet.id, d.id, 2).await.unwrap();

    let err = issue_sheets::remove_drawing(&store, sheet.id, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert_not_found(err, "IssuedDrawing");

    let after = issue_sheets::get_issue_sheet(&store, sheet.id).await.unwrap();
    assert_eq!(after.issue_sheet.issued_drawings, before.issued_drawings);
}

#[tokio::test]
async fn removing_entry_by_id() {
    let store = ready_store().await;
    let a = store.create_drawing(&drawing("S-100")).await.unwrap();
    let b = store.create_drawing(&drawing("S-101")).await.unwrap();
    let sheet = issue_sheets::create_issue_sheet(&store, &issue_sheet(vec![]))
        .await
        .unwrap();
    issue_sheets::add_drawing(&store, sheet.id, a.id, 1).await.unwrap();
    let sheet = issue_sheets::add_drawing(&store, sheet.id, b.id, 1).await.unwrap();

    let entry = sheet.issued_drawings[0].entry_id;
    let sheet = issue_sheets::remove_drawing(&store, sheet.id, entry).await.unwrap();

    assert_eq!(sheet.issued_drawings.len(), 1);
    assert_eq!(sheet.issued_drawings[0].drawing_id, b.id);
}

#[tokio::test]
async fn populated_sheet_tolerates_deleted_drawing() {
    let store = ready_store().await;
    let d = store.create_drawing(&drawing("S-100")).await.unwrap();
    let sheet = issue_sheets::create_issue_sheet(
        &store,
        &issue_sheet(vec![IssueDrawingRequest { drawing_id: d.id, copies: 1 }]),
    )
    .await
    .unwrap();
    store.delete_drawing(d.id).await.unwrap();

    let populated = issue_sheets::get_issue_sheet(&store, sheet.id).await.unwrap();
    assert_eq!(populated.drawings.len(), 1);
    assert!(populated.drawings[0].drawing.is_none());
}

// ---------------------------------------------------------------------------
// Category <-> drawing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_drawing_to_empty_category() {
    let store = ready_store().await;
    let c = store.create_category(&category("Architectural")).await.unwrap();

    let (updated, d) = categories::add_drawing(&store, c.id, &drawing("A-001"))
        .await
        .unwrap();

    assert_eq!(updated.drawing_ids, vec![d.id]);
    assert_eq!(store.find_drawing(d.id).await.unwrap().unwrap().number, "A-001");
}

#[tokio::test]
async fn add_drawing_to_missing_category_creates_nothing() {
    let store = ready_store().await;

    let err = categories::add_drawing(&store, 42, &drawing("A-001"))
        .await
        .unwrap_err();
    assert_not_found(err, "Category");
    assert!(store.find_drawing(1).await.unwrap().is_none());
}

#[tokio::test]
async fn remove_drawing_detaches_and_deletes() {
    let store = ready_store().await;
    let c = store.create_category(&category("Architectural")).await.unwrap();
    let (_, d) = categories::add_drawing(&store, c.id, &drawing("A-001"))
        .await
        .unwrap();

    let updated = categories::remove_drawing(&store, c.id, d.id).await.unwrap();

    assert!(updated.drawing_ids.is_empty());
    assert!(store.find_drawing(d.id).await.unwrap().is_none());
}

#[tokio::test]
async fn remove_drawing_not_in_category_deletes_nothing() {
    let store = ready_store().await;
    let c = store.create_category(&category("Architectural")).await.unwrap();
    let stray = store.create_drawing(&drawing("A-999")).await.unwrap();

    let err = categories::remove_drawing(&store, c.id, stray.id)
        .await
        .unwrap_err();
    assert_not_found(err, "Drawing");
    assert!(store.find_drawing(stray.id).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_category_detaches_it_from_registers() {
    let store = ready_store().await;
    let r = registers::create_register(
        &store,
        &register(7, vec![InlineCategory::Title("Electrical".into())]),
    )
    .await
    .unwrap();
    let category_id = r.category_ids[0];

    categories::delete_category(&store, category_id).await.unwrap();

    let r = store.find_register(r.id).await.unwrap().unwrap();
    assert!(r.category_ids.is_empty());
    assert!(store.find_category(category_id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Register <-> category
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_with_inline_categories() {
    let store = ready_store().await;
    let existing = store.create_category(&category("General")).await.unwrap();

    let r = registers::create_register(
        &store,
        &register(
            7,
            vec![
                InlineCategory::Title("Electrical".into()),
                InlineCategory::New(category("Mechanical")),
                InlineCategory::Existing(existing.id),
            ],
        ),
    )
    .await
    .unwrap();

    assert_eq!(r.category_ids.len(), 3);
    assert_eq!(r.category_ids[2], existing.id);

    let populated = registers::get_register(&store, r.id).await.unwrap();
    let titles: Vec<_> = populated
        .categories
        .iter()
        .map(|c| c.category.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Electrical", "Mechanical", "General"]);
}

#[tokio::test]
async fn unknown_existing_category_fails_before_creating_anything() {
    let store = ready_store().await;

    let err = registers::create_register(
        &store,
        &register(
            7,
            vec![
                InlineCategory::Title("Electrical".into()),
                InlineCategory::Existing(77),
            ],
        ),
    )
    .await
    .unwrap_err();

    assert_not_found(err, "Category");
    assert!(store.list_categories().await.unwrap().is_empty());
    assert!(store.list_registers().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_places_new_categories_first() {
    let store = ready_store().await;
    let r = registers::create_register(
        &store,
        &register(7, vec![InlineCategory::Title("Civil".into())]),
    )
    .await
    .unwrap();
    let original = r.category_ids[0];

    let update = UpdateRegister {
        categories: vec![InlineCategory::Title("Electrical".into())],
        ..Default::default()
    };
    let r = registers::update_register(&store, r.id, &update).await.unwrap();

    assert_eq!(r.category_ids.len(), 2);
    assert_eq!(r.category_ids[1], original);
    let new_category = store
        .find_category(r.category_ids[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(new_category.title, "Electrical");
}

#[tokio::test]
async fn update_missing_register_creates_no_categories() {
    let store = ready_store().await;
    let update = UpdateRegister {
        categories: vec![InlineCategory::Title("Electrical".into())],
        ..Default::default()
    };

    let err = registers::update_register(&store, 5, &update).await.unwrap_err();
    assert_not_found(err, "Register");
    assert!(store.list_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_rejects_inverted_dates() {
    let store = ready_store().await;
    let mut input = register(7, vec![]);
    input.start_date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1);
    let r = registers::create_register(&store, &input).await.unwrap();

    let update = UpdateRegister {
        end_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
        ..Default::default()
    };
    let err = registers::update_register(&store, r.id, &update).await.unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));
}

#[tokio::test]
async fn add_categories_appends() {
    let store = ready_store().await;
    let r = registers::create_register(
        &store,
        &register(7, vec![InlineCategory::Title("Civil".into())]),
    )
    .await
    .unwrap();
    let original = r.category_ids[0];

    let r = registers::add_categories(&store, r.id, &[category("Hydraulic"), category("Fire")])
        .await
        .unwrap();

    assert_eq!(r.category_ids.len(), 3);
    assert_eq!(r.category_ids[0], original);
}

#[tokio::test]
async fn remove_category_detaches_and_deletes() {
    let store = ready_store().await;
    let r = registers::create_register(
        &store,
        &register(7, vec![InlineCategory::Title("Civil".into())]),
    )
    .await
    .unwrap();
    let category_id = r.category_ids[0];

    let r = registers::remove_category(&store, r.id, category_id).await.unwrap();

    assert!(r.category_ids.is_empty());
    assert!(store.find_category(category_id).await.unwrap().is_none());
}

#[tokio::test]
async fn remove_category_not_in_register_deletes_nothing() {
    let store = ready_store().await;
    let r = registers::create_register(&store, &register(7, vec![])).await.unwrap();
    let other = store.create_category(&category("Other")).await.unwrap();

    let err = registers::remove_category(&store, r.id, other.id)
        .await
        .unwrap_err();
    assert_not_found(err, "Category");
    assert!(store.find_category(other.id).await.unwrap().is_some());
}

#[tokio::test]
async fn remove_shared_category_keeps_it_for_other_registers() {
    let store = ready_store().await;
    let first = registers::create_register(
        &store,
        &register(7, vec![InlineCategory::Title("Shared".into())]),
    )
    .await
    .unwrap();
    let shared = first.category_ids[0];
    let second = registers::create_register(
        &store,
        &register(8, vec![InlineCategory::Existing(shared)]),
    )
    .await
    .unwrap();

    let first = registers::remove_category(&store, first.id, shared)
        .await
        .unwrap();
    assert!(first.category_ids.is_empty());

    let second = store.find_register(second.id).await.unwrap().unwrap();
    assert_eq!(second.category_ids, vec![shared]);
    assert!(store.find_category(shared).await.unwrap().is_some());

    // Once the last register lets go, the category is deleted.
    registers::remove_category(&store, second.id, shared)
        .await
        .unwrap();
    assert!(store.find_category(shared).await.unwrap().is_none());
}

#[tokio::test]
async fn update_skips_categories_already_attached() {
    let store = ready_store().await;
    let r = registers::create_register(
        &store,
        &register(7, vec![InlineCategory::Title("Civil".into())]),
    )
    .await
    .unwrap();
    let civil = r.category_ids[0];
    let other = store.create_category(&category("Other")).await.unwrap();

    let update = UpdateRegister {
        categories: vec![
            InlineCategory::Existing(civil),
            InlineCategory::Existing(other.id),
            InlineCategory::Existing(other.id),
        ],
        ..Default::default()
    };
    let r = registers::update_register(&store, r.id, &update).await.unwrap();

    assert_eq!(r.category_ids, vec![other.id, civil]);
    let populated = registers::get_register(&store, r.id).await.unwrap();
    assert_eq!(populated.categories.len(), 2);
}

#[tokio::test]
async fn create_collapses_repeated_existing_category() {
    let store = ready_store().await;
    let general = store.create_category(&category("General")).await.unwrap();

    let r = registers::create_register(
        &store,
        &register(
            7,
            vec![
                InlineCategory::Existing(general.id),
                InlineCategory::Existing(general.id),
            ],
        ),
    )
    .await
    .unwrap();

    assert_eq!(r.category_ids, vec![general.id]);
}

#[tokio::test]
async fn deleting_register_keeps_categories() {
    let store = ready_store().await;
    let r = registers::create_register(
        &store,
        &register(7, vec![InlineCategory::Title("Civil".into())]),
    )
    .await
    .unwrap();

    registers::delete_register(&store, r.id).await.unwrap();

    assert!(store.find_category(r.category_ids[0]).await.unwrap().is_some());
    let err = registers::delete_register(&store, r.id).await.unwrap_err();
    assert_not_found(err, "Register");
}

#[tokio::test]
async fn populated_register_skips_dangling_category() {
    let store = ready_store().await;
    let r = registers::create_register(
        &store,
        &register(
            7,
            vec![
                InlineCategory::Title("Civil".into()),
                InlineCategory::Title("Electrical".into()),
            ],
        ),
    )
    .await
    .unwrap();
    // Delete behind the glue's back to leave a dangling reference.
    store.delete_category(r.category_ids[0]).await.unwrap();

    let populated = registers::get_register(&store, r.id).await.unwrap();
    assert_eq!(populated.register.category_ids.len(), 2);
    assert_eq!(populated.categories.len(), 1);
    assert_eq!(populated.categories[0].category.title, "Electrical");
}

// ---------------------------------------------------------------------------
// Project drawings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn drawings_for_project_walks_registers_and_categories() {
    let store = ready_store().await;
    let r = registers::create_register(
        &store,
        &register(
            4410,
            vec![
                InlineCategory::Title("Civil".into()),
                InlineCategory::Title("Electrical".into()),
            ],
        ),
    )
    .await
    .unwrap();
    let other = registers::create_register(
        &store,
        &register(5000, vec![InlineCategory::Title("Other".into())]),
    )
    .await
    .unwrap();

    categories::add_drawing(&store, r.category_ids[1], &drawing("E-1")).await.unwrap();
    categories::add_drawing(&store, r.category_ids[0], &drawing("C-1")).await.unwrap();
    categories::add_drawing(&store, other.category_ids[0], &drawing("X-1")).await.unwrap();

    let numbers: Vec<String> = drawings::drawings_for_project(&store, 4410)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.number)
        .collect();
    assert_eq!(numbers, vec!["C-1", "E-1"]);
}

#[tokio::test]
async fn drawing_update_rejects_negative_revision() {
    let store = ready_store().await;
    let d = store.create_drawing(&drawing("A-1")).await.unwrap();

    let update = drawreg_db::models::drawing::UpdateDrawing {
        revision_count: Some(-1),
        ..Default::default()
    };
    let err = drawings::update_drawing(&store, d.id, &update).await.unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));

    let update = drawreg_db::models::drawing::UpdateDrawing {
        revision_count: Some(3),
        ..Default::default()
    };
    let updated = drawings::update_drawing(&store, d.id, &update).await.unwrap();
    assert_eq!(updated.revision_count, 3);
    assert_eq!(updated.number, "A-1");
}
