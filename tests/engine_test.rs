//! End-to-end runs of the engine against an in-memory board.

use serde_json::json;
use shopr_core::board::{Board, BoardFile};
use shopr_core::config::Prefs;
use shopr_core::core::types::ChecklistItem;
use shopr_core::persistence::load_scores;
use shopr_core::service::ChecklistService;
use shopr_core::{ScoreTable, ShoprEngine, ShoprError};
use std::path::PathBuf;

fn prefs() -> Prefs {
    Prefs {
        board_file: PathBuf::from("board.json"),
        train_label: "train".to_string(),
        order_label: "order".to_string(),
        populate_label: "populate".to_string(),
        available_list: "l-available".to_string(),
        selected_list: "l-selected".to_string(),
        scores_path: PathBuf::from("scores.json"),
        k_factor: 32.0,
        shopping_list_name: "Shopping List".to_string(),
    }
}

fn board() -> Board {
    serde_json::from_value(json!({
        "lists": [
            {"id": "l-available", "name": "Recipes"},
            {"id": "l-selected", "name": "This week"},
            {"id": "l-shopping", "name": "Shopping"}
        ],
        "cards": [
            {"id": "c-last", "name": "Last trip", "idList": "l-shopping",
             "labels": [{"id": "lab-train", "name": "train"}], "idChecklists": ["k-last"]},
            {"id": "c-next", "name": "Next trip", "idList": "l-shopping",
             "labels": [{"id": "lab-order", "name": "order"}], "idChecklists": ["k-next"]},
            {"id": "c-shop", "name": "Groceries", "idList": "l-shopping",
             "labels": [{"id": "lab-pop", "name": "populate"}], "idChecklists": []},
            {"id": "c-pancakes", "name": "Pancakes", "idList": "l-selected",
             "labels": [], "idChecklists": ["k-pancakes"]},
            {"id": "c-omelette", "name": "Omelette", "idList": "l-selected",
             "labels": [], "idChecklists": ["k-omelette"]}
        ],
        "checklists": [
            {"id": "k-last", "idCard": "c-last", "checkItems": [
                {"id": "i1", "name": "Whole Milk", "pos": 0},
                {"id": "i2", "name": "Bread", "pos": 1},
                {"id": "i3", "name": "eggs 12", "pos": 2},
                {"id": "i4", "name": "Butter", "pos": 3}
            ]},
            {"id": "k-next", "idCard": "c-next", "checkItems": [
                {"id": "n1", "name": "butter", "pos": 1},
                {"id": "n2", "name": "skim milk", "pos": 2},
                {"id": "n3", "name": "jam", "pos": 3},
                {"id": "n4", "name": "bread", "pos": 4}
            ]},
            {"id": "k-pancakes", "idCard": "c-pancakes", "checkItems": [
                {"id": "p1", "name": "eggs 2", "pos": 0},
                {"id": "p2", "name": "Milk", "pos": 1},
                {"id": "p3", "name": "Flour", "pos": 2, "state": "complete"}
            ]},
            {"id": "k-omelette", "idCard": "c-omelette", "checkItems": [
                {"id": "o1", "name": "eggs 3", "pos": 0},
                {"id": "o2", "name": "cheese", "pos": 1}
            ]}
        ]
    }))
    .unwrap()
}

fn names_by_position(service: &BoardFile, checklist_id: &str) -> Vec<String> {
    let mut items = service.checklist(checklist_id).unwrap().items;
    items.sort_by_key(|item| item.position);
    items.into_iter().map(|item| item.name).collect()
}

#[test]
fn full_run_trains_orders_and_populates() {
    let dir = tempfile::tempdir().unwrap();
    let scores_path = dir.path().join("scores.json");
    let mut service = BoardFile::in_memory(board());
    let mut engine = ShoprEngine::from_file_or_new(&scores_path, 32.0).unwrap();

    let summary = engine.run(&mut service, &prefs()).unwrap();

    assert_eq!(summary.trained_checklists, 1);
    assert_eq!(summary.ordered_cards, 1);
    assert_eq!(summary.moved_items, 4);
    assert_eq!(summary.tagged_items, 2);
    assert_eq!(summary.populated_cards, 1);
    assert_eq!(summary.created_items, 3);
    assert_eq!(summary.renamed_items, 0);
    assert_eq!(summary.recycled_recipes, 2);

    // Scores were persisted after training.
    let saved = load_scores(&scores_path).unwrap();
    assert_eq!(saved.len(), engine.scores().len());
    for (key, rating) in engine.scores().iter() {
        let stored = saved.get(key).unwrap();
        assert!((stored - rating).abs() < 1e-9, "{key}: {stored} vs {rating}");
    }
    assert!(saved.contains("milk,whole"));

    assert_eq!(
        names_by_position(&service, "k-next"),
        vec!["skim milk [unsorted]", "bread", "jam [unsorted]", "butter"]
    );

    let groceries = service.card("c-shop").unwrap();
    assert_eq!(groceries.checklist_ids.len(), 1);
    let shopping = service.checklist(&groceries.checklist_ids[0]).unwrap();
    assert_eq!(shopping.name, "Shopping List");
    assert_eq!(names_by_position(&service, &shopping.id), vec!["eggs 5", "Milk", "cheese"]);

    let flour = &service.checklist("k-pancakes").unwrap().items[2];
    assert!(!flour.is_complete());

    for recipe in ["c-pancakes", "c-omelette"] {
        assert_eq!(service.card(recipe).unwrap().list_id, "l-available");
    }
    for card in ["c-last", "c-next", "c-shop"] {
        assert!(service.card(card).unwrap().labels.is_empty(), "{card} kept its label");
    }
}

#[test]
fn second_run_without_labels_changes_nothing() {
    let mut service = BoardFile::in_memory(board());
    let mut engine = ShoprEngine::new(ScoreTable::new(), 32.0);
    engine.run(&mut service, &prefs()).unwrap();
    let after_first = service.board().clone();
    let scores_after_first = engine.scores().clone();

    let summary = engine.run(&mut service, &prefs()).unwrap();
    assert_eq!(summary.trained_checklists, 0);
    assert_eq!(summary.moved_items, 0);
    assert_eq!(summary.populated_cards, 0);
    assert_eq!(service.board(), &after_first);
    assert_eq!(engine.scores(), &scores_after_first);
}

#[test]
fn populate_adds_to_existing_shopping_items() {
    let mut board = board();
    board.cards[2].checklist_ids.push("k-shop".to_string());
    board.checklists.push(
        serde_json::from_value(json!({
            "id": "k-shop", "idCard": "c-shop", "checkItems": [
                {"id": "s1", "name": "Milk 1", "pos": 0},
                {"id": "s2", "name": "Eggs", "pos": 1}
            ]
        }))
        .unwrap(),
    );
    let mut service = BoardFile::in_memory(board);
    let engine = ShoprEngine::new(ScoreTable::new(), 32.0);

    let outcome = engine.populate(&mut service, &prefs()).unwrap();
    assert_eq!(outcome.renamed_items, 2);
    assert_eq!(outcome.created_items, 1);
    assert_eq!(names_by_position(&service, "k-shop"), vec!["Milk 2", "Eggs 6", "cheese"]);
}

#[test]
fn ordering_a_trained_list_is_stable() {
    let mut service = BoardFile::in_memory(board());
    let mut engine = ShoprEngine::new(ScoreTable::new(), 32.0);
    let trained = engine.labelled_checklists(&service, "train").unwrap();
    engine.train(&trained);

    // Order the card that was just trained on.
    let first = engine.order_cards(&mut service, &Prefs {
        order_label: "train".to_string(),
        ..prefs()
    });
    assert_eq!(first.unwrap().tagged_items, 0);
    assert_eq!(
        names_by_position(&service, "k-last"),
        vec!["Whole Milk", "Bread", "eggs 12", "Butter"]
    );

    let items: Vec<ChecklistItem> = service.checklist("k-last").unwrap().items;
    for item in &items {
        assert_eq!(
            shopr_core::core::orderer::propose(engine.scores(), item),
            None,
            "{} would move again",
            item.name
        );
    }
}

#[test]
fn corrupt_score_file_is_an_error_and_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(&path, "{broken").unwrap();

    let result = ShoprEngine::from_file_or_new(&path, 32.0);
    assert!(matches!(result, Err(ShoprError::Json(_))));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{broken");
}

#[test]
fn missing_score_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    let engine = ShoprEngine::from_file_or_new(&path, 32.0).unwrap();
    assert!(engine.scores().is_empty());
    assert!(!path.exists());
}
