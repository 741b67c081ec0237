//! Recipe editor save flows against a fake backend

mod support;

use hh_client::views::{DraftLine, EditorMode, RecipeEditor};
use serde_json::json;
use support::{ingredient, item, recipe, BackendState, FakeBackend};

fn kitchen() -> BackendState {
    BackendState {
        items: vec![item(1, "Milk", false), item(2, "Flour", true)],
        recipes: vec![recipe(5, "Pancakes", "Mix and fry")],
        ingredients: vec![ingredient(10, 5, 1, "2dl", false)],
        ..Default::default()
    }
}

fn line(weight: &str) -> DraftLine {
    DraftLine {
        weight: weight.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_posts_recipe_then_ingredients() {
    let backend = FakeBackend::start(kitchen()).await;
    let mut editor = RecipeEditor::for_create(&backend.client).await;
    assert_eq!(editor.error(), None);
    assert_eq!(editor.mode(), EditorMode::Create);

    editor.draft_mut().name = "Crepes".to_string();
    editor.draft_mut().description = "Thin".to_string();
    editor.draft_mut().lines.push(line("3dl"));
    assert!(editor.select_item(0, 1));
    editor.draft_mut().lines.push(DraftLine {
        is_available: true,
        ..line("150g")
    });
    assert!(editor.select_item(1, 2));
    backend.clear_requests();

    let saved = editor.save(&backend.client).await.unwrap();
    assert_eq!(editor.error(), None);
    let recipe_id = saved.id.unwrap();

    let mutations = backend.mutations();
    assert_eq!(mutations.len(), 3);
    assert_eq!(mutations[0].path, "/api/recipes");
    assert_eq!(
        mutations[0].body,
        Some(json!({"name": "Crepes", "description": "Thin"}))
    );
    assert_eq!(
        mutations[1].body,
        Some(json!({
            "recipeId": recipe_id,
            "ingredientId": 1,
            "weight": "3dl",
            "isAvailable": false
        }))
    );
    assert_eq!(mutations[2].body.as_ref().unwrap()["ingredientId"], 2);
    assert_eq!(mutations[2].body.as_ref().unwrap()["isAvailable"], true);
}

#[tokio::test]
async fn test_create_skips_lines_without_item() {
    let backend = FakeBackend::start(kitchen()).await;
    let mut editor = RecipeEditor::for_create(&backend.client).await;

    editor.draft_mut().name = "Soup".to_string();
    editor.draft_mut().lines.push(DraftLine {
        ingredient_name: "Something new".to_string(),
        ..line("1")
    });
    backend.clear_requests();

    assert!(editor.save(&backend.client).await.is_some());
    assert_eq!(backend.count("POST", "/api/recipes"), 1);
    assert_eq!(backend.count("POST", "/api/recipeingredients"), 0);
}

#[tokio::test]
async fn test_create_stops_at_first_failed_ingredient() {
    let backend = FakeBackend::start(kitchen()).await;
    backend.with_state(|s| s.ingredient_create_limit = Some(1));

    let mut editor = RecipeEditor::for_create(&backend.client).await;
    editor.draft_mut().name = "Bread".to_string();
    for (index, id) in [1, 2, 1].into_iter().enumerate() {
        editor.draft_mut().lines.push(line("1"));
        assert!(editor.select_item(index, id));
    }

    assert!(editor.save(&backend.client).await.is_none());
    assert_eq!(editor.error(), Some("Failed to create recipe"));

    // Recipe and first row stay; the third line was never sent
    assert_eq!(backend.count("POST", "/api/recipeingredients"), 2);
    backend.with_state(|s| {
        assert!(s.recipes.iter().any(|r| r.name == "Bread"));
        assert_eq!(s.ingredients.len(), 2);
    });
}

#[tokio::test]
async fn test_edit_prefills_and_updates_recipe_only() {
    let backend = FakeBackend::start(kitchen()).await;
    let mut editor = RecipeEditor::for_edit(&backend.client, 5).await;
    assert_eq!(editor.error(), None);
    assert_eq!(editor.mode(), EditorMode::Edit(5));
    assert_eq!(editor.draft().name, "Pancakes");
    assert_eq!(editor.draft().lines.len(), 1);
    assert_eq!(editor.draft().lines[0].ingredient_name, "Milk");

    editor.draft_mut().name = "Fluffy pancakes".to_string();
    editor.draft_mut().lines[0].weight = "5dl".to_string();
    backend.clear_requests();

    let saved = editor.save(&backend.client).await.unwrap();
    assert_eq!(saved.name, "Fluffy pancakes");

    let mutations = backend.mutations();
    assert_eq!(mutations.len(), 1);
    assert_eq!(mutations[0].method, "PUT");
    assert_eq!(mutations[0].path, "/api/recipes/5");
    assert_eq!(
        mutations[0].body,
        Some(json!({"id": 5, "name": "Fluffy pancakes", "description": "Mix and fry"}))
    );
    backend.with_state(|s| assert_eq!(s.ingredients[0].weight, "2dl"));
}

#[tokio::test]
async fn test_edit_failure_message() {
    let backend = FakeBackend::start(kitchen()).await;
    let mut editor = RecipeEditor::for_edit(&backend.client, 5).await;
    backend.fail("PUT /api/recipes/5");

    assert!(editor.save(&backend.client).await.is_none());
    assert_eq!(editor.error(), Some("Failed to update recipe"));
}

#[tokio::test]
async fn test_invalid_draft_sends_nothing() {
    let backend = FakeBackend::start(kitchen()).await;
    let mut editor = RecipeEditor::for_create(&backend.client).await;
    editor.draft_mut().name = "   ".to_string();
    backend.clear_requests();

    assert!(editor.save(&backend.client).await.is_none());
    assert_eq!(editor.error(), Some("Recipe name is required"));
    assert_eq!(editor.validation_errors().len(), 1);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_edit_with_empty_success_response() {
    let backend = FakeBackend::start(BackendState {
        empty_write_responses: true,
        ..kitchen()
    })
    .await;
    let mut editor = RecipeEditor::for_edit(&backend.client, 5).await;
    editor.draft_mut().description = "Rest the batter".to_string();

    let saved = editor.save(&backend.client).await.unwrap();
    assert_eq!(editor.error(), None);
    assert_eq!(saved.id, Some(5));
    assert_eq!(saved.description, "Rest the batter");
}
