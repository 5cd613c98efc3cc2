use cucumber::then;

use recipe_lib::entities::AttributeFilter;
use recipe_lib::errors_service::RecipeServiceError;

use crate::support::world::TestWorld;

#[then(expr = "I should receive {int} ingredients")]
pub async fn receive_ingredient_count(world: &mut TestWorld, count: usize) {
    let result = world.list_result.as_ref().expect("Result should exist");
    assert_eq!(result.as_ref().unwrap().len(), count);
}

#[then(expr = "the ingredient names should be {string} in any order")]
pub async fn ingredient_names(world: &mut TestWorld, expected: String) {
    let result = world.list_result.as_ref().expect("Result should exist");
    let mut names: Vec<&str> = result
        .as_ref()
        .unwrap()
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    let mut expected: Vec<&str> = expected.split(", ").collect();
    names.sort_unstable();
    expected.sort_unstable();
    assert_eq!(names, expected);
}

#[then(expr = "storage should have been asked for assigned_only = {word}")]
pub async fn storage_filter(world: &mut TestWorld, assigned_only: String) {
    let expected = AttributeFilter {
        assigned_only: assigned_only == "true",
    };
    let store = world.store.lock().unwrap();
    assert_eq!(store.last_filter, Some(expected));
}

#[then("the ingredient should be created successfully")]
pub async fn ingredient_created(world: &mut TestWorld) {
    let result = world.create_result.as_ref().expect("Result should exist");
    assert!(result.is_ok(), "Ingredient creation should succeed");
}

#[then(expr = "I should own exactly {int} ingredient named {string}")]
pub async fn own_ingredient_named(world: &mut TestWorld, count: usize, name: String) {
    let store = world.store.lock().unwrap();
    let owned = store
        .ingredients
        .iter()
        .filter(|i| i.user_id == world.current_user_id && i.name == name)
        .count();
    assert_eq!(owned, count);
}

#[then("I should receive a validation error")]
pub async fn validation_error(world: &mut TestWorld) {
    assert!(matches!(
        world.create_result,
        Some(Err(RecipeServiceError::Validation(_)))
    ));
}

#[then("no ingredient should be stored")]
pub async fn nothing_stored(world: &mut TestWorld) {
    assert_eq!(world.stored_count(), world.stored_before);
}
