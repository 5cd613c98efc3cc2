use cucumber::when;

use recipe_lib::entities::AttributeFilter;

use crate::support::world::TestWorld;

#[when("I list my ingredients")]
pub async fn list_ingredients(world: &mut TestWorld) {
    let service = world.create_service();
    world.list_result = Some(
        service
            .list_ingredients(world.current_user_id, AttributeFilter::default())
            .await,
    );
}

#[when("I list my assigned ingredients")]
pub async fn list_assigned_ingredients(world: &mut TestWorld) {
    let service = world.create_service();
    world.list_result = Some(
        service
            .list_ingredients(world.current_user_id, AttributeFilter::assigned_only())
            .await,
    );
}

#[when(expr = "I create an ingredient named {string}")]
pub async fn create_ingredient(world: &mut TestWorld, name: String) {
    world.stored_before = world.stored_count();
    let service = world.create_service();
    world.create_result = Some(service.create_ingredient(world.current_user_id, &name).await);
}
