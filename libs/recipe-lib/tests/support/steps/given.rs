use cucumber::given;

use crate::support::world::TestWorld;

#[given("a clean recipe database")]
pub async fn clean_database(world: &mut TestWorld) {
    *world = TestWorld::default();
}

#[given(expr = "I am authenticated as {string}")]
pub async fn authenticated_as(world: &mut TestWorld, _email: String) {
    world.current_user_id = 1;
    world.other_user_id = 2;
}

#[given(expr = "I own the ingredient {string}")]
pub async fn own_ingredient(world: &mut TestWorld, name: String) {
    let user_id = world.current_user_id;
    world.store.lock().unwrap().insert(user_id, &name);
}

#[given(expr = "another user owns the ingredient {string}")]
pub async fn other_user_owns_ingredient(world: &mut TestWorld, name: String) {
    let user_id = world.other_user_id;
    world.store.lock().unwrap().insert(user_id, &name);
}
