use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct IngredientRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct TagRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub title: String,
    pub time_minutes: u32,
    pub price: Decimal,
    pub link: String,
}

/// One row of `recipe_ingredients` or `recipe_tags`.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeLinkRow {
    pub recipe_id: i64,
    pub target_id: i64,
}
