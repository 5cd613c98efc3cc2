use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// A freshly created user together with the API token it authenticates with.
/// The token is only ever handed out here.
#[derive(Debug, Clone)]
pub struct IssuedUser {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Recipe as returned by listings: related rows are referenced by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub time_minutes: u32,
    pub price: Decimal,
    pub link: String,
    pub ingredients: Vec<i64>,
    pub tags: Vec<i64>,
}

/// Recipe with its ingredients and tags expanded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub time_minutes: u32,
    pub price: Decimal,
    pub link: String,
    pub ingredients: Vec<Ingredient>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecipe {
    pub title: String,
    pub time_minutes: u32,
    pub price: Decimal,
    pub link: Option<String>,
    pub ingredients: Vec<i64>,
    pub tags: Vec<i64>,
}

/// Listing filter shared by ingredients and tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeFilter {
    /// Only return rows referenced by at least one recipe.
    pub assigned_only: bool,
}

impl AttributeFilter {
    pub fn assigned_only() -> Self {
        Self {
            assigned_only: true,
        }
    }
}
