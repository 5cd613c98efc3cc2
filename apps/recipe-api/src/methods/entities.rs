use recipe_lib::entities::{AttributeFilter, Ingredient, NewRecipe, Recipe, RecipeDetail, Tag};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateIngredientRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct IngredientResponse {
    pub id: i64,
    pub name: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        IngredientResponse {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateTagRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        TagResponse {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// `assigned_only` accepts integers (non-zero means true) and `true`/`false`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssignedQuery {
    /// Only return items referenced by at least one recipe
    pub assigned_only: Option<String>,
}

impl AssignedQuery {
    pub fn filter(&self) -> Result<AttributeFilter, ApiError> {
        let assigned_only = match self.assigned_only.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            Some(v) => v
                .parse::<i64>()
                .map(|n| n != 0)
                .map_err(|_| ApiError::BadRequest(format!("invalid assigned_only value: {v}")))?,
        };
        Ok(AttributeFilter { assigned_only })
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub time_minutes: u32,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[validate(length(max = 255))]
    pub link: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<i64>,
    #[serde(default)]
    pub tags: Vec<i64>,
}

impl From<CreateRecipeRequest> for NewRecipe {
    fn from(request: CreateRecipeRequest) -> Self {
        NewRecipe {
            title: request.title,
            time_minutes: request.time_minutes,
            price: request.price,
            link: request.link,
            ingredients: request.ingredients,
            tags: request.tags,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RecipeResponse {
    pub id: i64,
    pub title: String,
    pub time_minutes: u32,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub link: String,
    pub ingredients: Vec<i64>,
    pub tags: Vec<i64>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        RecipeResponse {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            ingredients: recipe.ingredients,
            tags: recipe.tags,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RecipeDetailResponse {
    pub id: i64,
    pub title: String,
    pub time_minutes: u32,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub link: String,
    pub ingredients: Vec<IngredientResponse>,
    pub tags: Vec<TagResponse>,
}

impl From<RecipeDetail> for RecipeDetailResponse {
    fn from(recipe: RecipeDetail) -> Self {
        RecipeDetailResponse {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            ingredients: recipe.ingredients.into_iter().map(IngredientResponse::from).collect(),
            tags: recipe.tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}
