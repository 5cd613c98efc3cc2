use crate::entities::{
    AttributeFilter, Ingredient, IssuedUser, NewRecipe, Recipe, RecipeDetail, Tag, User,
};
use crate::errors_service::RecipeServiceError;
use crate::repository::models::{IngredientRow, RecipeLinkRow, RecipeRow, TagRow, UserRow};
use crate::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};
use crate::repository::{IngredientRepository, RecipeRepository, TagRepository, UserRepository};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use uuid::Uuid;

const MAX_NAME_LENGTH: usize = 255;
const MAX_PRICE_SCALE: u32 = 2;

fn max_price() -> Decimal {
    // DECIMAL(5, 2)
    Decimal::new(99_999, 2)
}

fn validate_name(field: &str, value: &str) -> Result<(), RecipeServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RecipeServiceError::Validation(format!(
            "{field} cannot be empty"
        )));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(RecipeServiceError::Validation(format!(
            "{field} cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_recipe(recipe: &NewRecipe) -> Result<(), RecipeServiceError> {
    validate_name("title", &recipe.title)?;
    if recipe.price.is_sign_negative() {
        return Err(RecipeServiceError::Validation(
            "price cannot be negative".to_string(),
        ));
    }
    if recipe.price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(RecipeServiceError::Validation(format!(
            "price cannot have more than {MAX_PRICE_SCALE} decimal places"
        )));
    }
    if recipe.price > max_price() {
        return Err(RecipeServiceError::Validation(format!(
            "price cannot exceed {}",
            max_price()
        )));
    }
    if let Some(link) = &recipe.link {
        if link.chars().count() > MAX_NAME_LENGTH {
            return Err(RecipeServiceError::Validation(format!(
                "link cannot exceed {MAX_NAME_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Sorted, de-duplicated copy of a list of referenced ids.
fn unique_ids(ids: &[i64]) -> Vec<i64> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

/// First requested id that is missing from the owned set, if any.
fn first_missing(requested: &[i64], found: impl Iterator<Item = i64>) -> Option<i64> {
    let found: BTreeSet<i64> = found.collect();
    requested.iter().copied().find(|id| !found.contains(id))
}

fn user_from_row(row: UserRow) -> User {
    User {
        id: row.id,
        email: row.email,
        name: row.name,
    }
}

fn ingredient_from_row(row: IngredientRow) -> Ingredient {
    Ingredient {
        id: row.id,
        name: row.name,
    }
}

fn tag_from_row(row: TagRow) -> Tag {
    Tag {
        id: row.id,
        name: row.name,
    }
}

fn group_links(links: Vec<RecipeLinkRow>) -> HashMap<i64, Vec<i64>> {
    let mut by_recipe: HashMap<i64, Vec<i64>> = HashMap::new();
    for link in links {
        by_recipe.entry(link.recipe_id).or_default().push(link.target_id);
    }
    by_recipe
}

fn recipe_from_row(row: RecipeRow, ingredients: Vec<i64>, tags: Vec<i64>) -> Recipe {
    Recipe {
        id: row.id,
        title: row.title,
        time_minutes: row.time_minutes,
        price: row.price,
        link: row.link,
        ingredients,
        tags,
    }
}

pub struct RecipeService<
    U = UserRepository,
    I = IngredientRepository,
    T = TagRepository,
    R = RecipeRepository,
> where
    U: UserRepositoryTrait,
    I: IngredientRepositoryTrait,
    T: TagRepositoryTrait,
    R: RecipeRepositoryTrait,
{
    pub user_repo: Arc<U>,
    pub ingredient_repo: Arc<I>,
    pub tag_repo: Arc<T>,
    pub recipe_repo: Arc<R>,
}

impl RecipeService<UserRepository, IngredientRepository, TagRepository, RecipeRepository> {
    pub fn new(
        user_repo: UserRepository,
        ingredient_repo: IngredientRepository,
        tag_repo: TagRepository,
        recipe_repo: RecipeRepository,
    ) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            ingredient_repo: Arc::new(ingredient_repo),
            tag_repo: Arc::new(tag_repo),
            recipe_repo: Arc::new(recipe_repo),
        }
    }
}

impl<U, I, T, R> RecipeService<U, I, T, R>
where
    U: UserRepositoryTrait,
    I: IngredientRepositoryTrait,
    T: TagRepositoryTrait,
    R: RecipeRepositoryTrait,
{
    pub fn with_repos(
        user_repo: Arc<U>,
        ingredient_repo: Arc<I>,
        tag_repo: Arc<T>,
        recipe_repo: Arc<R>,
    ) -> Self {
        Self {
            user_repo,
            ingredient_repo,
            tag_repo,
            recipe_repo,
        }
    }

    /// Create a user and issue the API token it will authenticate with.
    pub async fn create_user(&self, email: &str, name: &str) -> Result<IssuedUser, RecipeServiceError> {
        let email = email.trim();
        validate_name("email", email)?;
        if !email.contains('@') {
            return Err(RecipeServiceError::Validation(
                "email must contain '@'".to_string(),
            ));
        }
        validate_name("name", name)?;

        let token = Uuid::new_v4().simple().to_string();
        let row = self
            .user_repo
            .create_user(&email.to_lowercase(), name.trim(), &token)
            .await
            .map_err(RecipeServiceError::from)?;
        tracing::info!(user_id = row.id, "user created");
        Ok(IssuedUser {
            user: user_from_row(row),
            token,
        })
    }

    /// Resolve an API token to its user. Unknown tokens yield `None`.
    pub async fn authenticate(&self, token: &str) -> Result<Option<User>, RecipeServiceError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        let row = self
            .user_repo
            .get_user_by_token(token)
            .await
            .map_err(RecipeServiceError::from)?;
        Ok(row.map(user_from_row))
    }

    pub async fn list_ingredients(
        &self,
        user_id: i64,
        filter: AttributeFilter,
    ) -> Result<Vec<Ingredient>, RecipeServiceError> {
        let rows = self
            .ingredient_repo
            .get_ingredients(user_id, filter)
            .await
            .map_err(RecipeServiceError::from)?;
        Ok(rows.into_iter().map(ingredient_from_row).collect())
    }

    pub async fn create_ingredient(&self, user_id: i64, name: &str) -> Result<Ingredient, RecipeServiceError> {
        validate_name("name", name)?;
        let row = self
            .ingredient_repo
            .create_ingredient(user_id, name.trim())
            .await
            .map_err(RecipeServiceError::from)?;
        Ok(ingredient_from_row(row))
    }

    pub async fn list_tags(&self, user_id: i64, filter: AttributeFilter) -> Result<Vec<Tag>, RecipeServiceError> {
        let rows = self
            .tag_repo
            .get_tags(user_id, filter)
            .await
            .map_err(RecipeServiceError::from)?;
        Ok(rows.into_iter().map(tag_from_row).collect())
    }

    pub async fn create_tag(&self, user_id: i64, name: &str) -> Result<Tag, RecipeServiceError> {
        validate_name("name", name)?;
        let row = self
            .tag_repo
            .create_tag(user_id, name.trim())
            .await
            .map_err(RecipeServiceError::from)?;
        Ok(tag_from_row(row))
    }

    pub async fn list_recipes(&self, user_id: i64) -> Result<Vec<Recipe>, RecipeServiceError> {
        let rows = self
            .recipe_repo
            .get_recipes(user_id)
            .await
            .map_err(RecipeServiceError::from)?;
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let recipe_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut ingredients = group_links(
            self.recipe_repo
                .get_ingredient_links(&recipe_ids)
                .await
                .map_err(RecipeServiceError::from)?,
        );
        let mut tags = group_links(
            self.recipe_repo
                .get_tag_links(&recipe_ids)
                .await
                .map_err(RecipeServiceError::from)?,
        );

        Ok(rows
            .into_iter()
            .map(|row| {
                let ingredient_ids = ingredients.remove(&row.id).unwrap_or_default();
                let tag_ids = tags.remove(&row.id).unwrap_or_default();
                recipe_from_row(row, ingredient_ids, tag_ids)
            })
            .collect())
    }

    pub async fn get_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Option<RecipeDetail>, RecipeServiceError> {
        let Some(row) = self
            .recipe_repo
            .get_recipe(user_id, recipe_id)
            .await
            .map_err(RecipeServiceError::from)?
        else {
            return Ok(None);
        };

        let ingredients = self
            .ingredient_repo
            .get_ingredients_for_recipe(row.id)
            .await
            .map_err(RecipeServiceError::from)?
            .into_iter()
            .map(ingredient_from_row)
            .collect();
        let tags = self
            .tag_repo
            .get_tags_for_recipe(row.id)
            .await
            .map_err(RecipeServiceError::from)?
            .into_iter()
            .map(tag_from_row)
            .collect();

        Ok(Some(RecipeDetail {
            id: row.id,
            title: row.title,
            time_minutes: row.time_minutes,
            price: row.price,
            link: row.link,
            ingredients,
            tags,
        }))
    }

    /// Create a recipe for `user_id`. Every referenced ingredient and tag must
    /// belong to the same user.
    pub async fn create_recipe(&self, user_id: i64, recipe: NewRecipe) -> Result<Recipe, RecipeServiceError> {
        validate_recipe(&recipe)?;

        let recipe = NewRecipe {
            title: recipe.title.trim().to_string(),
            link: recipe.link.map(|l| l.trim().to_string()),
            ingredients: unique_ids(&recipe.ingredients),
            tags: unique_ids(&recipe.tags),
            ..recipe
        };

        let owned_ingredients = self
            .ingredient_repo
            .get_ingredients_by_ids(user_id, &recipe.ingredients)
            .await
            .map_err(RecipeServiceError::from)?;
        if let Some(missing) = first_missing(&recipe.ingredients, owned_ingredients.iter().map(|r| r.id)) {
            return Err(RecipeServiceError::InvalidReference(format!(
                "ingredient {missing} does not exist"
            )));
        }

        let owned_tags = self
            .tag_repo
            .get_tags_by_ids(user_id, &recipe.tags)
            .await
            .map_err(RecipeServiceError::from)?;
        if let Some(missing) = first_missing(&recipe.tags, owned_tags.iter().map(|r| r.id)) {
            return Err(RecipeServiceError::InvalidReference(format!(
                "tag {missing} does not exist"
            )));
        }

        let row = self
            .recipe_repo
            .create_recipe(user_id, &recipe)
            .await
            .map_err(RecipeServiceError::from)?;
        tracing::debug!(user_id, recipe_id = row.id, "recipe created");
        Ok(recipe_from_row(row, recipe.ingredients, recipe.tags))
    }
}
