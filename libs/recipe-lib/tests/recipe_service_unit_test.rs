use std::sync::Arc;
use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use rust_decimal::Decimal;

use recipe_lib::entities::{AttributeFilter, NewRecipe};
use recipe_lib::errors_service::RecipeServiceError;
use recipe_lib::recipe_service::RecipeService;
use recipe_lib::repository::errors::RecipeRepositoryError;
use recipe_lib::repository::models::{IngredientRow, RecipeLinkRow, RecipeRow, TagRow, UserRow};
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepositoryTrait for UserRepo {
        async fn create_user(&self, email: &str, name: &str, token: &str) -> Result<UserRow, RecipeRepositoryError>;
        async fn get_user_by_token(&self, token: &str) -> Result<Option<UserRow>, RecipeRepositoryError>;
    }
}

mock! {
    pub IngredientRepo {}

    #[async_trait]
    impl IngredientRepositoryTrait for IngredientRepo {
        async fn create_ingredient(&self, user_id: i64, name: &str) -> Result<IngredientRow, RecipeRepositoryError>;
        async fn get_ingredients(&self, user_id: i64, filter: AttributeFilter) -> Result<Vec<IngredientRow>, RecipeRepositoryError>;
        async fn get_ingredients_by_ids(&self, user_id: i64, ids: &[i64]) -> Result<Vec<IngredientRow>, RecipeRepositoryError>;
        async fn get_ingredients_for_recipe(&self, recipe_id: i64) -> Result<Vec<IngredientRow>, RecipeRepositoryError>;
    }
}

mock! {
    pub TagRepo {}

    #[async_trait]
    impl TagRepositoryTrait for TagRepo {
        async fn create_tag(&self, user_id: i64, name: &str) -> Result<TagRow, RecipeRepositoryError>;
        async fn get_tags(&self, user_id: i64, filter: AttributeFilter) -> Result<Vec<TagRow>, RecipeRepositoryError>;
        async fn get_tags_by_ids(&self, user_id: i64, ids: &[i64]) -> Result<Vec<TagRow>, RecipeRepositoryError>;
        async fn get_tags_for_recipe(&self, recipe_id: i64) -> Result<Vec<TagRow>, RecipeRepositoryError>;
    }
}

mock! {
    pub RecipeRepo {}

    #[async_trait]
    impl RecipeRepositoryTrait for RecipeRepo {
        async fn create_recipe(&self, user_id: i64, recipe: &NewRecipe) -> Result<RecipeRow, RecipeRepositoryError>;
        async fn get_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Option<RecipeRow>, RecipeRepositoryError>;
        async fn get_recipes(&self, user_id: i64) -> Result<Vec<RecipeRow>, RecipeRepositoryError>;
        async fn get_ingredient_links(&self, recipe_ids: &[i64]) -> Result<Vec<RecipeLinkRow>, RecipeRepositoryError>;
        async fn get_tag_links(&self, recipe_ids: &[i64]) -> Result<Vec<RecipeLinkRow>, RecipeRepositoryError>;
    }
}

type TestService = RecipeService<MockUserRepo, MockIngredientRepo, MockTagRepo, MockRecipeRepo>;

fn create_test_service(
    user_repo: MockUserRepo,
    ingredient_repo: MockIngredientRepo,
    tag_repo: MockTagRepo,
    recipe_repo: MockRecipeRepo,
) -> TestService {
    RecipeService::with_repos(
        Arc::new(user_repo),
        Arc::new(ingredient_repo),
        Arc::new(tag_repo),
        Arc::new(recipe_repo),
    )
}

fn ingredient_row(id: i64, name: &str) -> IngredientRow {
    IngredientRow {
        id,
        name: name.to_string(),
    }
}

fn recipe_row(id: i64, title: &str) -> RecipeRow {
    RecipeRow {
        id,
        title: title.to_string(),
        time_minutes: 10,
        price: Decimal::new(1000, 2),
        link: String::new(),
    }
}

// ==================== AUTHENTICATION ====================

#[tokio::test]
async fn test_authenticate_known_token() {
    let mut user_repo = MockUserRepo::new();
    user_repo
        .expect_get_user_by_token()
        .withf(|token| token == "abc123")
        .times(1)
        .returning(|_| {
            Ok(Some(UserRow {
                id: 7,
                email: "test@test.de".to_string(),
                name: "Test".to_string(),
            }))
        });

    let service = create_test_service(
        user_repo,
        MockIngredientRepo::new(),
        MockTagRepo::new(),
        MockRecipeRepo::new(),
    );

    let user = service.authenticate("abc123").await.unwrap().unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.email, "test@test.de");
}

#[tokio::test]
async fn test_authenticate_blank_token_skips_lookup() {
    let mut user_repo = MockUserRepo::new();
    user_repo.expect_get_user_by_token().times(0);

    let service = create_test_service(
        user_repo,
        MockIngredientRepo::new(),
        MockTagRepo::new(),
        MockRecipeRepo::new(),
    );

    assert!(service.authenticate("  ").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_user_issues_token() {
    let mut user_repo = MockUserRepo::new();
    user_repo
        .expect_create_user()
        .withf(|email, name, token| email == "test@test.de" && name == "Test" && token.len() == 32)
        .times(1)
        .returning(|email, name, _| {
            Ok(UserRow {
                id: 1,
                email: email.to_string(),
                name: name.to_string(),
            })
        });

    let service = create_test_service(
        user_repo,
        MockIngredientRepo::new(),
        MockTagRepo::new(),
        MockRecipeRepo::new(),
    );

    let issued = service.create_user(" Test@Test.de ", "Test").await.unwrap();
    assert_eq!(issued.user.email, "test@test.de");
    assert_eq!(issued.token.len(), 32);
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let mut user_repo = MockUserRepo::new();
    user_repo
        .expect_create_user()
        .returning(|_, _, _| Err(RecipeRepositoryError::EmailAlreadyExists));

    let service = create_test_service(
        user_repo,
        MockIngredientRepo::new(),
        MockTagRepo::new(),
        MockRecipeRepo::new(),
    );

    let result = service.create_user("test@test.de", "Test").await;
    assert!(matches!(result, Err(RecipeServiceError::EmailAlreadyExists)));
}

// ==================== INGREDIENTS ====================

#[tokio::test]
async fn test_list_ingredients_passes_owner_and_filter() {
    let mut ingredient_repo = MockIngredientRepo::new();
    ingredient_repo
        .expect_get_ingredients()
        .with(eq(7), eq(AttributeFilter::assigned_only()))
        .times(1)
        .returning(|_, _| Ok(vec![ingredient_row(2, "Salt"), ingredient_row(1, "Meat")]));

    let service = create_test_service(
        MockUserRepo::new(),
        ingredient_repo,
        MockTagRepo::new(),
        MockRecipeRepo::new(),
    );

    let ingredients = service
        .list_ingredients(7, AttributeFilter::assigned_only())
        .await
        .unwrap();

    let names: Vec<&str> = ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Salt", "Meat"]);
}

#[tokio::test]
async fn test_create_ingredient_trims_name() {
    let mut ingredient_repo = MockIngredientRepo::new();
    ingredient_repo
        .expect_create_ingredient()
        .withf(|user_id, name| *user_id == 7 && name == "salt")
        .times(1)
        .returning(|_, name| Ok(ingredient_row(1, name)));

    let service = create_test_service(
        MockUserRepo::new(),
        ingredient_repo,
        MockTagRepo::new(),
        MockRecipeRepo::new(),
    );

    let ingredient = service.create_ingredient(7, "  salt ").await.unwrap();
    assert_eq!(ingredient.name, "salt");
}

#[tokio::test]
async fn test_create_ingredient_empty_name_is_not_persisted() {
    let mut ingredient_repo = MockIngredientRepo::new();
    ingredient_repo.expect_create_ingredient().times(0);

    let service = create_test_service(
        MockUserRepo::new(),
        ingredient_repo,
        MockTagRepo::new(),
        MockRecipeRepo::new(),
    );

    let result = service.create_ingredient(7, "").await;
    assert!(matches!(result, Err(RecipeServiceError::Validation(_))));
}

// ==================== TAGS ====================

#[tokio::test]
async fn test_create_tag_empty_name_is_not_persisted() {
    let mut tag_repo = MockTagRepo::new();
    tag_repo.expect_create_tag().times(0);

    let service = create_test_service(
        MockUserRepo::new(),
        MockIngredientRepo::new(),
        tag_repo,
        MockRecipeRepo::new(),
    );

    let result = service.create_tag(7, "   ").await;
    assert!(matches!(result, Err(RecipeServiceError::Validation(_))));
}

#[tokio::test]
async fn test_list_tags_maps_rows() {
    let mut tag_repo = MockTagRepo::new();
    tag_repo
        .expect_get_tags()
        .with(eq(7), eq(AttributeFilter::default()))
        .times(1)
        .returning(|_, _| {
            Ok(vec![TagRow {
                id: 3,
                name: "Vegan".to_string(),
            }])
        });

    let service = create_test_service(
        MockUserRepo::new(),
        MockIngredientRepo::new(),
        tag_repo,
        MockRecipeRepo::new(),
    );

    let tags = service.list_tags(7, AttributeFilter::default()).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "Vegan");
}

// ==================== RECIPES ====================

#[tokio::test]
async fn test_list_recipes_groups_links() {
    let mut recipe_repo = MockRecipeRepo::new();
    recipe_repo
        .expect_get_recipes()
        .with(eq(7))
        .times(1)
        .returning(|_| Ok(vec![recipe_row(2, "Second"), recipe_row(1, "First")]));
    recipe_repo
        .expect_get_ingredient_links()
        .withf(|ids| ids == [2, 1])
        .times(1)
        .returning(|_| {
            Ok(vec![
                RecipeLinkRow { recipe_id: 1, target_id: 10 },
                RecipeLinkRow { recipe_id: 1, target_id: 11 },
                RecipeLinkRow { recipe_id: 2, target_id: 10 },
            ])
        });
    recipe_repo
        .expect_get_tag_links()
        .times(1)
        .returning(|_| Ok(vec![RecipeLinkRow { recipe_id: 2, target_id: 5 }]));

    let service = create_test_service(
        MockUserRepo::new(),
        MockIngredientRepo::new(),
        MockTagRepo::new(),
        recipe_repo,
    );

    let recipes = service.list_recipes(7).await.unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].id, 2);
    assert_eq!(recipes[0].ingredients, vec![10]);
    assert_eq!(recipes[0].tags, vec![5]);
    assert_eq!(recipes[1].ingredients, vec![10, 11]);
    assert!(recipes[1].tags.is_empty());
}

#[tokio::test]
async fn test_list_recipes_empty_skips_link_queries() {
    let mut recipe_repo = MockRecipeRepo::new();
    recipe_repo.expect_get_recipes().returning(|_| Ok(vec![]));
    recipe_repo.expect_get_ingredient_links().times(0);
    recipe_repo.expect_get_tag_links().times(0);

    let service = create_test_service(
        MockUserRepo::new(),
        MockIngredientRepo::new(),
        MockTagRepo::new(),
        recipe_repo,
    );

    assert!(service.list_recipes(7).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_recipe_of_other_user_is_none() {
    let mut recipe_repo = MockRecipeRepo::new();
    recipe_repo
        .expect_get_recipe()
        .with(eq(7), eq(42))
        .times(1)
        .returning(|_, _| Ok(None));
    let mut ingredient_repo = MockIngredientRepo::new();
    ingredient_repo.expect_get_ingredients_for_recipe().times(0);

    let service = create_test_service(
        MockUserRepo::new(),
        ingredient_repo,
        MockTagRepo::new(),
        recipe_repo,
    );

    assert!(service.get_recipe(7, 42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_recipe_expands_relations() {
    let mut recipe_repo = MockRecipeRepo::new();
    recipe_repo
        .expect_get_recipe()
        .returning(|_, id| Ok(Some(recipe_row(id, "Curry"))));
    let mut ingredient_repo = MockIngredientRepo::new();
    ingredient_repo
        .expect_get_ingredients_for_recipe()
        .with(eq(3))
        .returning(|_| Ok(vec![ingredient_row(1, "Pepper")]));
    let mut tag_repo = MockTagRepo::new();
    tag_repo
        .expect_get_tags_for_recipe()
        .with(eq(3))
        .returning(|_| {
            Ok(vec![TagRow {
                id: 4,
                name: "Spicy".to_string(),
            }])
        });

    let service = create_test_service(MockUserRepo::new(), ingredient_repo, tag_repo, recipe_repo);

    let detail = service.get_recipe(7, 3).await.unwrap().unwrap();
    assert_eq!(detail.title, "Curry");
    assert_eq!(detail.ingredients[0].name, "Pepper");
    assert_eq!(detail.tags[0].name, "Spicy");
}

#[tokio::test]
async fn test_create_recipe_dedups_references() {
    let mut ingredient_repo = MockIngredientRepo::new();
    ingredient_repo
        .expect_get_ingredients_by_ids()
        .withf(|user_id, ids| *user_id == 7 && ids == [1, 2])
        .times(1)
        .returning(|_, _| Ok(vec![ingredient_row(1, "Pepper"), ingredient_row(2, "Chili")]));
    let mut tag_repo = MockTagRepo::new();
    tag_repo
        .expect_get_tags_by_ids()
        .returning(|_, _| Ok(vec![]));
    let mut recipe_repo = MockRecipeRepo::new();
    recipe_repo
        .expect_create_recipe()
        .withf(|user_id, recipe| *user_id == 7 && recipe.ingredients == [1, 2] && recipe.title == "My recipe")
        .times(1)
        .returning(|_, recipe| Ok(recipe_row(9, &recipe.title)));

    let service = create_test_service(MockUserRepo::new(), ingredient_repo, tag_repo, recipe_repo);

    let recipe = service
        .create_recipe(
            7,
            NewRecipe {
                title: " My recipe ".to_string(),
                time_minutes: 5,
                price: Decimal::new(200, 2),
                link: None,
                ingredients: vec![2, 1, 2],
                tags: vec![],
            },
        )
        .await
        .unwrap();

    assert_eq!(recipe.id, 9);
    assert_eq!(recipe.ingredients, vec![1, 2]);
}

#[tokio::test]
async fn test_create_recipe_rejects_foreign_ingredient() {
    let mut ingredient_repo = MockIngredientRepo::new();
    // Ingredient 2 belongs to someone else, so only 1 comes back.
    ingredient_repo
        .expect_get_ingredients_by_ids()
        .returning(|_, _| Ok(vec![ingredient_row(1, "Pepper")]));
    let mut recipe_repo = MockRecipeRepo::new();
    recipe_repo.expect_create_recipe().times(0);

    let service = create_test_service(MockUserRepo::new(), ingredient_repo, MockTagRepo::new(), recipe_repo);

    let result = service
        .create_recipe(
            7,
            NewRecipe {
                title: "Stolen".to_string(),
                time_minutes: 5,
                price: Decimal::new(200, 2),
                ingredients: vec![1, 2],
                ..NewRecipe::default()
            },
        )
        .await;

    match result {
        Err(RecipeServiceError::InvalidReference(msg)) => assert!(msg.contains("ingredient 2")),
        other => panic!("expected invalid reference, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_recipe_validation_happens_before_queries() {
    let mut ingredient_repo = MockIngredientRepo::new();
    ingredient_repo.expect_get_ingredients_by_ids().times(0);
    let mut recipe_repo = MockRecipeRepo::new();
    recipe_repo.expect_create_recipe().times(0);

    let service = create_test_service(MockUserRepo::new(), ingredient_repo, MockTagRepo::new(), recipe_repo);

    let result = service
        .create_recipe(
            7,
            NewRecipe {
                title: String::new(),
                ..NewRecipe::default()
            },
        )
        .await;

    assert!(matches!(result, Err(RecipeServiceError::Validation(_))));
}
