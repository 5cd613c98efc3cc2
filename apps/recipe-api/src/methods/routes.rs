// API v1 routes (nested under /v1)
pub const INGREDIENTS_PATH: &str = "/recipe/ingredients";
pub const TAGS_PATH: &str = "/recipe/tags";
pub const RECIPES_PATH: &str = "/recipe/recipes";
pub const RECIPES_BY_ID_PATH: &str = "/recipe/recipes/{id}";

// Root-level service routes (not versioned)
pub const SERVICE_HEALTH_PATH: &str = "/health";
pub const SERVICE_DOCS_PATH: &str = "/docs";
pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";

// API version prefix
pub const API_V1_PREFIX: &str = "/v1";
