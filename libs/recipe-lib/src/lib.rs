pub mod entities;
pub mod repository;
pub mod util;
pub mod recipe_service;
pub mod errors_service;

pub use entities::*;
pub use recipe_service::*;
pub use errors_service::*;
