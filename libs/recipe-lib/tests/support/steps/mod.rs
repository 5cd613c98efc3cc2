pub mod given;
pub mod then_ingredient;
pub mod when_ingredient;
