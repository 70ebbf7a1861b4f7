pub mod generate_recipe;
pub mod generate_recipes;
