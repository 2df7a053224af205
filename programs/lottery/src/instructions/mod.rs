pub mod admin;
pub mod enter;
pub mod fulfill;
pub mod upkeep;
pub mod views;
