pub mod assistant;
pub mod auth;
pub mod dish;
pub mod family;
pub mod ingredient;
pub mod inventory;
pub mod location;
pub mod marketplace;
pub mod plan;
pub mod profile;
pub mod shopping;
