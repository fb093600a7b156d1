pub mod advisor;
pub mod app;
pub mod auth;
pub mod config;
pub mod dates;
pub mod diets;
pub mod error;
pub mod foods;
pub mod members;
pub mod nutrition;
pub mod state;
