pub mod apply;
pub mod check;
pub mod configure;
pub mod discover;
pub mod endpoints;
pub mod env;
pub mod health;
