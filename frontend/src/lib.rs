//! Client-side core of the budgeting app: domain services over the REST API,
//! observable state facades, form models and design-system helpers.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod services;
pub mod signal;
pub mod state;

#[cfg(test)]
mod test_utils;

pub use app::AppContext;
pub use config::FrontendConfig;
pub use error::ApiError;
