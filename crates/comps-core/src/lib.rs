pub mod app_config;
pub mod business;
pub mod categories;
pub mod config;
pub mod error;
pub mod geo;

pub use app_config::{AppConfig, Environment};
pub use business::BusinessCandidate;
pub use categories::{load_categories, CategoriesFile, CategoryConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use geo::Coordinate;
