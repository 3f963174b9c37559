pub mod app;
pub mod auth;
pub mod colors;
pub mod config;
pub mod enrich;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod proof;
pub mod slug;
pub mod state;
pub mod stats;
pub mod storage;
pub mod strava;
pub mod table;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use errors::PortfolioError;
pub use state::AppState;
pub use storage::load_portfolio;
