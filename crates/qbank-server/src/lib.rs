//! qbank server — HTTP surface over the question analyzer.

pub mod dataset_loader;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
