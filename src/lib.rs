pub mod config;
pub mod context;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use context::{build_context, Context};
pub use routes::create_router;
pub use state::AppState;
