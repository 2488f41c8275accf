mod error;
mod handlers;
mod server;

pub use error::ApiError;
pub use handlers::{analyze_handler, health_handler};
pub use server::{AppState, SummaryServer, create_router};
