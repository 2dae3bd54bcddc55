//! StatusLens server: HTTP boundary over the analysis and template engines.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
