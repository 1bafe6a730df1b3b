//! Proxy endpoint for the weather dashboard.
//!
//! Serves the dashboard's static files and relays `/weather?city=` lookups to the provider,
//! keeping the provider credential on the server.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
