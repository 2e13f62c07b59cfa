//! Gateway: the dashboard's HTTP API.
//!
//! Lifecycle:
//! 1. Build the Slack client from config
//! 2. Wire the check-in aggregator and member lister into [`state::AppState`]
//! 3. Serve the `/api/*` routes behind a single-origin CORS policy
//! 4. Drain and exit cleanly on SIGINT/SIGTERM

pub mod error;
pub mod routes;
pub mod server;
pub mod state;
