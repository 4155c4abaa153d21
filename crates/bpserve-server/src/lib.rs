//! bpserve Server
//!
//! Thin HTTP layer over a single pre-trained model:
//! - `GET /health` reports liveness and whether the model loaded
//! - `POST /predict` runs the model on a feature vector or batch
//! - `GET /model/info` describes the loaded model

pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use cli::Cli;
pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
