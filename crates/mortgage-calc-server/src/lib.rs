//! HTTP front end for the amortization engine.
//!
//! ## Endpoints
//!
//! - `POST /api/calc`: amortization schedule for a loan request
//! - `GET  /api/health`: liveness probe
//!
//! ## Usage
//!
//! ```bash
//! # Listen on 0.0.0.0:3000
//! mortgage-calc-server
//!
//! # Port from the environment, settings from a file
//! PORT=8080 mortgage-calc-server --config server.toml
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use server::{create_router, run_server};
