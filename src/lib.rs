//! Payments console: client-side route table plus the development server
//! that hosts the SPA and proxies its API calls.

pub mod api_doc;
pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod proxy;
pub mod router;
pub mod routes;
pub mod state;
