pub mod analysis;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod routes;
pub mod scraping;
pub mod state;
