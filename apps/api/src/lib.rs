pub mod config;
pub mod db;
pub mod errors;
pub mod jobs;
pub mod llm_client;
pub mod models;
pub mod pdfs;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod texts;
