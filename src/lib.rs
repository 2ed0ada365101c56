pub mod api;
pub mod coding;
pub mod config;
pub mod interview;
pub mod llm;
pub mod pdf;
pub mod transcript;
