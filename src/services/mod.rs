pub mod aggregator;
pub mod auth_service;
pub mod bookmark_service;
pub mod filter;
pub mod interview_service;
pub mod query_engine;
pub mod search_client;
