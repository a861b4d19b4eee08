pub mod api;
pub mod auth;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod i18n;
pub mod pricing;
pub mod server;
pub mod storage;
