//! Botforge Library
//!
//! Core modules for provisioning Azure Bot Service bots from prebuilt
//! code templates and ARM deployment templates.

pub mod config;
pub mod deploy;
pub mod errors;
pub mod http;
pub mod logs;
pub mod models;
pub mod params;
pub mod registration;
pub mod templates;
pub mod utils;
