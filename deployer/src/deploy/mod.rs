//! Deployment orchestration

pub mod arm;
pub mod create;
pub mod update;
