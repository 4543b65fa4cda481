//! HTTP clients for the Azure management plane

pub mod bots;
pub mod client;
pub mod deployments;
