// Console API client modules
//
// Hand-written client for the SaaS console's cluster management endpoints:
// parameters catalog, cluster create/get/delete, and cluster API clients.

pub mod client;
pub mod types;

pub use client::ConsoleClient;
