// c8ci-api: Async Rust client for the Camunda SaaS console API

pub mod auth;
pub mod console;
pub mod error;
pub mod transport;

pub use auth::TokenIssuer;
pub use console::ConsoleClient;
pub use console::types as console_types;
pub use error::Error;
pub use transport::TransportConfig;
