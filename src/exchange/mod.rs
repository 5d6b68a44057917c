pub mod factory;
pub mod http;
pub mod paper;
pub mod traits;
pub mod types;
