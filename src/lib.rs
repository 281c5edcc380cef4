pub mod configuration;
pub mod domain;
pub mod hashing;
pub mod routes;
pub mod service;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod utils;
pub mod validation;
