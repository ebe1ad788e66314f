pub mod errors;
pub mod models;
pub mod ordering;
pub mod ports;
pub mod service;
