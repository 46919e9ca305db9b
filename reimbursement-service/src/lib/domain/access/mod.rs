pub mod errors;
pub mod policy;
pub mod ports;
pub mod service;
