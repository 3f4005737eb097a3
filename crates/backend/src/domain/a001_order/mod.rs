pub mod anomaly;
pub mod repository;
pub mod service;
