pub mod aggregator;
pub mod classifier;
pub mod service;
