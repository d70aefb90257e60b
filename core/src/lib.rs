pub mod config;
pub mod dataset;
pub mod export;
pub mod guidelines;
pub mod review;

pub mod error;
