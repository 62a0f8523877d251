pub mod calendar;
pub mod config;
pub mod evolution;
pub mod export;
