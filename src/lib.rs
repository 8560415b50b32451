pub mod config;
pub mod error;
pub mod observer;
pub mod philosopher;
pub mod report;
pub mod table;
pub mod topology;
