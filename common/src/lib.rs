// Common library shared by the scheduler binary and tests

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod publish;
pub mod retry;
pub mod timezone;
