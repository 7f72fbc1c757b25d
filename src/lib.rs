pub mod models;
pub mod services;
pub mod cli;
pub mod utils;
