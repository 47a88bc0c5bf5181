pub mod cli;
pub mod config;
pub mod draw;
pub mod error;
pub mod input;
pub mod prelude;
pub mod runner;
