pub mod cmd;
pub mod config;

pub use config::Config;
