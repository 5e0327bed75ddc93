pub mod record;
pub mod generator;
pub mod sink;
pub mod tcp;
pub mod memory_sink;
pub mod driver;

pub mod env;
pub mod target;
pub mod config;
pub mod init;
