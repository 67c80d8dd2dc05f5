pub mod check;
pub mod config;
pub mod deploy;
pub mod generate;
pub mod status;
