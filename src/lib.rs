#[macro_use]
extern crate tracing;

pub(crate) mod client;
pub mod config;
pub mod error;
pub mod hub;
pub mod models;
pub mod name;
pub mod repository;

pub type Result<T> = std::result::Result<T, error::Error>;
