pub mod config;
pub mod logging;

pub mod audit;
pub mod fetch;
pub mod manifest;
pub mod mime;
pub mod server;
pub mod shim;
