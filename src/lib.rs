pub mod config;
pub mod encode;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod raster;
pub mod session;
