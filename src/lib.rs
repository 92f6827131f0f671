// Library for tests to access modules

pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod flatten;
pub mod history;
pub mod models;
pub mod routes;
pub mod sampler;
pub mod stat_source;
