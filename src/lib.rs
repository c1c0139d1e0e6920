// Library for tests to access modules

pub mod calculator;
pub mod collector;
pub mod config;
pub mod docker_repo;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod store;
pub mod version;
pub mod worker;
