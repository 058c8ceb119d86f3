pub mod chrome;
pub mod components;
pub mod config;
pub mod error;
pub mod inquiry;
pub mod loader;
pub mod models;
pub mod normalizer;
pub mod page;
pub mod parsers;
pub mod storage;
pub mod utils;
pub mod view;
