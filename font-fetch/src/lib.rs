pub mod actions;
pub mod config;
pub mod error;
pub mod font_parser;
pub mod services;
