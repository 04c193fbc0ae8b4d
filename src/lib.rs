pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod keyphrase;
pub mod keywords;
pub mod related;
pub mod seo;
pub mod ui;
