// src/gui/mod.rs
pub mod app;
pub mod components;
pub mod loader;
pub mod pages;
pub mod router;

pub use app::run;
