// src/core/mod.rs

pub mod csv;
pub mod extract;
pub mod html;
pub mod net;
pub mod sanitize;

pub use extract::{Extraction, Extractor, ExtractorChain};
pub use net::{HttpClient, Request};
