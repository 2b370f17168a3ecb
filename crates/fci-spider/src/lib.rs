//! Extracts the FCI dog breeds nomenclature: groups, sections and breeds
//! with their standards, varieties and CACIB eligibility.

mod breed;
pub mod cacib;
mod config;
mod error;
pub mod fields;
mod html;
pub mod labels;
pub mod model;
mod spider;
pub mod taxonomy;

pub use breed::extract_breed;
pub use config::SpiderConfig;
pub use error::{Result, SpiderError};
pub use model::*;
pub use spider::FciSpider;

pub use fci_crawler;
