pub mod config;
pub mod content;
pub mod error;
pub mod extractor;

pub use config::Config;
pub use content::*;
pub use error::*;
pub use extractor::*;
