//! Report module - figures, run summary and JSON export

pub mod export;
pub mod figures;
pub mod summary;

pub use export::*;
pub use figures::*;
pub use summary::*;
