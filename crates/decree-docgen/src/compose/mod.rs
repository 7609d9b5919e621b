//! Composed documents: built from scratch rather than filled into a
//! template.

pub mod layout;
pub mod settlement;

pub use layout::{DocumentBuilder, PageLayout, wrap};
pub use settlement::compose_settlement;
