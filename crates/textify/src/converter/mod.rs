//! HTML element tree to text conversion.

pub mod box_model;
pub mod buffer;
pub mod cache;
pub mod main;
pub mod renderer;
pub mod table;
pub mod tag;

pub use main::Textify;
