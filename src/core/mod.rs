pub mod engine;
pub mod formatters;
pub mod mapping;

pub use crate::domain::model::{FieldEntry, OutputMapping};
pub use crate::domain::ports::{Attribute, AttributeReadable, FieldDeclarations};
pub use crate::utils::error::Result;
