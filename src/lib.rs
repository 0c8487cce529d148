pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::record::DynamicRecord;
pub use config::SerializerConfig;
pub use crate::core::{engine::FastSerializer, mapping::FieldMapping};
pub use domain::decimal::Decimal;
pub use domain::model::{FieldEntry, OutputMapping};
pub use domain::ports::{Attribute, AttributeReadable, FieldDeclarations};
pub use domain::value::Value;
pub use utils::error::{Result, SerializeError};
