use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerializeError {
    #[error(
        "Field '{output_key}' (source: '{source_attribute}') is missing on record #{record_index}"
    )]
    MissingAttribute {
        output_key: String,
        source_attribute: String,
        record_index: usize,
    },

    #[error(
        "Field '{output_key}' (source: '{source_attribute}') returned unsupported type: {type_name} on record #{record_index}. Supported: primitives, datetime, date, time, uuid, decimal."
    )]
    UnsupportedType {
        output_key: String,
        source_attribute: String,
        type_name: String,
        record_index: usize,
    },

    #[error("Duplicate output key in field mapping: '{output_key}'")]
    DuplicateOutputKey { output_key: String },

    #[error("Invalid decimal literal: '{literal}'")]
    InvalidDecimal { literal: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The field mapping does not fit the records it was applied to.
    RecordShape,
    /// The field mapping itself is malformed.
    Mapping,
    Configuration,
    Io,
}

impl SerializeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SerializeError::MissingAttribute { .. } | SerializeError::UnsupportedType { .. } => {
                ErrorCategory::RecordShape
            }
            SerializeError::DuplicateOutputKey { .. } | SerializeError::InvalidDecimal { .. } => {
                ErrorCategory::Mapping
            }
            SerializeError::InvalidConfigValueError { .. }
            | SerializeError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            SerializeError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SerializeError::MissingAttribute { .. } => {
                "Check that the field mapping was built for this record type"
            }
            SerializeError::UnsupportedType { .. } => {
                "Convert the attribute to a primitive, temporal, uuid or decimal value before serializing"
            }
            SerializeError::DuplicateOutputKey { .. } => "Give every output field a unique name",
            SerializeError::InvalidDecimal { .. } => {
                "Use digits with an optional sign, decimal point and exponent"
            }
            SerializeError::InvalidConfigValueError { .. }
            | SerializeError::ConfigValidationError { .. } => {
                "Fix the serializer configuration file and try again"
            }
            SerializeError::IoError(_) => "Check that the file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, SerializeError>;
