use crate::core::engine::{FastSerializer, DEFAULT_CHUNK_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use crate::core::mapping::FieldMapping;
use crate::domain::ports::FieldDeclarations;
use crate::utils::error::{Result, SerializeError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializerConfig {
    pub serializer: SerializerSection,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializerSection {
    pub name: String,
    pub parallel_threshold: Option<usize>,
    pub chunk_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub output: String,
    /// Defaults to `output`.
    pub source: Option<String>,
}

impl FieldConfig {
    pub fn source_attribute(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.output)
    }
}

impl SerializerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!("Loading serializer config from: {}", path.as_ref().display());
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SerializeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value. Unset variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SerializeError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("serializer.name", &self.serializer.name)?;

        if self.fields.is_empty() {
            return Err(SerializeError::ConfigValidationError {
                field: "fields".to_string(),
                message: "At least one field must be declared".to_string(),
            });
        }

        for field in &self.fields {
            validation::validate_non_empty_string("fields.output", &field.output)?;
            validation::validate_non_empty_string("fields.source", field.source_attribute())?;
        }
        validation::validate_unique_keys(self.fields.iter().map(|f| f.output.as_str()))?;

        if let Some(threshold) = self.serializer.parallel_threshold {
            validation::validate_positive_number("serializer.parallel_threshold", threshold, 1)?;
        }
        if let Some(chunk_size) = self.serializer.chunk_size {
            validation::validate_positive_number("serializer.chunk_size", chunk_size, 1)?;
        }

        Ok(())
    }

    pub fn parallel_threshold(&self) -> usize {
        self.serializer
            .parallel_threshold
            .unwrap_or(DEFAULT_PARALLEL_THRESHOLD)
    }

    pub fn chunk_size(&self) -> usize {
        self.serializer.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    /// Validates the configuration and builds a ready serializer from it.
    pub fn build(&self) -> Result<FastSerializer> {
        self.validate()?;
        let mapping = FieldMapping::from_declarations(self)?;

        tracing::info!(
            "Built serializer '{}' with {} fields",
            self.serializer.name,
            mapping.len()
        );

        Ok(FastSerializer::new(mapping)
            .with_parallel_threshold(self.parallel_threshold())
            .with_chunk_size(self.chunk_size()))
    }
}

impl FieldDeclarations for SerializerConfig {
    fn field_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.output.clone(), f.source_attribute().to_string()))
            .collect()
    }
}

impl Validate for SerializerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
