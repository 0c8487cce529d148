use crate::core::formatters::format_value;
use crate::core::mapping::FieldMapping;
use crate::domain::model::OutputMapping;
use crate::domain::ports::AttributeReadable;
use crate::domain::value::Value;
use crate::utils::error::{Result, SerializeError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Bulk record-to-mapping converter.
///
/// Holds only the field mapping and partitioning knobs, so one instance can
/// serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct FastSerializer {
    mapping: FieldMapping,
    parallel_threshold: usize,
    chunk_size: usize,
}

impl FastSerializer {
    pub fn new(mapping: FieldMapping) -> Self {
        Self {
            mapping,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Smallest batch that `serialize_parallel` splits across threads.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Converts a whole batch, in input order.
    ///
    /// The first missing attribute or unsupported value aborts the call and
    /// nothing converted so far is returned.
    pub fn serialize<'r, I, R>(&self, records: I) -> Result<Vec<OutputMapping>>
    where
        I: IntoIterator<Item = &'r R>,
        R: AttributeReadable + ?Sized + 'r,
    {
        let records = records.into_iter();
        let mut results = Vec::with_capacity(records.size_hint().0);

        for (index, record) in records.enumerate() {
            results.push(self.convert(record, index)?);
        }

        tracing::debug!(
            "Serialized {} records with {} fields",
            results.len(),
            self.mapping.len()
        );
        Ok(results)
    }

    pub fn serialize_one<R: AttributeReadable + ?Sized>(&self, record: &R) -> Result<OutputMapping> {
        self.convert(record, 0)
    }

    /// Like [`serialize`](Self::serialize), but batches of at least
    /// `parallel_threshold` records are split into chunks converted on the
    /// rayon pool. Output order is input order, and a failure is the one
    /// sequential conversion would have hit first.
    #[cfg(feature = "parallel")]
    pub fn serialize_parallel<R>(&self, records: &[R]) -> Result<Vec<OutputMapping>>
    where
        R: AttributeReadable + Sync,
    {
        if records.len() < self.parallel_threshold {
            return self.serialize(records);
        }

        let chunk_size = self.chunk_size;
        tracing::debug!(
            "Splitting {} records into chunks of {} for parallel conversion",
            records.len(),
            chunk_size
        );

        let chunks: Vec<Result<Vec<OutputMapping>>> = records
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                let base = chunk_index * chunk_size;
                chunk
                    .iter()
                    .enumerate()
                    .map(|(offset, record)| self.convert(record, base + offset))
                    .collect()
            })
            .collect();

        let mut results = Vec::with_capacity(records.len());
        for chunk in chunks {
            results.extend(chunk?);
        }

        tracing::debug!(
            "Serialized {} records with {} fields in parallel",
            results.len(),
            self.mapping.len()
        );
        Ok(results)
    }

    // 無 rayon 時退回逐筆轉換
    #[cfg(not(feature = "parallel"))]
    pub fn serialize_parallel<R>(&self, records: &[R]) -> Result<Vec<OutputMapping>>
    where
        R: AttributeReadable + Sync,
    {
        self.serialize(records)
    }

    fn convert<R: AttributeReadable + ?Sized>(
        &self,
        record: &R,
        record_index: usize,
    ) -> Result<OutputMapping> {
        let mut output = OutputMapping::with_capacity(self.mapping.len());

        for entry in &self.mapping {
            let attribute = record.get(&entry.source_attribute).ok_or_else(|| {
                SerializeError::MissingAttribute {
                    output_key: entry.output_key.clone(),
                    source_attribute: entry.source_attribute.clone(),
                    record_index,
                }
            })?;

            let value = attribute.classify();
            let type_name = match value {
                Value::Float(f) if !f.is_finite() => "non-finite float",
                _ => attribute.type_name(),
            };
            let formatted = format_value(value).ok_or_else(|| SerializeError::UnsupportedType {
                output_key: entry.output_key.clone(),
                source_attribute: entry.source_attribute.clone(),
                type_name: type_name.to_string(),
                record_index,
            })?;

            output.insert(entry.output_key.clone(), formatted);
        }

        Ok(output)
    }
}
