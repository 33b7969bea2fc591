//! Parquet output backend (feature `parquet`).
//!
//! Creates `plans.parquet` in the output directory.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use hg_synth::Plan;

use crate::writer::PopulationWriter;
use crate::{OutputError, OutputResult, PlanRow};

fn plan_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("person_id",      DataType::Utf8,    false),
        Field::new("agent_id",       DataType::UInt32,  false),
        Field::new("departure_secs", DataType::UInt32,  false),
        Field::new("origin_type",    DataType::Utf8,    false),
        Field::new("origin_x",       DataType::Float64, false),
        Field::new("origin_y",       DataType::Float64, false),
        Field::new("mode",           DataType::Utf8,    false),
        Field::new("home_type",      DataType::Utf8,    false),
        Field::new("home_x",         DataType::Float64, false),
        Field::new("home_y",         DataType::Float64, false),
        Field::new("home_zone",      DataType::Utf8,    false),
        Field::new("home_link",      DataType::Utf8,    false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes the population to a Parquet file.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    writer: Option<ArrowWriter<File>>,
    schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create `plans.parquet` in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let schema = plan_schema();
        let file = File::create(dir.join("plans.parquet"))?;
        let writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;
        Ok(Self { writer: Some(writer), schema })
    }
}

impl PopulationWriter for ParquetWriter {
    fn write_plans(&mut self, plans: &[Plan]) -> OutputResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Err(OutputError::Finished);
        };
        if plans.is_empty() {
            return Ok(());
        }

        let mut person_ids  = StringBuilder::new();
        let mut agent_ids   = UInt32Builder::new();
        let mut departures  = UInt32Builder::new();
        let mut origin_type = StringBuilder::new();
        let mut origin_x    = Float64Builder::new();
        let mut origin_y    = Float64Builder::new();
        let mut modes       = StringBuilder::new();
        let mut home_type   = StringBuilder::new();
        let mut home_x      = Float64Builder::new();
        let mut home_y      = Float64Builder::new();
        let mut home_zone   = StringBuilder::new();
        let mut home_link   = StringBuilder::new();

        for plan in plans {
            let row = PlanRow::from(plan);
            person_ids.append_value(row.person_id);
            agent_ids.append_value(row.agent_id);
            departures.append_value(row.departure_secs);
            origin_type.append_value(row.origin_type);
            origin_x.append_value(row.origin_x);
            origin_y.append_value(row.origin_y);
            modes.append_value(row.mode);
            home_type.append_value(row.home_type);
            home_x.append_value(row.home_x);
            home_y.append_value(row.home_y);
            home_zone.append_value(row.home_zone);
            home_link.append_value(row.home_link);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.schema),
            vec![
                Arc::new(person_ids.finish()),
                Arc::new(agent_ids.finish()),
                Arc::new(departures.finish()),
                Arc::new(origin_type.finish()),
                Arc::new(origin_x.finish()),
                Arc::new(origin_y.finish()),
                Arc::new(modes.finish()),
                Arc::new(home_type.finish()),
                Arc::new(home_x.finish()),
                Arc::new(home_y.finish()),
                Arc::new(home_zone.finish()),
                Arc::new(home_link.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.writer.take() {
            w.close()?;
        }
        Ok(())
    }
}
