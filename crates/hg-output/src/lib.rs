//! `hg-output`: population writers.
//!
//! Four backends, the last two behind Cargo features:
//!
//! | Feature   | Backend      | File created      |
//! |-----------|--------------|-------------------|
//! | *(none)*  | CSV          | `plans.csv`       |
//! | *(none)*  | MATSim XML   | `plans.xml`       |
//! | `sqlite`  | SQLite       | `plans.db`        |
//! | `parquet` | Parquet      | `plans.parquet`   |
//!
//! All backends implement [`PopulationWriter`].  They are handed a complete
//! population; the synthesizer never produces a partial one.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hg_output::{CsvWriter, PopulationWriter};
//!
//! let plans = synth.synthesize(&mut NoopObserver)?;
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! writer.write_plans(&plans)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod matsim;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use matsim::MatsimPopulationWriter;
pub use row::PlanRow;
pub use writer::PopulationWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
