//! CSV output backend.
//!
//! Creates `plans.csv` in the output directory, one row per agent.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use hg_core::SimTime;
use hg_synth::Plan;

use crate::writer::PopulationWriter;
use crate::{OutputError, OutputResult, PlanRow};

pub const HEADER: [&str; 13] = [
    "person_id",
    "agent_id",
    "departure_time",
    "departure_secs",
    "origin_type",
    "origin_x",
    "origin_y",
    "mode",
    "home_type",
    "home_x",
    "home_y",
    "home_zone",
    "home_link",
];

/// Writes the population to a CSV file.
pub struct CsvWriter {
    plans:    Writer<File>,
    rows:     usize,
    finished: bool,
}

impl CsvWriter {
    /// Create `plans.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut plans = Writer::from_path(dir.join("plans.csv"))?;
        plans.write_record(HEADER)?;
        Ok(Self { plans, rows: 0, finished: false })
    }
}

impl PopulationWriter for CsvWriter {
    fn write_plans(&mut self, plans: &[Plan]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        for plan in plans {
            let row = PlanRow::from(plan);
            self.plans.write_record(&[
                row.person_id.to_owned(),
                row.agent_id.to_string(),
                SimTime(row.departure_secs).to_string(),
                row.departure_secs.to_string(),
                row.origin_type.to_owned(),
                row.origin_x.to_string(),
                row.origin_y.to_string(),
                row.mode.to_owned(),
                row.home_type.to_owned(),
                row.home_x.to_string(),
                row.home_y.to_string(),
                row.home_zone.to_owned(),
                row.home_link.to_owned(),
            ])?;
        }
        self.rows += plans.len();
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.plans.flush()?;
        log::info!("wrote {} plans to plans.csv", self.rows);
        Ok(())
    }
}
