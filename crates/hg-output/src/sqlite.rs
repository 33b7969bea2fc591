//! SQLite output backend (feature `sqlite`).
//!
//! Creates `plans.db` in the output directory with a single `plans` table.

use std::path::Path;

use rusqlite::Connection;

use hg_synth::Plan;

use crate::writer::PopulationWriter;
use crate::{OutputError, OutputResult, PlanRow};

/// Writes the population to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `plans.db` in `dir` and start a fresh `plans` table.
    ///
    /// Rows from an earlier run into the same directory are discarded.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("plans.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS plans;
             CREATE TABLE plans (
                 person_id      TEXT    PRIMARY KEY,
                 agent_id       INTEGER NOT NULL,
                 departure_secs INTEGER NOT NULL,
                 origin_type    TEXT    NOT NULL,
                 origin_x       REAL    NOT NULL,
                 origin_y       REAL    NOT NULL,
                 mode           TEXT    NOT NULL,
                 home_type      TEXT    NOT NULL,
                 home_x         REAL    NOT NULL,
                 home_y         REAL    NOT NULL,
                 home_zone      TEXT    NOT NULL,
                 home_link      TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl PopulationWriter for SqliteWriter {
    fn write_plans(&mut self, plans: &[Plan]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        if plans.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO plans \
                 (person_id, agent_id, departure_secs, origin_type, origin_x, origin_y, \
                  mode, home_type, home_x, home_y, home_zone, home_link) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for plan in plans {
                let row = PlanRow::from(plan);
                stmt.execute(rusqlite::params![
                    row.person_id,
                    row.agent_id,
                    row.departure_secs,
                    row.origin_type,
                    row.origin_x,
                    row.origin_y,
                    row.mode,
                    row.home_type,
                    row.home_x,
                    row.home_y,
                    row.home_zone,
                    row.home_link,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
