//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `transitions.csv`
//! - `frame_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FrameSummaryRow, OutputResult, TransitionRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    transitions: Writer<File>,
    summaries:   Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut transitions = Writer::from_path(dir.join("transitions.csv"))?;
        transitions.write_record(["frame", "time", "agent", "from", "to"])?;

        let mut summaries = Writer::from_path(dir.join("frame_summaries.csv"))?;
        summaries.write_record(["frame", "time", "live", "dead"])?;

        Ok(Self { transitions, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_transition(&mut self, row: &TransitionRow) -> OutputResult<()> {
        self.transitions.write_record(&[
            row.frame.to_string(),
            format!("{:.3}", row.time),
            row.agent.to_string(),
            row.from.to_string(),
            row.to.to_string(),
        ])?;
        Ok(())
    }

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.frame.to_string(),
            format!("{:.3}", row.time),
            row.live.to_string(),
            row.dead.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.transitions.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
