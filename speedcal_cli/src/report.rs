//! Sweep report rendering: text columns, JSON lines, or CSV.

use serde::Serialize;
use serde_json::json;
use speedcal_config::OutputFormat;
use speedcal_core::{SweepRow, SweepSummary};
use std::io::Write;

/// Marker printed under a row whose output period rose.
pub const VIOLATION_MARKER: &str = "****";

pub trait RowSink {
    fn row(&mut self, row: &SweepRow) -> eyre::Result<()>;
    fn finish(&mut self, summary: &SweepSummary) -> eyre::Result<()>;
}

/// One text line: recovered speed, input period, output period, delta.
pub fn format_text_row(row: &SweepRow) -> String {
    format!(
        "{:4.1} km/h;  {:.6}  ;  {:.6} ;{:.6}",
        row.recovered_speed, row.input_period, row.output_period, row.delta
    )
}

pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> RowSink for TextSink<W> {
    fn row(&mut self, row: &SweepRow) -> eyre::Result<()> {
        writeln!(self.out, "{}", format_text_row(row))?;
        if row.violation {
            writeln!(self.out, "{VIOLATION_MARKER}")?;
        }
        Ok(())
    }

    fn finish(&mut self, _summary: &SweepSummary) -> eyre::Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

pub struct JsonlSink<W: Write> {
    out: W,
}

impl<W: Write> RowSink for JsonlSink<W> {
    fn row(&mut self, row: &SweepRow) -> eyre::Result<()> {
        let obj = json!({
            "speed": row.speed,
            "recovered_speed": row.recovered_speed,
            "input_period": row.input_period,
            "output_period": row.output_period,
            "delta": row.delta,
            "violation": row.violation,
        });
        writeln!(self.out, "{obj}")?;
        Ok(())
    }

    fn finish(&mut self, summary: &SweepSummary) -> eyre::Result<()> {
        let obj = json!({
            "summary": {
                "rows": summary.rows,
                "violations": summary.violations,
                "first_violation_speed": summary.first_violation_speed,
                "monotonic": summary.is_monotonic(),
            }
        });
        writeln!(self.out, "{obj}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct CsvRow {
    speed: f64,
    recovered_speed: f64,
    input_period: f64,
    output_period: f64,
    delta: f64,
    violation: bool,
}

impl From<&SweepRow> for CsvRow {
    fn from(r: &SweepRow) -> Self {
        Self {
            speed: r.speed,
            recovered_speed: r.recovered_speed,
            input_period: r.input_period,
            output_period: r.output_period,
            delta: r.delta,
            violation: r.violation,
        }
    }
}

pub struct CsvSink<W: Write> {
    wtr: csv::Writer<W>,
}

impl<W: Write> RowSink for CsvSink<W> {
    fn row(&mut self, row: &SweepRow) -> eyre::Result<()> {
        self.wtr.serialize(CsvRow::from(row))?;
        Ok(())
    }

    fn finish(&mut self, _summary: &SweepSummary) -> eyre::Result<()> {
        self.wtr.flush()?;
        Ok(())
    }
}

pub fn sink_for<'a, W: Write + 'a>(format: OutputFormat, out: W) -> Box<dyn RowSink + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextSink { out }),
        OutputFormat::Jsonl => Box::new(JsonlSink { out }),
        OutputFormat::Csv => Box::new(CsvSink {
            wtr: csv::Writer::from_writer(out),
        }),
    }
}
