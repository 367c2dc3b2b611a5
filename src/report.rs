//! Report emitter.
//!
//! Writes a finished [`RunOutput`] to disk. Nothing is written unless the
//! run completed, so a failed run never leaves an artifact behind.
//!
//! # Formats
//!
//! | Format | Files |
//! |--------|-------|
//! | CSV | `<stem>.csv` (queue blocks), `<stem>_base.csv` (base table, optional) |
//! | JSON | `<stem>.json` (report and optional base table) |
//!
//! The loaded input tables can also be echoed as CSV with [`write_inputs`].

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::OutputConfig;
use crate::error::{LeadQueueError, Result};
use crate::models::{BaseRow, Period, QueueEntry, QueueLabel, QueueReport, RunOutput};
use crate::session::Dataset;
use crate::table::RawTable;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Per-unit queue blocks as CSV.
    #[default]
    Csv,
    /// Full run output as JSON.
    Json,
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn entry_record(entry: &QueueEntry) -> [String; 4] {
    [
        entry.display_name.clone(),
        money(entry.weekly_new),
        money(entry.weekly_existing),
        money(entry.weekly_total),
    ]
}

fn finish<W: io::Write>(writer: csv::Writer<W>) -> Result<()> {
    writer
        .into_inner()
        .map_err(|e| LeadQueueError::Io(e.into_error()))?
        .flush()?;
    Ok(())
}

/// Writes the queue blocks, one per unit in report order.
///
/// Each block: a unit header row (`<CODE> Comercial, NOVO, EXISTENTE, TOTAL`),
/// `Fila 1` and its entries, a blank row, `Fila 2` and its entries, then
/// two blank rows.
pub fn write_queue_csv<W: io::Write>(report: &QueueReport, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    for unit in &report.units {
        wtr.write_record([unit.unit.display_label().as_str(), "NOVO", "EXISTENTE", "TOTAL"])?;

        wtr.write_record([QueueLabel::Fila1.as_str()])?;
        for entry in &unit.fila_1 {
            wtr.write_record(entry_record(entry))?;
        }
        wtr.write_record([""])?;

        wtr.write_record([QueueLabel::Fila2.as_str()])?;
        for entry in &unit.fila_2 {
            wtr.write_record(entry_record(entry))?;
        }
        wtr.write_record([""])?;
        wtr.write_record([""])?;
    }
    finish(wtr)
}

/// Writes the joined base table.
pub fn write_base_csv<W: io::Write>(rows: &[BaseRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = vec![
        "Consultor".to_string(),
        "Equipe".to_string(),
        "Justificativa".to_string(),
        "Férias?".to_string(),
        "Filial_Final".to_string(),
    ];
    for period in [Period::Weekly, Period::Monthly] {
        let suffix = period.suffix();
        header.push(format!("Venda Novo{suffix}"));
        header.push(format!("Venda Existente{suffix}"));
        header.push(format!("Total{suffix}"));
    }
    wtr.write_record(&header)?;

    for row in rows {
        wtr.write_record([
            row.consultant_id.clone(),
            row.team.clone(),
            row.justification.clone(),
            if row.on_leave { "Sim" } else { "Não" }.to_string(),
            row.unit.to_string(),
            money(row.weekly.new),
            money(row.weekly.existing),
            money(row.weekly.total),
            money(row.monthly.new),
            money(row.monthly.existing),
            money(row.monthly.total),
        ])?;
    }
    finish(wtr)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    report: &'a QueueReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_table: Option<&'a [BaseRow]>,
}

/// Writes the report (and optionally the base table) as pretty JSON.
pub fn write_json<W: io::Write>(
    output: &RunOutput,
    include_base_table: bool,
    writer: W,
) -> Result<()> {
    let doc = JsonReport {
        report: &output.report,
        base_table: include_base_table.then_some(output.base_table.as_slice()),
    };
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}

/// Writes one loaded input table as-is: its headers, then every row.
pub fn write_input_csv<W: io::Write>(table: &RawTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns.iter().map(|c| c.header.as_str()))?;
    for row in 0..table.row_count() {
        wtr.write_record(
            table
                .columns
                .iter()
                .map(|c| RawTable::cell(c, row).as_text()),
        )?;
    }
    finish(wtr)
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}

/// Files of one report, written under temporary names and renamed into
/// place only once every file is complete.
#[derive(Debug)]
struct Staging<'a> {
    directory: &'a Path,
    planned: Vec<PathBuf>,
}

impl<'a> Staging<'a> {
    fn new(directory: &'a Path) -> Self {
        Self {
            directory,
            planned: Vec::new(),
        }
    }

    fn create(&mut self, file_name: String) -> Result<io::BufWriter<fs::File>> {
        let path = self.directory.join(file_name);
        let file = fs::File::create(staging_path(&path))?;
        self.planned.push(path);
        Ok(io::BufWriter::new(file))
    }

    fn commit(self) -> Result<Vec<PathBuf>> {
        for (i, path) in self.planned.iter().enumerate() {
            if let Err(err) = fs::rename(staging_path(path), path) {
                self.discard(i);
                return Err(err.into());
            }
        }
        Ok(self.planned)
    }

    fn discard(&self, from: usize) {
        for path in &self.planned[from..] {
            if let Err(err) = fs::remove_file(staging_path(path)) {
                warn!(path = %path.display(), %err, "could not remove partial report file");
            }
        }
    }
}

fn write_staged(
    directory: &Path,
    stage: impl FnOnce(&mut Staging<'_>) -> Result<()>,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(directory)?;
    let mut staging = Staging::new(directory);
    if let Err(err) = stage(&mut staging) {
        staging.discard(0);
        return Err(err);
    }
    let written = staging.commit()?;
    for path in &written {
        info!(path = %path.display(), "report written");
    }
    Ok(written)
}

/// Writes the run output into `config.directory`.
///
/// Either every file of the report is written or none is. Returns the
/// paths written.
pub fn write_report(
    output: &RunOutput,
    config: &OutputConfig,
    format: ReportFormat,
) -> Result<Vec<PathBuf>> {
    let stem = &config.file_stem;
    write_staged(&config.directory, |staging| {
        match format {
            ReportFormat::Csv => {
                write_queue_csv(&output.report, staging.create(format!("{stem}.csv"))?)?;
                if config.include_base_table {
                    write_base_csv(
                        &output.base_table,
                        staging.create(format!("{stem}_base.csv"))?,
                    )?;
                }
            }
            ReportFormat::Json => {
                let mut file = staging.create(format!("{stem}.json"))?;
                write_json(output, config.include_base_table, &mut file)?;
                file.flush()?;
            }
        }
        Ok(())
    })
}

/// Echoes the loaded input tables into `config.directory` as
/// `<stem>_base_semanal.csv`, `<stem>_base_mensal.csv` and
/// `<stem>_base_consultores.csv`. Absent tables are skipped.
pub fn write_inputs(dataset: &Dataset, config: &OutputConfig) -> Result<Vec<PathBuf>> {
    let stem = &config.file_stem;
    let tables = [
        ("base_semanal", dataset.weekly.as_ref()),
        ("base_mensal", dataset.monthly.as_ref()),
        ("base_consultores", dataset.roster.as_ref()),
    ];
    write_staged(&config.directory, |staging| {
        for (suffix, table) in tables {
            if let Some(table) = table {
                write_input_csv(table, staging.create(format!("{stem}_{suffix}.csv"))?)?;
            }
        }
        Ok(())
    })
}
