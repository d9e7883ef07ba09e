use crate::infra::VerdictTally;
use chrono::{Local, NaiveDate};
use clap::Args;
use geo_compliance::assessment::{
    shortlist_file_name, write_assessments, write_shortlist, AssessmentSnapshot,
    ComplianceAssessor,
};
use geo_compliance::config::AppConfig;
use geo_compliance::diligence::DueDiligenceBook;
use geo_compliance::error::AppError;
use geo_compliance::filings::FilingImporter;
use geo_compliance::identity::{AdministrationNames, AdministrationRegistry};
use geo_compliance::positions::{PositionTable, SatelliteCatalog};
use geo_compliance::telemetry;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Space network list export (one row per filing)
    #[arg(long)]
    pub(crate) filings: PathBuf,
    /// Satellite catalog with NORAD ID and owner administration
    #[arg(long)]
    pub(crate) satellites: PathBuf,
    /// Longitudes, either `NORAD ID,Longitude` or `Date` plus one column per satellite
    #[arg(long)]
    pub(crate) positions: PathBuf,
    /// Owner code to ITU symbol table (defaults to the built-in mapping)
    #[arg(long)]
    pub(crate) administrations: Option<PathBuf>,
    /// ITU symbol to administration name table (defaults to the built-in names)
    #[arg(long)]
    pub(crate) administration_names: Option<PathBuf>,
    /// Directory holding `<NORAD ID>.csv` due-diligence tables
    #[arg(long)]
    pub(crate) due_diligence_dir: Option<PathBuf>,
    /// Evaluation date for single-date position tables (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Write assessments here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Write one nearby-filing shortlist per satellite and date into this directory
    #[arg(long)]
    pub(crate) shortlists_dir: Option<PathBuf>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let filings = FilingImporter::from_path(&args.filings)?;
    let catalog = SatelliteCatalog::from_path(&args.satellites)?;
    let positions = PositionTable::from_path(&args.positions, date)?;

    let registry = match &args.administrations {
        Some(path) => AdministrationRegistry::from_path(path)?,
        None => AdministrationRegistry::standard(),
    };
    let names = match &args.administration_names {
        Some(path) => AdministrationNames::from_path(path)?,
        None => AdministrationNames::standard(),
    };
    let evidence = match &args.due_diligence_dir {
        Some(dir) => DueDiligenceBook::from_dir(
            dir,
            positions.satellites().iter().map(String::as_str),
        ),
        None => DueDiligenceBook::new(),
    };

    let snapshot = AssessmentSnapshot::new(filings.table)
        .with_registry(registry)
        .with_names(names)
        .with_catalog(catalog)
        .with_evidence(evidence);
    let report = ComplianceAssessor::new(config.assessment, &snapshot).assess_batch(&positions);

    match &args.output {
        Some(path) => write_assessments(report.records(), File::create(path)?)?,
        None => write_assessments(report.records(), io::stdout().lock())?,
    }

    if let Some(dir) = &args.shortlists_dir {
        fs::create_dir_all(dir)?;
        let mut written = 0usize;
        for assessment in &report.assessments {
            if assessment.shortlist.is_empty() {
                continue;
            }
            let path = dir.join(shortlist_file_name(&assessment.record));
            write_shortlist(&assessment.shortlist, File::create(&path)?)?;
            written += 1;
        }
        info!(shortlists = written, dir = %dir.display(), "shortlists written");
    }

    let tally = VerdictTally::from_report(&report);
    if args.output.is_some() {
        render_tally(&mut io::stdout().lock(), &tally, filings.rejected.len())?;
    } else {
        render_tally(&mut io::stderr().lock(), &tally, filings.rejected.len())?;
    }

    Ok(())
}

fn render_tally<W: Write>(out: &mut W, tally: &VerdictTally, rejected: usize) -> io::Result<()> {
    writeln!(out, "Compliance assessment")?;
    writeln!(out, "- Yes: {}", tally.yes)?;
    writeln!(out, "- No: {}", tally.no)?;
    writeln!(out, "- Maybe: {}", tally.maybe)?;
    writeln!(out, "- n/a: {}", tally.unavailable)?;
    if rejected > 0 {
        writeln!(out, "{rejected} filing row(s) excluded; see log for reasons")?;
    }
    Ok(())
}
