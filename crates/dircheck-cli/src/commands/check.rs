//! Check command - run the checks over a directory snapshot.

use std::path::{Path, PathBuf};

use colored::{ColoredString, Colorize};
use dircheck::{CheckReport, DirCheck, DirCheckConfig, WarningLevel};

pub fn run(
    directory: PathBuf,
    orpha_mapping: Option<PathBuf>,
    config: Option<PathBuf>,
    disabled: Vec<String>,
    output: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config {
        Some(path) => DirCheckConfig::from_file(&path)?,
        None => DirCheckConfig::default(),
    };
    if let Some(mapping) = orpha_mapping {
        config = config.with_orpha_mapping(mapping);
    }
    let config = config.with_disabled_checks(disabled);

    let dircheck = DirCheck::with_config(config);
    let report = dircheck.check_file(&directory)?;

    if let Some(path) = &output {
        report.save(path)?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&directory, &report);
    if let Some(path) = &output {
        println!("Report written to {}", path.display().to_string().cyan());
    }
    Ok(())
}

fn print_report(directory: &Path, report: &CheckReport) {
    println!(
        "{} {}",
        "Directory check for".cyan().bold(),
        directory.display().to_string().white()
    );
    println!();

    for nn in report.national_nodes() {
        let counts = &report.summary.by_national_node[nn];
        println!(
            "{} ({} errors, {} warnings, {} info)",
            format!("National node {}", nn).yellow().bold(),
            counts.error.to_string().red(),
            counts.warning.to_string().yellow(),
            counts.info.to_string().blue()
        );
        for warning in report.for_national_node(nn) {
            println!(
                "  {} {} {} [{}]: {}",
                level_label(warning.level),
                warning.entity_type.label().dimmed(),
                warning.entity_id.white(),
                warning.check_name.dimmed(),
                warning.message
            );
        }
        println!();
    }

    println!("{}", "Summary:".yellow().bold());
    println!("  Errors:   {}", report.summary.by_level.error.to_string().red());
    println!(
        "  Warnings: {}",
        report.summary.by_level.warning.to_string().yellow()
    );
    println!("  Info:     {}", report.summary.by_level.info.to_string().blue());
    if !report.summary.by_check.is_empty() {
        println!();
        println!("{}", "By check:".yellow().bold());
        for (check, count) in &report.summary.by_check {
            println!("  {:<20} {}", check, count);
        }
    }

    if report.summary.total == 0 {
        println!();
        println!("{}", "No issues found.".green().bold());
    }
}

fn level_label(level: WarningLevel) -> ColoredString {
    match level {
        WarningLevel::Error => level.label().red().bold(),
        WarningLevel::Warning => level.label().yellow().bold(),
        WarningLevel::Info => level.label().blue(),
    }
}
