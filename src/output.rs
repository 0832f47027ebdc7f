use crate::inspect::InspectionReport;
use anyhow::Result;
use console::style;
use std::path::Path;

pub fn output_json(report: &InspectionReport) -> Result<()> {
    println!("{}", report.to_json()?);
    Ok(())
}

pub fn output_ndjson(report: &InspectionReport) -> Result<()> {
    for sample in &report.metrics_by_file {
        println!("{}", serde_json::to_string(sample)?);
    }
    Ok(())
}

pub fn output_summary(report: &InspectionReport, written_to: Option<&Path>) -> Result<()> {
    println!("{}", style("Code Quality Summary").bold());
    println!("{}", "─".repeat(50));

    println!("Repository: {}", style(report.repository_path.display()).dim());
    println!(
        "Cyclomatic complexity: {}",
        style(format!("{:.2}", report.metrics.ciclomatic_complexity)).cyan()
    );
    println!(
        "Maintainability index: {}",
        style(format!("{:.2}", report.metrics.maintainability)).green()
    );
    println!(
        "Lines of code: {}",
        style(report.metrics.lines_of_code).yellow()
    );
    println!("Files: {}", style(report.metrics_by_file.len()).cyan());

    if report.history_inspected {
        println!(
            "History: {} files over {} dates",
            style(report.files_history.len()).cyan(),
            style(report.history_metrics.len()).cyan()
        );
        if let (Some(newest), Some(oldest)) =
            (report.history_metrics.first(), report.history_metrics.last())
        {
            println!(
                "Date range: {} to {}",
                style(oldest.date.as_deref().unwrap_or("")).dim(),
                style(newest.date.as_deref().unwrap_or("")).dim()
            );
        }
    }

    if !report.metrics_by_file.is_empty() {
        println!();
        println!(
            "{:<40} {:>10} {:>10} {:>8}",
            style("File").bold(),
            style("CC").bold(),
            style("MI").bold(),
            style("LOC").bold()
        );
        println!("{}", "─".repeat(71));
        for sample in report.metrics_by_file.iter().take(50) {
            println!(
                "{:<40} {:>10.2} {:>10.2} {:>8}",
                sample.file_name.as_deref().unwrap_or(""),
                sample.ciclomatic_complexity,
                sample.maintainability,
                sample.lines_of_code
            );
        }
        if report.metrics_by_file.len() > 50 {
            println!("\n... and {} more files", report.metrics_by_file.len() - 50);
        }
    }

    if let Some(dir) = written_to {
        println!("\nReports written to {}", style(dir.display()).bold());
    }
    Ok(())
}
