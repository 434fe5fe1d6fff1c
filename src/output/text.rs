//! Colored terminal rendering of the final report.

use std::io::Write;

use yansi::Paint;

use super::Report;

/// Render the report to the given writer.
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn render<W: Write>(report: &Report, out: &mut W) -> std::io::Result<()> {
    writeln!(
        out,
        "\n{} {} {}",
        "✓".green().bold(),
        "Finished processing.".bold(),
        format!("Found {} groups of similar SVGs.", report.summary.group_count)
            .yellow()
            .bold()
    )?;
    writeln!(
        out,
        "{} {} {} {} {}",
        "Displaying".blue(),
        report.summary.group_count.bold(),
        "groups with".blue(),
        report.summary.grouped_files.bold(),
        "total files...".blue()
    )?;

    for (idx, group) in report.groups.iter().enumerate() {
        writeln!(
            out,
            "\n{}",
            format!("Group {} of {}:", idx + 1, report.summary.group_count)
                .magenta()
                .bold()
        )?;
        for file in &group.files {
            writeln!(out, "{} {}", "→".cyan(), file.display())?;
        }
    }

    if !report.problem_files.is_empty() {
        writeln!(out, "\n{}", "⚠ Problematic SVG Files:".yellow().bold())?;
        writeln!(
            out,
            "{}",
            "The following files could not be processed correctly:".yellow()
        )?;
        for problem in &report.problem_files {
            writeln!(out, "\n{} {}", "✗".red(), problem.path.display())?;
            writeln!(out, "  {}", format!("Issue: {}", problem.reason).dim())?;
        }
        writeln!(
            out,
            "\n{}",
            format!("Total problematic files: {}", report.summary.problem_files).yellow()
        )?;
    }

    Ok(())
}
