//! CLI output formatting.
//!
//! A successful run prints three lines to stdout:
//!
//! ```text
//! Input size: 4.77 MB
//! Final quality: 84
//! Output size: 497.3 KB
//! ```
//!
//! The input line is printed before the search starts, so it is still shown
//! when the search fails. Sizes use the `-t` unit when one was given and the
//! largest fitting unit otherwise.
//!
//! Each `format_*` function returns strings for testability; `print_*`
//! wrappers write them to stdout. Diagnostics go through `tracing` on stderr.

use crate::compress::CompressReport;
use crate::units::SizeBudget;

/// Format the input size line.
pub fn format_input_size(input_bytes: u64, budget: &SizeBudget) -> String {
    format!("Input size: {}", budget.display(input_bytes))
}

/// Format the lines reported after the output file is written.
pub fn format_report(report: &CompressReport) -> Vec<String> {
    vec![
        format!("Final quality: {}", report.quality),
        format!("Output size: {}", report.budget.display(report.output.bytes)),
    ]
}

pub fn print_input_size(input_bytes: u64, budget: &SizeBudget) {
    println!("{}", format_input_size(input_bytes, budget));
}

pub fn print_report(report: &CompressReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}
