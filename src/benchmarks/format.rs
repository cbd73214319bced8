//! Benchmark result formatting.
//!
//! Column widths are computed from the data so every row lines up, with a floor that
//! keeps short reports readable.

use super::data::PerformanceMetrics;

const HEADERS: [&str; 6] = ["Operation", "Count", "Total", "Avg", "Min", "Max"];
const MIN_NAME_WIDTH: usize = 20;
const MIN_DURATION_WIDTH: usize = 12;

/// One formatted row: name, count, then total/avg/min/max durations.
fn cells(name: &str, metrics: &PerformanceMetrics) -> [String; 6] {
    [
        name.to_string(),
        metrics.count.to_string(),
        format!("{:?}", metrics.total_duration),
        format!("{:?}", metrics.avg_duration),
        format!("{:?}", metrics.min_duration),
        format!("{:?}", metrics.max_duration),
    ]
}

/// Calculates the column widths for a benchmark table.
///
/// # Returns
/// Widths in the order (name, count, total, avg, min, max)
pub fn calculate_column_widths(benchmarks: &[(&String, &PerformanceMetrics)]) -> [usize; 6] {
    let mut widths = [
        MIN_NAME_WIDTH,
        HEADERS[1].len(),
        MIN_DURATION_WIDTH,
        MIN_DURATION_WIDTH,
        MIN_DURATION_WIDTH,
        MIN_DURATION_WIDTH,
    ];
    for (name, metrics) in benchmarks {
        for (width, cell) in widths.iter_mut().zip(cells(name, metrics)) {
            *width = (*width).max(cell.len());
        }
    }
    widths
}

fn row(values: &[String; 6], widths: &[usize; 6]) -> String {
    format!(
        "{:<w0$} | {:>w1$} | {:>w2$} | {:>w3$} | {:>w4$} | {:>w5$}",
        values[0],
        values[1],
        values[2],
        values[3],
        values[4],
        values[5],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
        w4 = widths[4],
        w5 = widths[5],
    )
}

/// Renders a header, a separator and one line per benchmark, in the given order.
pub fn format_table(benchmarks: &[(&String, &PerformanceMetrics)]) -> String {
    let widths = calculate_column_widths(benchmarks);
    let header = row(&HEADERS.map(String::from), &widths);

    let mut lines = vec![header.clone(), "-".repeat(header.len())];
    lines.extend(
        benchmarks
            .iter()
            .map(|(name, metrics)| row(&cells(name, metrics), &widths)),
    );
    lines.join("\n")
}
