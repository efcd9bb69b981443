//! Terminal rendering of a screening run: ranked summary table, per-candidate
//! detail panels and the list of files that could not be scored.

use crossterm::style::{Color, Stylize};

use crate::screening::table::{ResultRow, SUMMARY_COLUMNS};
use crate::screening::{Criterion, ResultTable, ScoreBand};

const MAX_SUMMARY_WIDTH: usize = 60;
const ORANGE: Color = Color::Rgb {
    r: 255,
    g: 165,
    b: 0,
};

fn band_colour(band: ScoreBand) -> Color {
    match band {
        ScoreBand::High => Color::Green,
        ScoreBand::Medium => ORANGE,
        ScoreBand::Low => Color::Red,
    }
}

fn paint(text: String, band: ScoreBand, colour: bool) -> String {
    if colour {
        text.with(band_colour(band)).to_string()
    } else {
        text
    }
}

fn truncate(text: &str, max: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        single_line
    } else {
        let cut: String = single_line.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Ranked summary table. The total score cell is coloured by band.
pub fn render_summary(table: &ResultTable, colour: bool) -> String {
    let ranked = table.ranked();
    let cells: Vec<[String; 4]> = ranked
        .iter()
        .map(|row| {
            let mut c = row.summary_cells();
            c[3] = truncate(&c[3], MAX_SUMMARY_WIDTH);
            c
        })
        .collect();

    let mut widths = SUMMARY_COLUMNS.map(|h| h.chars().count());
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = SUMMARY_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i]))
        .collect();
    out.push_str(header.join(" | ").trim_end());
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for (row, cells) in ranked.iter().zip(&cells) {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let padded = pad(cell, widths[i]);
                if i == 1 {
                    paint(padded, row.band(), colour)
                } else {
                    padded
                }
            })
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
    }
    out
}

/// Expanded view of one candidate.
pub fn render_detail(row: &ResultRow, colour: bool) -> String {
    let result = &row.result;
    let header = format!(
        "{} (Score: {})",
        result.candidate_name,
        paint(result.total_score.to_string(), row.band(), colour)
    );

    let mut out = format!("▸ {header}  [{}]\n", row.file_name);
    // skills and experience first, then knowledge and tools
    for criterion in [
        Criterion::Skills,
        Criterion::ExperienceEducation,
        Criterion::Knowledge,
        Criterion::Tools,
    ] {
        let score = result.analysis.get(criterion);
        let label = format!("{} ({}/100):", criterion.label(), score.score);
        let label = if colour {
            label.bold().to_string()
        } else {
            label
        };
        out.push_str(&format!("    {label} {}\n", score.reasoning.trim()));
    }
    if !result.summary.trim().is_empty() {
        out.push_str(&format!("    Summary: {}\n", result.summary.trim()));
    }
    out.push_str(&format!(
        "    Criteria average: {}\n",
        result.criteria_average()
    ));
    out
}

pub fn render_details(table: &ResultTable, colour: bool) -> String {
    table
        .ranked()
        .iter()
        .map(|row| render_detail(row, colour))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_failures(table: &ResultTable, colour: bool) -> String {
    table
        .failures()
        .iter()
        .map(|f| {
            let prefix = format!("Error analyzing {}:", f.file_name);
            let prefix = if colour {
                prefix.red().to_string()
            } else {
                prefix
            };
            format!("{prefix} {}\n", f.error)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::models::fixtures::result;
    use crate::screening::parser::parse_analysis;
    use crate::screening::testing::JANE_DOE_REPLY;

    fn jane_table() -> ResultTable {
        let mut table = ResultTable::default();
        table.push_row("jane.pdf", parse_analysis(JANE_DOE_REPLY).unwrap());
        table
    }

    #[test]
    fn test_summary_for_jane_doe() {
        let text = render_summary(&jane_table(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Candidate Name"));
        let cells: Vec<&str> = lines[2].split(" | ").map(str::trim).collect();
        assert_eq!(cells, ["Jane Doe", "72", "80", "Strong fit"]);
    }

    #[test]
    fn test_summary_has_one_line_per_row_in_rank_order() {
        let mut table = ResultTable::default();
        table.push_row("a.pdf", result("Alpha", 45));
        table.push_row("b.pdf", result("Bravo", 91));
        let text = render_summary(&table, false);
        let body: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(body.len(), 2);
        assert!(body[0].starts_with("Bravo"));
        assert!(body[1].starts_with("Alpha"));
    }

    #[test]
    fn test_plain_summary_has_no_escape_codes() {
        assert!(!render_summary(&jane_table(), false).contains('\u{1b}'));
        assert!(render_summary(&jane_table(), true).contains("72"));
    }

    #[test]
    fn test_detail_panel_lists_all_criteria() {
        let table = jane_table();
        let detail = render_detail(table.ranked()[0], false);
        assert!(detail.contains("Jane Doe (Score: 72)"));
        assert!(detail.contains("Skills (80/100): Go and gRPC in production"));
        assert!(detail.contains("Experience (70/100):"));
        assert!(detail.contains("Knowledge (65/100):"));
        assert!(detail.contains("Tools (70/100):"));
        assert!(detail.contains("Criteria average: 71"));
    }

    #[test]
    fn test_band_colours() {
        assert_eq!(band_colour(ScoreBand::High), Color::Green);
        assert_eq!(band_colour(ScoreBand::Medium), ORANGE);
        assert_eq!(band_colour(ScoreBand::Low), Color::Red);
    }

    #[test]
    fn test_long_summary_truncated_for_display() {
        let long = "word ".repeat(40);
        let cut = truncate(&long, 20);
        assert_eq!(cut.chars().count(), 20);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_failures_name_the_file() {
        let mut table = ResultTable::default();
        table.push_failure("broken.pdf", "File processing failed for asset files/x");
        let text = render_failures(&table, false);
        assert!(text.starts_with("Error analyzing broken.pdf:"));
    }
}
