// Plain-text rendering of a comparison for the terminal.

use std::fmt::Write;

use crate::compare::{Category, Comparison, ComparisonOutcome, Side, Tiebreak, Verdict};
use crate::stats::CareerAverages;

/// Printed after the not-found messages when a comparison cannot be made.
pub const FAILURE_MESSAGE: &str = "Comparison failed. Check player names.";

/// Render an outcome as the full report text, newline-terminated.
pub fn render(outcome: &ComparisonOutcome) -> String {
    match outcome {
        ComparisonOutcome::Compared(comparison) => render_comparison(comparison),
        ComparisonOutcome::Failed { messages } => {
            let mut out = String::new();
            for message in messages {
                out.push_str(message);
                out.push('\n');
            }
            out.push_str(FAILURE_MESSAGE);
            out.push('\n');
            out
        }
    }
}

pub fn render_comparison(c: &Comparison) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str("Career Averages:\n");
    out.push_str(&averages_table(
        &c.first_name,
        &c.first_averages,
        &c.second_name,
        &c.second_averages,
    ));

    out.push_str("\nStat Category Winners:\n");
    for r in &c.categories {
        // writeln! into a String cannot fail.
        let _ = match r.winner {
            Some(Side::First) => writeln!(
                out,
                "{}: {} wins ({:.1} vs {:.1})",
                r.category, c.first_name, r.first, r.second
            ),
            Some(Side::Second) => writeln!(
                out,
                "{}: {} wins ({:.1} vs {:.1})",
                r.category, c.second_name, r.second, r.first
            ),
            None => writeln!(out, "{}: Tie ({:.1} vs {:.1})", r.category, r.first, r.second),
        };
    }

    out.push_str("\nCareer Accolades:\n");
    let _ = writeln!(out, "{}: {}", c.first_name, c.first_accolades);
    let _ = writeln!(out, "{}: {}", c.second_name, c.second_accolades);

    out.push_str("\nFinal Verdict:\n");
    out.push_str(&verdict_text(c));
    out
}

/// Verdict lines. A tie with incomplete accolade data ends after the
/// "Accolades decide" line.
pub fn verdict_text(c: &Comparison) -> String {
    match c.verdict {
        Verdict::Stats(side) => format!(
            "{} is the better statistical player ({}-{})\n",
            c.name(side),
            c.score(side),
            c.score(side.other())
        ),
        Verdict::StatsTied(tiebreak) => {
            let mut out = String::from("Stats are tied. Accolades decide:\n");
            match tiebreak {
                Tiebreak::Championships(side) => {
                    let _ = writeln!(out, "{} wins on championships.", c.name(side));
                }
                Tiebreak::TooClose => out.push_str("Even accolades. Too close to call!\n"),
                Tiebreak::Undecided => {}
            }
            out
        }
    }
}

/// Two-column table: one row per category, one column per player.
pub fn averages_table(
    first_name: &str,
    first: &CareerAverages,
    second_name: &str,
    second: &CareerAverages,
) -> String {
    let cells = |avg: &CareerAverages| -> Vec<String> {
        Category::ALL
            .iter()
            .map(|cat| format!("{:.1}", cat.value(avg)))
            .collect()
    };
    let first_cells = cells(first);
    let second_cells = cells(second);

    let label_width = Category::ALL.iter().map(|c| c.label().len()).max().unwrap_or(0);
    let column_width = |name: &str, cells: &[String]| {
        cells
            .iter()
            .map(|s| s.chars().count())
            .chain(std::iter::once(name.chars().count()))
            .max()
            .unwrap_or(0)
    };
    let w1 = column_width(first_name, &first_cells);
    let w2 = column_width(second_name, &second_cells);

    let mut out = String::new();
    let _ = writeln!(out, "{:<label_width$}  {:>w1$}  {:>w2$}", "", first_name, second_name);
    for (i, cat) in Category::ALL.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<label_width$}  {:>w1$}  {:>w2$}",
            cat.label(),
            first_cells[i],
            second_cells[i]
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accolades::AccoladeTable;
    use crate::compare::compare_averages;

    fn avg(pts: f64) -> CareerAverages {
        CareerAverages {
            pts,
            ast: 5.0,
            reb: 6.0,
            stl: 1.2,
            blk: 0.8,
            fg_pct: 47.5,
            fg3_pct: 36.1,
        }
    }

    #[test]
    fn failure_lists_messages_then_summary() {
        let outcome = ComparisonOutcome::Failed {
            messages: vec!["Player Zzz not found!".into()],
        };
        assert_eq!(
            render(&outcome),
            "Player Zzz not found!\nComparison failed. Check player names.\n"
        );
    }

    #[test]
    fn category_lines_put_winner_value_first() {
        let table = AccoladeTable::builtin();
        let c = compare_averages("Player A", avg(20.0), "Player B", avg(25.0), &table);
        let text = render_comparison(&c);
        assert!(text.contains("PTS: Player B wins (25.0 vs 20.0)\n"), "{text}");
        assert!(text.contains("AST: Tie (5.0 vs 5.0)\n"), "{text}");
        assert!(text.contains("Player B is the better statistical player (1-0)\n"));
    }

    #[test]
    fn accolade_lines_show_not_available() {
        let table = AccoladeTable::builtin();
        let c = compare_averages("Player A", avg(20.0), "kobe bryant", avg(25.0), &table);
        let text = render_comparison(&c);
        assert!(text.contains("Player A: Championships: N/A, Finals MVPs: N/A, MVPs: N/A\n"));
        assert!(text.contains("kobe bryant: Championships: 5, Finals MVPs: 2, MVPs: 1\n"));
    }

    #[test]
    fn tied_with_missing_accolades_stops_after_header() {
        let table = AccoladeTable::builtin();
        let c = compare_averages("Player A", avg(20.0), "Kobe Bryant", avg(20.0), &table);
        let text = verdict_text(&c);
        assert_eq!(text, "Stats are tied. Accolades decide:\n");
    }

    #[test]
    fn tied_stats_decided_by_championships() {
        let table = AccoladeTable::builtin();
        let c = compare_averages("Tim Duncan", avg(20.0), "Kevin Garnett", avg(20.0), &table);
        assert_eq!(
            verdict_text(&c),
            "Stats are tied. Accolades decide:\nTim Duncan wins on championships.\n"
        );
    }

    #[test]
    fn table_aligns_columns_to_names() {
        let table = averages_table("A", &avg(27.1), "Long Name", &avg(9.0));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "        A  Long Name");
        assert_eq!(lines[1], "PTS  27.1        9.0");
        assert_eq!(lines[7], "3P%  36.1       36.1");
    }
}
