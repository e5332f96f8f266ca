//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use tg_core::{AnalysisResult, Verdict};

const BAR_WIDTH: usize = 20;

/// Color a verdict label.
fn verdict_colored(verdict: Verdict) -> ColoredString {
    match verdict {
        Verdict::Real => verdict.as_str().green().bold(),
        Verdict::Fake => verdict.as_str().red().bold(),
        Verdict::Misleading => verdict.as_str().yellow().bold(),
        Verdict::Unverified => verdict.as_str().dimmed().bold(),
    }
}

/// Render a 0-100 score as a fixed-width bar.
fn score_bar(score: u8) -> String {
    let filled = (usize::from(score.min(100)) * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn print_score(label: &str, score: u8) {
    println!("  {:<22} {} {:>3}", label, score_bar(score).cyan(), score);
}

/// Print a full analysis result.
pub fn print_result(result: &AnalysisResult) {
    println!();
    println!(
        "{}: {}  {}",
        "Verdict".bold(),
        verdict_colored(result.verdict),
        format!("({}% confidence)", result.confidence).dimmed()
    );
    println!();
    println!("{}", result.explanation);

    if !result.key_points.is_empty() {
        println!();
        println!("{}", "Key Points".bold());
        for (i, point) in result.key_points.iter().enumerate() {
            println!("  {}. {}", i + 1, point);
        }
    }

    println!();
    println!("{}", "Categories".bold());
    print_score("Bias", result.categories.bias);
    print_score("Sensationalism", result.categories.sensationalism);
    print_score("Logical consistency", result.categories.logical_consistency);

    println!();
    println!("{}", "Sources".bold());
    if result.sources.is_empty() {
        println!("  {}", "No sources cited.".dimmed());
    }
    for source in &result.sources {
        let mark = if source.verified {
            "✓".green()
        } else {
            "?".yellow()
        };
        println!("  {} {}", mark, source.title);
        println!("    {}", source.uri.dimmed());
    }
    println!();
}
