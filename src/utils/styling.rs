//! Terminal styling utilities for the experiment run output

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static FLASK: Emoji<'_, '_> = Emoji("🧪 ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
     █████╗ ██████╗ ██╗      █████╗ ████████╗███████╗
    ██╔══██╗██╔══██╗██║     ██╔══██╗╚══██╔══╝██╔════╝
    ███████║██████╔╝██║     ███████║   ██║   █████╗
    ██╔══██║██╔══██╗██║     ██╔══██║   ██║   ██╔══╝
    ██║  ██║██████╔╝███████╗██║  ██║   ██║   ███████╗
    ╚═╝  ╚═╝╚═════╝ ╚══════╝╚═╝  ╚═╝   ╚═╝   ╚══════╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("∅").magenta().bold(),
        style("Which features earn their keep?").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(
    input: &Path,
    target: &str,
    classifier: &str,
    seed: u64,
    folds: usize,
    top_k: usize,
    noise_columns: usize,
) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:      {:<35}│",
        FOLDER,
        truncate_path(input, 34)
    );
    println!(
        "    │  {} Target:     {:<35}│",
        TARGET,
        truncate_string(target, 34)
    );
    println!(
        "    │  {} Classifier: {:<35}│",
        FLASK,
        truncate_string(classifier, 34)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Seed: {:<10} Folds: {:<17}│",
        DICE,
        style(seed).yellow(),
        style(folds).yellow()
    );
    println!(
        "    │  {} Top-k: {:<9} Noise columns: {:<9}│",
        CHART,
        style(top_k).yellow(),
        style(noise_columns).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!(
        "    {} {}",
        style("!").yellow().bold(),
        style(message).yellow()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Ablate comparison complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!(
            "      Found {} {}",
            style(count).yellow().bold(),
            description
        );
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("...{}", &s[s.len() - max_len + 3..])
    }
}
