//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use retina_core::render::hex_to_rgb;
use retina_core::upload::FileSummary;
use retina_core::{ClassCatalog, DisplayModel, HealthStatus, Notification, NotificationLevel, Severity};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Width of the class-label column in probability bars.
const LABEL_WIDTH: usize = 18;

/// Number of cells in the confidence gauge.
const GAUGE_CELLS: usize = 30;

/// Print a notification to stderr.
pub fn print_notification(note: &Notification) {
    let icon = match note.level {
        NotificationLevel::Error => "✖".red().bold(),
        NotificationLevel::Warning => "⚠".yellow().bold(),
        NotificationLevel::Info => "ℹ".blue().bold(),
    };
    eprintln!("{} {}", icon, note.message);
}

/// Print the file that was just selected.
pub fn print_selected(file: &FileSummary) {
    println!(
        "{} {} {}",
        "●".cyan(),
        file.file_name.bold(),
        format!("({}, {})", file.mime_type, format_size(file.size)).dimmed()
    );
}

/// Spinner shown while a request is in flight.
pub fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the prediction service status.
pub fn print_health(base_url: &str, health: &HealthStatus) {
    println!("{}", "Prediction Service".bold());
    println!();
    println!("  {:10} {}", "URL", base_url.cyan());
    println!(
        "  {:10} {}",
        "Status",
        health.status.as_deref().unwrap_or("unknown")
    );
    let model = if health.is_model_loaded() {
        "loaded".green()
    } else {
        "not loaded".red()
    };
    println!("  {:10} {}", "Model", model);
    if let Some(device) = &health.device {
        println!("  {:10} {}", "Device", device);
    }
}

/// Print the severity class catalog.
pub fn print_catalog(catalog: &ClassCatalog) {
    if catalog.classes.is_empty() {
        println!("{}", "No severity classes reported.".dimmed());
        return;
    }

    println!("{}", "Severity Classes".bold());
    println!();

    for (i, class) in catalog.classes.iter().enumerate() {
        let swatch = Severity::from_value(i as i64)
            .map(|s| paint("■", s.color()))
            .unwrap_or_else(|| "■".normal());
        println!("  {} {} {}", swatch, i, class.bold());

        if let Some(info) = catalog.info.get(i) {
            println!("      {}: {}", "Risk".dimmed(), info.risk);
            println!("      {}", info.description);
            println!("      {}", info.recommendation.dimmed());
        }
    }
}

/// Print a rendered prediction.
pub fn print_display_model(model: &DisplayModel) {
    println!();
    println!(
        "  {}",
        paint_background(&format!(" {} ", model.badge.text), &model.badge.color)
            .white()
            .bold()
    );
    println!();

    let (filled, empty) = gauge_cells(model.ring.fraction, GAUGE_CELLS);
    println!(
        "  {}{} {} {}",
        paint(&"━".repeat(filled), &model.ring.color),
        "━".repeat(empty).dimmed(),
        model.ring.label.bold(),
        "confidence".dimmed()
    );
    println!();

    println!("  {:16}{}", "Diagnosis".bold(), paint(&model.diagnosis.text, &model.diagnosis.color));
    println!("  {:16}{}", "Risk".bold(), paint(&model.risk.text, &model.risk.color));
    println!("  {:16}{}", "Description".bold(), model.description);
    println!("  {:16}{}", "Recommendation".bold(), model.recommendation);
    println!();

    let track = bar_track_width(term_width());
    for bar in &model.bars {
        let (filled, empty) = bar_cells(bar.width_percent, track);
        println!(
            "  {}{}{} {:>6}",
            pad_right(&bar.label, LABEL_WIDTH),
            paint(&"█".repeat(filled), &bar.color),
            "░".repeat(empty).dimmed(),
            bar.value_label
        );
    }
    println!();
}

/// Color text with a `#rrggbb` color, leaving it plain if the hex is bad.
fn paint(text: &str, hex: &str) -> ColoredString {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

/// Same as `paint`, for the background.
fn paint_background(text: &str, hex: &str) -> ColoredString {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => text.on_truecolor(r, g, b),
        None => text.normal(),
    }
}

/// Filled and empty cells of a gauge for a 0..=1 fraction.
fn gauge_cells(fraction: f64, cells: usize) -> (usize, usize) {
    let filled = ((fraction.clamp(0.0, 1.0) * cells as f64).round() as usize).min(cells);
    (filled, cells - filled)
}

/// Filled and empty cells of a probability bar for a 0..=100 width.
fn bar_cells(width_percent: f64, track: usize) -> (usize, usize) {
    gauge_cells(width_percent / 100.0, track)
}

/// Track width left over once labels and values are laid out.
fn bar_track_width(term_w: usize) -> usize {
    term_w.saturating_sub(LABEL_WIDTH + 12).clamp(10, 50)
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Human-readable byte size.
fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KB", b / KIB)
    } else {
        format!("{:.1} MB", b / (KIB * KIB))
    }
}
