use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Stylize};
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    let bold = |color: AnsiColor| Style::new().bold().fg_color(Some(Color::Ansi(color)));
    Styles::styled()
        .usage(bold(AnsiColor::Cyan).underline())
        .header(bold(AnsiColor::Cyan).underline())
        .literal(bold(AnsiColor::Green))
        .invalid(bold(AnsiColor::Red))
        .error(bold(AnsiColor::Red))
        .valid(bold(AnsiColor::Green))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::Rgb { r, g, b }
    }

    pub const CYAN: Color = rgb(0, 255, 255);
    pub const MAGENTA: Color = rgb(255, 0, 255);
    pub const PURPLE: Color = rgb(180, 100, 255);
    pub const GREEN: Color = rgb(0, 255, 136);
    pub const ORANGE: Color = rgb(255, 165, 0);
    pub const RED: Color = rgb(255, 85, 85);
    pub const DIM: Color = rgb(128, 128, 128);
    pub const WHITE: Color = rgb(255, 255, 255);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Box Drawing Characters
// ═══════════════════════════════════════════════════════════════════════════════

pub mod box_chars {
    pub const SINGLE_HORIZONTAL: &str = "─";

    // Rounded box
    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";

    // Arrows and bullets
    pub const ARROW_RIGHT: &str = "▶";
    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const STAR: &str = "★";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.to_string().with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    eprintln!(
        " {} {}",
        box_chars::CROSS_MARK.to_string().with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::ORANGE).bold(),
        message.with(colors::ORANGE)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Section Headers
// ═══════════════════════════════════════════════════════════════════════════════

const SECTION_WIDTH: usize = 60;

fn rule(width: usize) -> String {
    box_chars::SINGLE_HORIZONTAL.repeat(width)
}

pub fn print_section_header(title: &str) {
    let inner = SECTION_WIDTH.saturating_sub(title.width() + 2);
    let left = inner / 2;
    println!();
    println!(
        "{}{} {} {}{}",
        box_chars::ROUND_TOP_LEFT.with(colors::CYAN),
        rule(left).with(colors::CYAN),
        title.with(colors::CYAN).bold().attribute(Attribute::Italic),
        rule(inner - left).with(colors::CYAN),
        box_chars::ROUND_TOP_RIGHT.with(colors::CYAN)
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        box_chars::ROUND_BOTTOM_LEFT.with(colors::CYAN),
        rule(SECTION_WIDTH).with(colors::CYAN),
        box_chars::ROUND_BOTTOM_RIGHT.with(colors::CYAN)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Key-Value Display
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::PURPLE),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Song Display
// ═══════════════════════════════════════════════════════════════════════════════

/// `name by artist`, padded to `width` columns.
fn song_label(name: &str, artist: &str, width: usize) -> String {
    let label = format!("{} by {}", name, artist);
    let padding = width.saturating_sub(label.width());
    format!("{}{}", label, " ".repeat(padding))
}

pub fn print_now_playing(name: &str, artist: &str, preview_url: Option<&str>) {
    println!(
        "  {} {} {}",
        box_chars::STAR.with(colors::MAGENTA).bold(),
        "Now playing:".with(colors::MAGENTA).bold(),
        song_label(name, artist, 0).with(colors::WHITE).bold()
    );
    if let Some(url) = preview_url {
        println!("      {}", url.with(colors::DIM));
    }
}

pub fn print_ranked_song(rank: usize, name: &str, artist: &str, similarity: f64) {
    println!(
        "  {} {} {}  {}",
        format!("{:>3}.", rank).with(colors::DIM),
        box_chars::ARROW_RIGHT.with(colors::CYAN),
        song_label(name, artist, 44).with(colors::WHITE),
        format!("{:.4}", similarity).with(colors::GREEN)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}
