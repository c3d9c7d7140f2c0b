// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the issue-rank CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `ISSUE_RANK_THEME` first, then `COLORFGBG`, then defaults to dark. Respects
//! `NO_COLOR` and drops all escapes when stdout is not a TTY, so piping into
//! other tools gets plain text.

use issue_rank::{MatchEvidence, Record, SearchResult};
use std::sync::OnceLock;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("ISSUE_RANK_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; background 7+ (except 8) is a light terminal
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 132);
}

mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_GREEN: (u8, u8, u8) = (56, 130, 55);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            rgb(match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            })
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Cut to `max` characters, ending with "…" when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

// ═══════════════════════════════════════════════════════════════════════════
// RESULT FORMATTING
// ═══════════════════════════════════════════════════════════════════════════

/// Score with three decimals, colored by strength.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>7.3}", score);
    if !use_colors() {
        return text;
    }
    let color = if score >= 3.0 {
        BRIGHT_GREEN()
    } else if score >= 1.5 {
        GREEN()
    } else if score > 0.0 {
        YELLOW()
    } else {
        GRAY()
    };
    format!("{}{}{}", color, text, RESET)
}

/// One-line summary of what matched, e.g. `title: login · labels: bug · #42`.
pub fn evidence_summary(evidence: &MatchEvidence) -> String {
    let mut parts = Vec::new();
    if !evidence.title_matches.is_empty() {
        parts.push(format!("title: {}", join(evidence.title_matches.iter())));
    }
    if !evidence.body_matches.is_empty() {
        parts.push(format!("body: {}", join(evidence.body_matches.iter())));
    }
    if !evidence.label_matches.is_empty() {
        parts.push(format!("labels: {}", join(evidence.label_matches.iter())));
    }
    if !evidence.fuzzy_matches.is_empty() {
        let pairs = evidence
            .fuzzy_matches
            .iter()
            .map(|m| format!("{}~{}", m.term, m.word));
        parts.push(format!("fuzzy: {}", join(pairs)));
    }
    if evidence.number_match {
        parts.push("number".to_string());
    }
    if evidence.vector_similarity > 0.0 {
        parts.push(format!("vector {:.2}", evidence.vector_similarity));
    }
    parts.join(" · ")
}

fn join<I, T>(items: I) -> String
where
    I: Iterator<Item = T>,
    T: AsRef<str>,
{
    items
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `  1.  1.500  #101 Login fails on Safari`, followed by a dimmed evidence line.
pub fn result_line(rank: usize, record: &Record, result: &SearchResult) -> String {
    let number = themed(CYAN, &[], &format!("#{}", record.number));
    let title = if result.visible {
        themed(GREEN, &[BOLD], &truncate(&record.title, 72))
    } else {
        themed(GRAY, &[], &truncate(&record.title, 72))
    };
    let mut line = format!(
        "{:>3}. {}  {} {}",
        rank,
        score_value(result.score),
        number,
        title
    );
    let summary = evidence_summary(&result.evidence);
    if !summary.is_empty() {
        line.push('\n');
        line.push_str(&format!("{:13}{}", "", themed(GRAY, &[], &summary)));
    }
    line
}

/// Header naming the query and how many records it kept.
pub fn header(query: &str, visible: usize, total: usize) -> String {
    format!(
        "{} {}  {}",
        themed(YELLOW, &[BOLD], "query"),
        query,
        themed(GRAY, &[], &format!("({} of {} visible)", visible, total))
    )
}
