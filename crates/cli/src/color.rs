// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! 256-color palette for help text and job trees.

use aj_core::JobStatus;
use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

pub mod codes {
    pub const HEADER: u8 = 74;
    pub const LITERAL: u8 = 250;
    pub const PLACEHOLDER: u8 = 245;
    pub const MUTED: u8 = 240;
    pub const COMPLETE: u8 = 114;
    pub const RUNNING: u8 = 179;
    pub const ERROR: u8 = 174;
}

const RESET: &str = "\x1b[0m";

/// `NO_COLOR=1` wins over `COLOR=1`; otherwise color only on a terminal.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    std::env::var("COLOR").is_ok_and(|v| v == "1") || std::io::stdout().is_terminal()
}

fn fg(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(fg(codes::HEADER))
        .usage(fg(codes::HEADER))
        .literal(fg(codes::LITERAL))
        .placeholder(fg(codes::PLACEHOLDER))
}

fn paint(code: u8, text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }
    format!("\x1b[38;5;{code}m{text}{RESET}")
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

fn status_code(status: JobStatus) -> u8 {
    match status {
        JobStatus::Pending => codes::MUTED,
        JobStatus::Running => codes::RUNNING,
        JobStatus::Complete => codes::COMPLETE,
        JobStatus::Error => codes::ERROR,
    }
}

/// Status word in its state color.
pub fn status(status: JobStatus) -> String {
    paint(status_code(status), &status.to_string())
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
