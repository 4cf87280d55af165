//! Terminal output: banner, status lines, and previews.

use std::env;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

fn paint(color: &str, text: &str) -> String {
    if env::var_os("NO_COLOR").is_some() {
        text.to_string()
    } else {
        format!("{color}{text}{RESET}")
    }
}

pub fn title(auto_confirm: bool) {
    println!("{}", paint(BOLD, "gch - git commit helper"));
    println!("{}", paint(BLUE, "Press Ctrl+C at any prompt to exit."));
    if auto_confirm {
        println!("{}", paint(YELLOW, "Running in auto-confirm mode"));
    }
    println!();
}

pub fn info(message: &str) {
    println!("{}", paint(BLUE, message));
}

pub fn success(message: &str) {
    println!("{}", paint(GREEN, &format!("✓ {message}")));
}

pub fn warn(message: &str) {
    println!("{}", paint(YELLOW, message));
}

pub fn error(message: &str) {
    eprintln!("{}", paint(RED, &format!("✗ {message}")));
}

/// Plain block of text such as a review or git log.
pub fn block(text: &str) {
    println!("\n{}\n", text.trim_end());
}

/// Commit preview; `generated` selects the "Proposed" vs "Modified" header.
pub fn commit_preview(message: &str, generated: bool) {
    let header = if generated {
        "Proposed commit:"
    } else {
        "Modified commit:"
    };
    println!("\n{}", paint(BOLD, header));
    for line in message.lines() {
        println!("  {}", paint(CYAN, line));
    }
    println!();
}

pub fn goodbye() {
    println!("{}", paint(BLUE, "Goodbye!"));
}
