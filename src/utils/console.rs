use colored::Colorize;
use std::fmt::Display;

/// Step banner, printed before each provisioning action
pub fn step(message: impl Display) {
    println!("{}", format!(" {}", message).blue());
}

/// Positive confirmation
pub fn success(message: impl Display) {
    println!("{}", format!(" {}", message).green());
}

/// Tolerated failure, execution continues
pub fn warning(message: impl Display) {
    println!("{}", format!(" {}", message).yellow());
}

/// Fatal or in-loop error, always on stderr
pub fn error(message: impl Display) {
    eprintln!("{}", format!(" {}", message).red());
}

/// Elapsed time of a test request
pub fn timing(label: &str, seconds: f64) {
    println!("{} {:.2} seconds", format!(" {} in", label).green(), seconds);
}
