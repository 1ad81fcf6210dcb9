//! Output formatting.

pub mod pretty;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Renders `value` as compact JSON, or through `pretty` for humans.
pub fn render<T, F>(value: &T, format: OutputFormat, pretty: F) -> String
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Pretty => pretty(value),
    }
}

/// Prints [`render`]'s result on stdout.
pub fn emit<T, F>(value: &T, format: OutputFormat, pretty: F)
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    println!("{}", render(value, format, pretty));
}
