//! Chat mode UI components.

use std::fmt::Display;
use std::io::{self, Write};

use super::session::SessionConfig;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header<W: Write + ?Sized>(out: &mut W, config: &SessionConfig) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        Style::header("Interactive CLI AI Chatbot"),
        Style::version(format!("v{VERSION}"))
    )?;
    writeln!(
        out,
        "{} {} {}",
        Style::label("Model:"),
        Style::value(&config.model),
        Style::secondary(format!("({})", config.provider_name))
    )?;
    writeln!(
        out,
        "{}",
        Style::secondary(format!(
            "Type {} to quit, {} to reset conversation.",
            Style::command("/exit"),
            Style::command("/clear")
        ))
    )?;
    writeln!(out)?;
    out.flush()
}

pub fn print_assistant_marker<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    write!(out, "\n{}", Style::assistant("Assistant > "))?;
    out.flush()
}

pub fn print_cleared<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", Style::warning("Conversation cleared."))?;
    out.flush()
}

pub fn print_rendered<W: Write + ?Sized>(out: &mut W, rendered: &str) -> io::Result<()> {
    writeln!(out, "\n{}", Style::secondary("── Rendered Markdown ──"))?;
    writeln!(out, "{rendered}")?;
    out.flush()
}

pub fn print_stream_error<W: Write + ?Sized>(err: &mut W, error: &impl Display) -> io::Result<()> {
    writeln!(
        err,
        "\n{} {}",
        Style::error("Error from model:"),
        single_line(&error.to_string())
    )?;
    err.flush()
}

pub fn print_render_warning<W: Write + ?Sized>(
    err: &mut W,
    error: &impl Display,
) -> io::Result<()> {
    writeln!(
        err,
        "{} {}",
        Style::warning("Could not render markdown:"),
        single_line(&error.to_string())
    )?;
    err.flush()
}

pub fn print_goodbye<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", Style::secondary("Goodbye!"))?;
    out.flush()
}

/// Collapses an error body onto one line.
fn single_line(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_collapses_newlines() {
        assert_eq!(
            single_line("status 500:\n{\n  \"error\": \"boom\"\n}"),
            "status 500: { \"error\": \"boom\" }"
        );
    }

    #[test]
    fn test_print_stream_error_is_one_line() {
        let mut err = Vec::new();
        print_stream_error(&mut err, &"first\nsecond").unwrap();

        let text = String::from_utf8(err).unwrap();
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("first second"));
    }

    #[test]
    fn test_print_cleared() {
        let mut out = Vec::new();
        print_cleared(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Conversation cleared."));
    }
}
