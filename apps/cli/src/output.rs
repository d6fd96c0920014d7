//! Output formatting utilities

use crate::OutputFormat;
use console::style;
use pureget_types::ResultEnvelope;
use serde::Serialize;
use std::io;

/// Compact JSON with a space after `:` and `,`
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Render the envelope as a single JSON line
pub fn render_json(envelope: &ResultEnvelope) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    envelope.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Print the envelope in the specified format
pub fn print_envelope(envelope: &ResultEnvelope, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", render_json(envelope)?);
        }
        OutputFormat::Human => match envelope {
            ResultEnvelope::Success(result) => {
                println!(
                    "{} {} ({})",
                    style("✓").green().bold(),
                    style(&result.filename).cyan(),
                    result.file_type
                );
                println!("  Download: {}", result.download_url);
                println!("  Listing:  {}", result.app_url);
            }
            ResultEnvelope::Failure(failure) => {
                println!("{} {}", style("✗").red().bold(), style(&failure.error).red());
            }
        },
    }
    Ok(())
}
