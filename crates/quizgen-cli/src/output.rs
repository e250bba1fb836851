use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the extraction summary before preview or generation.
pub fn print_extraction_summary(
    w: &mut dyn Write,
    file_name: &str,
    chars: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Extracting text from {}...", file_name)?;
    let msg = format!("Extracted {} characters", chars);
    if color.enabled() {
        writeln!(w, "{}", msg.dimmed())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print the extracted text without generating anything.
pub fn print_dry_run(
    w: &mut dyn Write,
    file_name: &str,
    text: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}\n", "DRY RUN:".bold().cyan(), file_name.bold())?;
    } else {
        writeln!(w, "DRY RUN: {}\n", file_name)?;
    }
    writeln!(w, "{}", text)?;
    Ok(())
}

/// Print the generation summary with artifact locations.
pub fn print_generation_summary(
    w: &mut dyn Write,
    requested: u32,
    blocks: usize,
    txt_path: &Path,
    pdf_path: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.bold())?;
        writeln!(w, "{}", "SUMMARY".bold())?;
        writeln!(w, "{}", sep.bold())?;
    } else {
        writeln!(w, "{}", sep)?;
        writeln!(w, "SUMMARY")?;
        writeln!(w, "{}", sep)?;
    }

    writeln!(w, "  Questions requested: {}", requested)?;
    if color.enabled() {
        writeln!(w, "  {} {}", "MCQ blocks written:".green(), blocks)?;
    } else {
        writeln!(w, "  MCQ blocks written: {}", blocks)?;
    }
    writeln!(w)?;
    writeln!(w, "  Text: {}", txt_path.display())?;
    writeln!(w, "  PDF:  {}", pdf_path.display())?;
    writeln!(w)?;
    Ok(())
}
