use std::io::{self, Write};

use crate::cmos::decode::{Field, Report, Section};

const DUMP_ROW: usize = 8;
const LABEL_WIDTH: usize = 24;

/// Plain-text rendering: hex dump, then one block per section.
pub fn write_report(out: &mut impl Write, report: &Report) -> io::Result<()> {
    write_dump(out, &report.dump)?;
    for section in &report.sections {
        write_section(out, section)?;
    }
    out.flush()
}

fn write_dump(out: &mut impl Write, bytes: &[u8]) -> io::Result<()> {
    writeln!(out, "CMOS Memory Dump:")?;
    for (row, chunk) in bytes.chunks(DUMP_ROW).enumerate() {
        let (left, right) = chunk.split_at(chunk.len().min(DUMP_ROW / 2));
        write!(out, "  {:02x}:", row * DUMP_ROW)?;
        for b in left {
            write!(out, " {:02x}", b)?;
        }
        write!(out, " ")?;
        for b in right {
            write!(out, " {:02x}", b)?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}

fn write_section(out: &mut impl Write, section: &Section) -> io::Result<()> {
    writeln!(out, "{}", section.title)?;
    for field in &section.fields {
        write_field(out, field)?;
    }
    writeln!(out)
}

fn write_field(out: &mut impl Write, field: &Field) -> io::Result<()> {
    let label = format!("{}:", field.label);
    match &field.text {
        Some(text) => writeln!(out, "  {:<w$}{} ({})", label, field.raw, text, w = LABEL_WIDTH),
        None => writeln!(out, "  {:<w$}{}", label, field.raw, w = LABEL_WIDTH),
    }
}
