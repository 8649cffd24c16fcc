//! Plain text table rendering for command output

use std::io::{self, Write};

/// Renders rows as a boxed table:
///
/// ```text
/// +------+------+
/// | name | type |
/// +------+------+
/// | x    | bool |
/// +------+------+
/// ```
pub fn render<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
	let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
	for row in rows {
		for (width, cell) in widths.iter_mut().zip(row) {
			*width = (*width).max(cell.chars().count());
		}
	}

	let separator = widths.iter().fold(String::from("+"), |mut line, width| {
		line.push_str(&"-".repeat(width + 2));
		line.push('+');
		line
	});

	let write_row = |out: &mut W, cells: &mut dyn Iterator<Item = &str>| -> io::Result<()> {
		write!(out, "|")?;
		for (cell, width) in cells.zip(&widths) {
			let padding = width - cell.chars().count();
			write!(out, " {}{} |", cell, " ".repeat(padding))?;
		}
		writeln!(out)
	};

	writeln!(out, "{}", separator)?;
	write_row(out, &mut headers.iter().copied())?;
	writeln!(out, "{}", separator)?;
	for row in rows {
		write_row(out, &mut row.iter().map(String::as_str))?;
	}
	writeln!(out, "{}", separator)
}


// vim: ts=4
