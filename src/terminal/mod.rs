//! Everything the user sees or types goes through [Terminal], so flows can be exercised without
//! a console.

use std::io::{self, BufRead, IsTerminal, Stdout, Write};

use ansi_term::{Colour, Style};
use anyhow::{anyhow, bail, Result};
use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::report::{table::report_table, Report};

#[cfg_attr(test, mockall::automock)]
pub trait Terminal {
    fn heading(&mut self, text: &str) -> Result<()>;

    /// Short status line. Text between backticks is highlighted.
    fn note(&mut self, text: &str) -> Result<()>;

    fn list_item(&mut self, text: &str) -> Result<()>;

    /// Shows `label` and reads one line of input, without the line break.
    fn prompt(&mut self, label: &str) -> Result<String>;

    /// Replaces whatever the previous `redraw` put on the current line.
    fn redraw(&mut self, text: &str) -> Result<()>;

    /// Keeps the redrawn line and moves on to the next one.
    fn finish_line(&mut self) -> Result<()>;

    fn print_report(&mut self, report: &Report) -> Result<()>;
}

type LineReader = Box<dyn FnMut(&mut String) -> io::Result<usize>>;

/// [Terminal] writing to any output and reading lines from any input.
pub struct ConsoleTerminal<W: Write> {
    out: W,
    read_line: LineReader,
    colors: bool,
}

impl ConsoleTerminal<Stdout> {
    /// Terminal over the process's stdin and stdout. Stdin is only locked while a line is read,
    /// so other readers of stdin keep working.
    pub fn stdio() -> Self {
        let colors = io::stdout().is_terminal();
        Self {
            out: io::stdout(),
            read_line: Box::new(|buffer| io::stdin().read_line(buffer)),
            colors,
        }
    }
}

impl<W: Write> ConsoleTerminal<W> {
    pub fn new(out: W, mut input: impl BufRead + 'static) -> Self {
        Self {
            out,
            read_line: Box::new(move |buffer| input.read_line(buffer)),
            colors: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.colors {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn highlight_code(&self, text: &str) -> String {
        text.split('`')
            .enumerate()
            .map(|(i, part)| {
                if i % 2 == 1 {
                    self.paint(Colour::Cyan.normal(), part)
                } else {
                    part.to_string()
                }
            })
            .collect()
    }
}

impl<W: Write> Terminal for ConsoleTerminal<W> {
    fn heading(&mut self, text: &str) -> Result<()> {
        let text = self.paint(Style::new().bold().underline(), text);
        writeln!(self.out, "{text}\n")?;
        Ok(())
    }

    fn note(&mut self, text: &str) -> Result<()> {
        let text = self.highlight_code(text);
        let bar = self.paint(Colour::Purple.normal(), "▌");
        writeln!(self.out, "{bar} {text}")?;
        Ok(())
    }

    fn list_item(&mut self, text: &str) -> Result<()> {
        let bullet = self.paint(Colour::Yellow.bold(), "•");
        writeln!(self.out, " {bullet} {text}")?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if (self.read_line)(&mut line)? == 0 {
            bail!("Input closed while waiting for {:?}", label.trim());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn redraw(&mut self, text: &str) -> Result<()> {
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn finish_line(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    fn print_report(&mut self, report: &Report) -> Result<()> {
        let title = self.paint(Style::new().italic(), &report.title());
        writeln!(self.out, "{title}")?;
        let table = report_table(report);
        if self.colors {
            self.out.flush()?;
            table
                .print_tty(false)
                .map_err(|e| anyhow!("Failed to print report: {e}"))?;
        } else {
            table.print(&mut self.out)?;
        }
        Ok(())
    }
}
