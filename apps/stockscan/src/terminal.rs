//! # Terminal Interface
//!
//! [`UserInterface`] over any line reader and writer. The binary wires it to
//! stdin/stdout; tests wire it to in-memory buffers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TerminalUi<R, W>                                                       │
//! │  ┌──────────────┐   parts()   ┌──────────────────────────────────────┐  │
//! │  │ input: R     │ ──────────► │ &mut R          ──► KeystrokeInput   │  │
//! │  │ console: W   │             │ &mut Console<W> ──► StatusDisplay    │  │
//! │  └──────────────┘             └──────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Splitting lets a keyboard-wedge scan read the same input stream while
//! its status lines go to the same console.

use std::io::{BufRead, Write};

use stockscan_core::{FieldSpec, FieldValues, StatusDisplay, UserInterface};
use tracing::warn;

/// Typed on its own line to abandon the new-item form.
pub const ABANDON_FORM: &str = ".";

/// Output half of the terminal.
#[derive(Debug)]
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Console { out }
    }

    /// Writes one line.
    pub fn line(&mut self, text: &str) {
        self.write(format_args!("{}\n", text));
    }

    /// Writes a prompt without a newline and flushes it.
    pub fn prompt(&mut self, text: &str) {
        self.write(format_args!("{}", text));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, args: std::fmt::Arguments<'_>) {
        let result = self.out.write_fmt(args).and_then(|_| self.out.flush());
        if let Err(err) = result {
            warn!(error = %err, "Console write failed");
        }
    }
}

impl<W: Write> StatusDisplay for Console<W> {
    fn display(&mut self, text: &str) {
        self.line(text);
    }
}

/// Line-oriented operator terminal.
#[derive(Debug)]
pub struct TerminalUi<R: BufRead, W: Write> {
    input: R,
    console: Console<W>,
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalUi {
            input,
            console: Console::new(output),
        }
    }

    pub fn console(&mut self) -> &mut Console<W> {
        &mut self.console
    }

    /// Borrows input and output separately.
    pub fn parts(&mut self) -> (&mut R, &mut Console<W>) {
        (&mut self.input, &mut self.console)
    }

    pub fn into_output(self) -> W {
        self.console.into_inner()
    }

    /// Prompts and reads one line, without the line ending.
    ///
    /// `None` on end of input or a read error.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.console.prompt(prompt);

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                warn!(error = %err, "Console read failed");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> StatusDisplay for TerminalUi<R, W> {
    fn display(&mut self, text: &str) {
        self.console.line(text);
    }
}

impl<R: BufRead, W: Write> UserInterface for TerminalUi<R, W> {
    fn prompt_fields(&mut self, schema: &[FieldSpec]) -> Option<FieldValues> {
        self.console
            .line(&format!("(enter {} on its own to abandon)", ABANDON_FORM));

        let mut values = FieldValues::new();
        for field in schema {
            let raw = self.read_line(&format!("{} [{}]: ", field.key, field.hint()))?;
            if raw.trim() == ABANDON_FORM {
                return None;
            }
            values.insert(field.key, raw);
        }
        Some(values)
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        matches!(
            self.read_line(&format!("{} [y/N]: ", prompt))
                .map(|answer| answer.trim().to_ascii_lowercase())
                .as_deref(),
            Some("y" | "yes")
        )
    }
}
