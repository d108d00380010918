//! Line sources for the interactive loop.
//!
//! The shell only asks for "the next line, or end of input". A terminal with
//! line editing, a script file, and an in-memory transcript all fit behind
//! [`LineSource`].

use std::io::BufRead;
use std::path::PathBuf;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::SdbResult;

pub trait LineSource {
    /// The next input line without its terminator, or `None` at end of input.
    fn next_line(&mut self) -> Option<String>;
}

/// Interactive terminal backed by `rustyline`.
pub struct Terminal {
    editor: DefaultEditor,
    prompt: String,
    history_file: Option<PathBuf>,
}

impl Terminal {
    pub fn new(prompt: &str, history_size: usize, history_file: Option<PathBuf>) -> SdbResult<Self> {
        let config = rustyline::Config::builder()
            .max_history_size(history_size)?
            .auto_add_history(false)
            .build();
        let mut editor = DefaultEditor::with_config(config)?;

        if let Some(path) = &history_file {
            // A missing history file is normal on first use.
            if let Err(e) = editor.load_history(path) {
                debug!("no history loaded from {}: {e}", path.display());
            }
        }

        Ok(Self {
            editor,
            prompt: prompt.into(),
            history_file,
        })
    }
}

impl LineSource for Terminal {
    fn next_line(&mut self) -> Option<String> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                if !line.is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        warn!("failed to record history: {e}");
                    }
                }
                Some(line)
            }
            // Ctrl-C abandons the current line, not the session.
            Err(ReadlineError::Interrupted) => Some(String::new()),
            Err(ReadlineError::Eof) => None,
            Err(e) => {
                error!("failed to read line: {e}");
                None
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                warn!("failed to save history to {}: {e}", path.display());
            }
        }
    }
}

/// Lines replayed from any buffered reader: a script file or a test fixture.
pub struct Script<R> {
    reader: R,
}

impl<R: BufRead> Script<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<'a> Script<&'a [u8]> {
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl<R: BufRead> LineSource for Script<R> {
    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let len = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(len);
                Some(line)
            }
            Err(e) => {
                error!("failed to read script line: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_yields_lines_then_end() {
        let mut src = Script::from_text("si 3\r\n\nq");
        assert_eq!(src.next_line().as_deref(), Some("si 3"));
        assert_eq!(src.next_line().as_deref(), Some(""));
        assert_eq!(src.next_line().as_deref(), Some("q"));
        assert_eq!(src.next_line(), None);
        assert_eq!(src.next_line(), None);
    }
}
