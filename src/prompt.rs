//! Line-based user prompts.
//!
//! `None` from a prompt means there is nobody to ask (input closed), which
//! callers treat as "use the default" rather than as an error.

use std::io::{BufRead, Write};

/// Source of user answers.
pub trait Prompter {
    /// Print `question` and read one trimmed line. `None` on end of input.
    fn ask_line(&mut self, question: &str) -> Option<String>;

    /// Yes/no question. `None` on end of input.
    fn confirm(&mut self, question: &str) -> Option<bool> {
        self.ask_line(&format!("{question} [y/n]: "))
            .map(|answer| is_yes(&answer))
    }
}

/// Accepts `y` and `yes` in any case.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// [`Prompter`] over any reader/writer pair (stdin/stdout in the CLI).
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LinePrompter<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask_line(&mut self, question: &str) -> Option<String> {
        // A broken stdout only loses the question text; the answer still counts.
        let _ = write!(self.output, "{question}");
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                let _ = writeln!(self.output);
                None
            }
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                log::debug!("reading answer failed: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> LinePrompter<&[u8], Vec<u8>> {
        LinePrompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn reads_trimmed_lines_in_order() {
        let mut p = prompter("  nlp  \n2\n");
        assert_eq!(p.ask_line("Keyword: ").as_deref(), Some("nlp"));
        assert_eq!(p.ask_line("Choice: ").as_deref(), Some("2"));
        assert_eq!(p.ask_line("More: "), None);

        let shown = String::from_utf8(p.into_output()).expect("utf8");
        assert!(shown.starts_with("Keyword: Choice: More: "));
    }

    #[test]
    fn confirm_accepts_yes_variants() {
        let mut p = prompter("Y\nyes\nno\n\n");
        assert_eq!(p.confirm("Continue?"), Some(true));
        assert_eq!(p.confirm("Continue?"), Some(true));
        assert_eq!(p.confirm("Continue?"), Some(false));
        assert_eq!(p.confirm("Continue?"), Some(false));
        assert_eq!(p.confirm("Continue?"), None);
    }
}
