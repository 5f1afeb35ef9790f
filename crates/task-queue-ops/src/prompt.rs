use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// The only answer accepted as confirmation
pub const CONFIRM_ANSWER: &str = "yes";

/// Interactive operator dialogue over a line reader and a writer.
///
/// Reads block until a line arrives; end of input reads as an empty answer.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Prompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompt { input, output }
    }

    /// Print one line of operator output
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Ask a free-form question and return the trimmed answer
    pub fn ask(&mut self, question: impl Display) -> io::Result<String> {
        Ok(self.read_answer(question)?.trim().to_string())
    }

    /// Ask a yes/no question. Only the literal `yes` confirms; surrounding
    /// whitespace is part of the answer.
    pub fn confirm(&mut self, question: impl Display) -> io::Result<bool> {
        let answer = self.read_answer(format_args!("{} (yes/no)", question))?;
        Ok(answer.trim_end_matches(['\n', '\r']) == CONFIRM_ANSWER)
    }

    /// Raw line as typed, terminator included
    fn read_answer(&mut self, question: impl Display) -> io::Result<String> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer)
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}
