//! Yes/no confirmation on the terminal.

use std::io::{self, BufRead, Write};

/// Ask `question` on stdout and read the answer from stdin. Anything other
/// than `y`/`yes` (case-insensitive) counts as no, including end of input.
pub fn confirm(question: &str) -> io::Result<bool> {
  let stdin = io::stdin();
  let stdout = io::stdout();
  confirm_with(&mut stdin.lock(), &mut stdout.lock(), question)
}

pub fn confirm_with(
  input: &mut impl BufRead,
  output: &mut impl Write,
  question: &str,
) -> io::Result<bool> {
  write!(output, "{question} [y/N] ")?;
  output.flush()?;

  let mut line = String::new();
  input.read_line(&mut line)?;
  Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
  matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
