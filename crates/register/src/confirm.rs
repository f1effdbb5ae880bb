//! Confirmation gate for destructive operations.

use std::io::{BufRead, Write};

/// Asks the operator to approve something irreversible.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Prompt on a writer and read a `y`/`yes`/`s`/`si` answer from a reader.
/// Anything else, including end of input, declines.
pub struct PromptConfirm<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> PromptConfirm<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<'_, R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{prompt} [y/N] ").and_then(|_| self.output.flush()).is_err() {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(
                answer.trim().to_lowercase().as_str(),
                "y" | "yes" | "s" | "si" | "sí"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answer: &str) -> (bool, String) {
        let mut input = answer.as_bytes();
        let mut output = Vec::new();
        let accepted = PromptConfirm::new(&mut input, &mut output).confirm("Clear everything?");
        (accepted, String::from_utf8(output).unwrap())
    }

    #[test]
    fn yes_answers_accept() {
        for answer in ["y\n", "YES\n", "s\n", " si \n", "Sí\n"] {
            assert!(ask(answer).0, "{answer:?}");
        }
    }

    #[test]
    fn anything_else_declines() {
        for answer in ["n\n", "\n", "", "maybe\n"] {
            assert!(!ask(answer).0, "{answer:?}");
        }
    }

    #[test]
    fn prompt_is_written() {
        assert_eq!(ask("n\n").1, "Clear everything? [y/N] ");
    }

    #[test]
    fn closures_are_gates() {
        let mut asked = Vec::new();
        let mut gate = |prompt: &str| {
            asked.push(prompt.to_string());
            true
        };
        assert!(gate.confirm("ok?"));
        assert_eq!(asked, vec!["ok?"]);
    }
}
