use crate::domain::ports::InputProvider;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::sync::Mutex;

/// Asks on the terminal. End of input counts as a dismissed prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinInput;

impl InputProvider for StdinInput {
    fn get_user_input(&self, prompt: &str) -> Option<String> {
        let mut stderr = std::io::stderr();
        if write!(stderr, "{} ", prompt).and_then(|_| stderr.flush()).is_err() {
            return None;
        }

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("failed to read input: {}", e);
                None
            }
        }
    }
}

/// Answers prompts from a fixed queue; once drained, every prompt is dismissed.
#[derive(Debug, Default)]
pub struct CannedInput {
    answers: Mutex<VecDeque<String>>,
}

impl CannedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
        }
    }

    pub fn dismissed() -> Self {
        Self::default()
    }
}

impl InputProvider for CannedInput {
    fn get_user_input(&self, prompt: &str) -> Option<String> {
        tracing::debug!("prompt answered from queue: {}", prompt);
        match self.answers.lock() {
            Ok(mut answers) => answers.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_input_answers_in_order_then_dismisses() {
        let input = CannedInput::new(["first", "second"]);
        assert_eq!(input.get_user_input("?").as_deref(), Some("first"));
        assert_eq!(input.get_user_input("?").as_deref(), Some("second"));
        assert_eq!(input.get_user_input("?"), None);
    }
}
