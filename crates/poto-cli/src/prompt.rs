use console::{Style, Term};
use poto_core::consts::MIN_TEMPERATURE_TOLERANCE_C;
use poto_core::error::{PotoError, Result};
use poto_core::prompt::Prompter;

/// Line-based prompts on stderr. An empty answer to a choice cancels the run.
pub struct TermPrompter {
    term: Term,
    question: Style,
    hint: Style,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            question: Style::new().cyan().bold(),
            hint: Style::new().dim(),
        }
    }

    fn ask(&self, prompt: &str) -> Result<String> {
        self.term.write_str(prompt)?;
        let answer = self.term.read_line()?;
        Ok(answer.trim().to_string())
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn choose(&mut self, subject: &str, candidates: &[String]) -> Result<String> {
        self.term.write_line("")?;
        self.term
            .write_line(&format!("{}", self.question.apply_to(subject)))?;
        for (i, candidate) in candidates.iter().enumerate() {
            self.term.write_line(&format!("  {}. {}", i + 1, candidate))?;
        }

        loop {
            let answer = self.ask(&format!(
                "{} ",
                self.hint
                    .apply_to(format!("Choice [1-{}], empty to abort:", candidates.len()))
            ))?;
            if answer.is_empty() {
                return Err(PotoError::Cancelled);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=candidates.len()).contains(&n) => return Ok(candidates[n - 1].clone()),
                _ => self.term.write_line(&format!("{answer:?} is not a valid choice"))?,
            }
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        loop {
            let answer = self.ask(&format!(
                "{} {} ",
                self.question.apply_to(message),
                self.hint.apply_to("[Y/n]")
            ))?;
            match answer.to_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.term.write_line("Please answer y or n")?,
            }
        }
    }

    fn temperature_tolerance(&mut self, default: f64) -> Result<f64> {
        loop {
            let answer = self.ask(&format!(
                "{} {} ",
                self.question
                    .apply_to("Temperature tolerance for lights-darks matching, in °C"),
                self.hint.apply_to(format!("[{default}]"))
            ))?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<f64>() {
                Ok(value) if value >= MIN_TEMPERATURE_TOLERANCE_C => return Ok(value),
                _ => self.term.write_line(&format!(
                    "Please enter a number >= {MIN_TEMPERATURE_TOLERANCE_C}"
                ))?,
            }
        }
    }
}
