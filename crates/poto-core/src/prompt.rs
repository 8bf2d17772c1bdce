use crate::error::{PotoError, Result};

/// Operator decisions the planning steps cannot take alone.
///
/// Returning `Err(PotoError::Cancelled)` from any method stops the run before
/// anything is written to the project directory.
pub trait Prompter {
    /// Pick one of `candidates`. The answer must be one of them verbatim.
    fn choose(&mut self, subject: &str, candidates: &[String]) -> Result<String>;

    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Dark temperature tolerance in °C. `default` is the value to propose.
    fn temperature_tolerance(&mut self, default: f64) -> Result<f64>;
}

/// Ask `prompter` to choose and reject answers outside of `candidates`.
pub fn choose_one(
    prompter: &mut dyn Prompter,
    subject: &str,
    candidates: &[String],
) -> Result<String> {
    let choice = prompter.choose(subject, candidates)?;
    if candidates.contains(&choice) {
        Ok(choice)
    } else {
        Err(PotoError::InvalidChoice {
            subject: subject.to_string(),
            choice,
        })
    }
}
