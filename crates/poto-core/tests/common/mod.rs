use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use poto_core::error::{PotoError, Result};
use poto_core::frame::{assign_sequences, parse_file_name, FileFrame};
use poto_core::prompt::Prompter;

/// In-memory prompter answering from queues.
///
/// An exhausted choice queue cancels. Confirmations default to yes and the
/// tolerance to 3.0 °C unless set.
#[derive(Default)]
pub struct ScriptedPrompter {
    choices: VecDeque<String>,
    confirms: VecDeque<bool>,
    tolerance: Option<f64>,
    /// Every `choose` call, in order: (subject, candidates).
    pub asked: Vec<(String, Vec<String>)>,
    pub confirmations: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, choice: &str) -> Self {
        self.choices.push_back(choice.to_string());
        self
    }

    pub fn confirm(mut self, yes: bool) -> Self {
        self.confirms.push_back(yes);
        self
    }

    pub fn tolerance(mut self, celsius: f64) -> Self {
        self.tolerance = Some(celsius);
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn choose(&mut self, subject: &str, candidates: &[String]) -> Result<String> {
        self.asked.push((subject.to_string(), candidates.to_vec()));
        self.choices.pop_front().ok_or(PotoError::Cancelled)
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.confirmations.push(message.to_string());
        Ok(self.confirms.pop_front().unwrap_or(true))
    }

    fn temperature_tolerance(&mut self, default: f64) -> Result<f64> {
        Ok(self.tolerance.unwrap_or(default))
    }
}

/// Cancels at the first question.
pub struct CancellingPrompter;

impl Prompter for CancellingPrompter {
    fn choose(&mut self, _subject: &str, _candidates: &[String]) -> Result<String> {
        Err(PotoError::Cancelled)
    }

    fn confirm(&mut self, _message: &str) -> Result<bool> {
        Err(PotoError::Cancelled)
    }

    fn temperature_tolerance(&mut self, _default: f64) -> Result<f64> {
        Err(PotoError::Cancelled)
    }
}

/// `{prefix}_{timestamp}_{temperature}_{index:04}.fit`
pub fn fit(prefix: &str, timestamp: &str, temperature: &str, index: u32) -> String {
    format!("{prefix}_{timestamp}_{temperature}_{index:04}.fit")
}

/// Parse `names` as one listing from `/input`.
pub fn frames(names: &[String]) -> Vec<FileFrame> {
    let parsed = names.iter().map(|name| {
        (
            parse_file_name(name).expect("fixture name parses"),
            PathBuf::from("/input"),
        )
    });
    assign_sequences(parsed)
}

/// Create an empty file at `dir/relative`, with its parents.
pub fn touch(dir: &Path, relative: &str) -> PathBuf {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().expect("file has a parent")).expect("create parents");
    fs::write(&path, b"mocked content").expect("write file");
    path
}

/// Write every file of `relatives` under `dir`.
pub fn write_dataset(dir: &Path, relatives: &[String]) {
    for relative in relatives {
        touch(dir, relative);
    }
}

pub const LIGHT_H: &str = "Light_M31_60.0s_Bin1_H_gain100";
pub const FLAT_H: &str = "Flat_810.0ms_Bin1_H_gain0";
pub const DARK_60: &str = "Dark_60.0s_Bin1_gain100";
pub const BIAS_0: &str = "Bias_1.0ms_Bin1_gain0";

/// One night: 3 lights, 3 flats, 3 darks, 3 biases, all close in temperature.
pub fn single_night() -> Vec<String> {
    let mut names = Vec::new();
    for i in 1..=3 {
        names.push(format!("Light/{}", fit(LIGHT_H, "20240707-002348", "-10.0C", i)));
    }
    for i in 1..=3 {
        names.push(format!("Flat/{}", fit(FLAT_H, "20240707-102251", "-9.9C", i)));
    }
    for i in 1..=3 {
        names.push(format!("Dark/{}", fit(DARK_60, "20240708-120000", "-10.5C", i)));
    }
    for i in 1..=3 {
        names.push(format!("Bias/{}", fit(BIAS_0, "20240708-130000", "-10.2C", i)));
    }
    names
}
