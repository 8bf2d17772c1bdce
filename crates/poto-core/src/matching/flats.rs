use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{PotoError, Result};
use crate::frame::{distinct, sequence_scoped_id, FileFrame};
use crate::prompt::{choose_one, Prompter};

use super::matches;

/// One sequence of one set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceRef {
    pub set_key: String,
    pub sequence_id: String,
}

impl SequenceRef {
    pub fn of(frame: &FileFrame) -> Self {
        Self {
            set_key: frame.spec.set_key.clone(),
            sequence_id: frame.sequence_id.clone(),
        }
    }

    pub fn contains(&self, frame: &FileFrame) -> bool {
        frame.spec.set_key == self.set_key && frame.sequence_id == self.sequence_id
    }
}

impl fmt::Display for SequenceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&sequence_scoped_id(&self.set_key, &self.sequence_id))
    }
}

/// A light sequence paired with the flat sequence that calibrates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightFlatMatch {
    pub light: SequenceRef,
    pub flat: SequenceRef,
    /// The operator picked the flat sequence among several candidates.
    pub is_manual_match: bool,
}

impl LightFlatMatch {
    /// Light set key for automatic matches, `{set_key}__{sequence_id}` for
    /// manual ones so that each disambiguated light sequence stays separate.
    pub fn layer_set_id(&self) -> String {
        if self.is_manual_match {
            self.light.to_string()
        } else {
            self.light.set_key.clone()
        }
    }
}

/// Keep only the flats that at least one light can use.
pub fn preselect_flats(flats: &[FileFrame], lights: &[FileFrame]) -> Vec<FileFrame> {
    let (kept, skipped): (Vec<&FileFrame>, Vec<&FileFrame>) = flats
        .iter()
        .partition(|flat| lights.iter().any(|light| matches(&light.spec, &flat.spec)));

    for sequence in distinct(skipped.iter().map(|f| SequenceRef::of(f))) {
        warn!(
            "No matching light for {} (seq {}). Skipping.",
            sequence.set_key, sequence.sequence_id
        );
    }

    info!(
        "Pre-selected {} flats ({} sequences) that match {} lights ({} sequences)",
        kept.len(),
        distinct(kept.iter().map(|f| SequenceRef::of(f))).len(),
        lights.len(),
        distinct(lights.iter().map(SequenceRef::of)).len(),
    );

    kept.into_iter().cloned().collect()
}

/// Pair every light sequence with one flat sequence.
///
/// `flats` must come from [`preselect_flats`]. Flat sets are visited in scan
/// order. When the flats a light can use span a single sequence the pairing is
/// automatic. Several sequences usually mean the optical train changed between
/// nights, so the operator is asked once per light sequence, in ascending
/// sequence order. Light sequences resolved by an earlier flat set are not
/// asked again.
pub fn match_lights_to_flats(
    flats: &[FileFrame],
    lights: &[FileFrame],
    prompter: &mut dyn Prompter,
) -> Result<Vec<LightFlatMatch>> {
    let mut resolved: Vec<LightFlatMatch> = Vec::new();
    let mut intro_shown = false;

    for set_key in distinct(flats.iter().map(FileFrame::set_key)) {
        let Some(flat) = flats.iter().find(|f| f.set_key() == set_key) else {
            continue;
        };

        let candidates: Vec<SequenceRef> = distinct(
            flats
                .iter()
                .filter(|f| f.spec.binning == flat.spec.binning && f.spec.filter == flat.spec.filter)
                .map(SequenceRef::of),
        );
        if candidates.is_empty() {
            return Err(PotoError::NoMatch(format!(
                "no sequences found for flat {set_key}"
            )));
        }

        let mut concerned: Vec<SequenceRef> = distinct(
            lights
                .iter()
                .filter(|light| matches(&light.spec, &flat.spec))
                .map(SequenceRef::of),
        );
        concerned.retain(|light| !resolved.iter().any(|m| &m.light == light));

        if let [only] = candidates.as_slice() {
            resolved.extend(concerned.into_iter().map(|light| LightFlatMatch {
                light,
                flat: only.clone(),
                is_manual_match: false,
            }));
            continue;
        }

        info!(
            "Several sequences of flats are compatible with {} {}: {}",
            flat.spec.binning,
            flat.spec.filter.as_deref().unwrap_or("(no filter)"),
            candidates.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );
        if !intro_shown {
            debug!(
                "Multiple flat sequences of one kind usually mean several nights with the \
                 optical train re-collimated or cleaned in between. Each light sequence is \
                 tagged with its flat sequence."
            );
            intro_shown = true;
        }

        concerned.sort_by(|a, b| a.sequence_id.cmp(&b.sequence_id));
        let labels: Vec<String> = candidates.iter().map(ToString::to_string).collect();
        for light in concerned {
            let subject = format!("{} {} will use", light.set_key, light.sequence_id);
            let answer = choose_one(prompter, &subject, &labels)?;
            let Some(index) = labels.iter().position(|label| *label == answer) else {
                return Err(PotoError::InvalidChoice {
                    subject,
                    choice: answer,
                });
            };
            resolved.push(LightFlatMatch {
                light,
                flat: candidates[index].clone(),
                is_manual_match: true,
            });
        }
    }

    info!("Light - Flat matching summary:");
    for pair in &resolved {
        debug!(
            "- {} {} -> {} {}{}",
            pair.light.set_key,
            pair.light.sequence_id,
            pair.flat.set_key,
            pair.flat.sequence_id,
            if pair.is_manual_match { " (manual)" } else { "" }
        );
    }

    Ok(resolved)
}
