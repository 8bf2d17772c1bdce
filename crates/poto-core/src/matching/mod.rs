pub mod calibration;
pub mod flats;

use crate::frame::{FileFrame, FrameKind, ImageSpec};

pub use calibration::{select_biases, select_darks, MatchWarning, TemperatureTolerance};
pub use flats::{match_lights_to_flats, preselect_flats, LightFlatMatch, SequenceRef};

/// Can `b` calibrate `a`?
///
/// | a     | b    | required equal             |
/// |-------|------|----------------------------|
/// | Light | Dark | exposure, binning, gain    |
/// | Light | Flat | binning, filter            |
/// | Flat  | Bias | binning, gain              |
///
/// Darks ignore the filter. Flats ignore exposure and gain, their optimal
/// values differ from the lights'. Biases ignore filter and exposure.
pub fn matches(a: &ImageSpec, b: &ImageSpec) -> bool {
    use FrameKind::*;

    match (a.kind, b.kind) {
        (Light, Dark) => a.exposure == b.exposure && a.binning == b.binning && a.gain == b.gain,
        (Light, Flat) => a.binning == b.binning && a.filter == b.filter,
        (Flat, Bias) => a.binning == b.binning && a.gain == b.gain,
        (Light | Dark | Bias | Flat, _) => false,
    }
}

/// Scanned frames split by kind, each list keeping scan order.
#[derive(Clone, Debug, Default)]
pub struct FramesByKind {
    pub lights: Vec<FileFrame>,
    pub flats: Vec<FileFrame>,
    pub darks: Vec<FileFrame>,
    pub biases: Vec<FileFrame>,
}

impl FramesByKind {
    pub fn partition(frames: impl IntoIterator<Item = FileFrame>) -> Self {
        let mut out = Self::default();
        for frame in frames {
            match frame.kind() {
                FrameKind::Light => out.lights.push(frame),
                FrameKind::Flat => out.flats.push(frame),
                FrameKind::Dark => out.darks.push(frame),
                FrameKind::Bias => out.biases.push(frame),
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.lights.len() + self.flats.len() + self.darks.len() + self.biases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
