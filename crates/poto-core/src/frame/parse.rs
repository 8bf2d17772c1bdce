use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::consts::{FRAME_EXTENSION, TIMESTAMP_FORMAT};
use crate::error::{PotoError, Result};

use super::sequence::assign_sequence;
use super::{FileFrame, FrameKind, ImageSpec};

/// Everything a frame filename tells about the frame.
///
/// ```text
/// Light_LDN 1093_120.0s_Bin1_H_gain100_20240707-002348_-10.0C_0001.fit
/// Flat_810.0ms_Bin1_H_gain0_20240707-102251_-9.9C_0019.fit
/// Bias_1.0ms_Bin1_gain100_20240308-154938_-9.9C_0003.fit
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FrameName {
    pub spec: ImageSpec,
    pub file_name: String,
    pub extension: String,
    pub timestamp: NaiveDateTime,
    pub frame_index: u32,
    pub temperature_c: f64,
}

/// Parse a frame filename. Pure: no disk access.
pub fn parse_file_name(file_name: &str) -> Result<FrameName> {
    let fail = |reason: &str| PotoError::parse(file_name, reason);

    let stem = file_name
        .strip_suffix(FRAME_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .ok_or_else(|| fail("expected a .fit extension"))?;

    let tokens: Vec<&str> = stem.split('_').collect();
    if tokens.len() < 7 {
        return Err(fail("too few segments"));
    }
    let (head, tail) = tokens.split_at(tokens.len() - 4);
    let &[gain, timestamp, temperature, index] = tail else {
        return Err(fail("too few segments"));
    };

    // head: Kind [Label] Exposure Binning [Filter]
    if head.len() < 3 || head.len() > 5 {
        return Err(fail("unexpected number of segments before gain"));
    }
    let kind = FrameKind::from_name(head[0]).ok_or_else(|| fail("unknown frame kind"))?;
    let binning_at = (2..head.len().min(4))
        .find(|&i| is_binning(head[i]))
        .ok_or_else(|| fail("missing BinN segment"))?;
    let exposure = head[binning_at - 1];
    let filter = match &head[binning_at + 1..] {
        [] => None,
        [filter] => Some(*filter),
        _ => return Err(fail("too many segments between binning and gain")),
    };

    let exposure_ms = parse_exposure_ms(exposure).ok_or_else(|| fail("invalid exposure"))?;
    let gain = gain
        .strip_prefix("gain")
        .filter(|g| is_digits(g))
        .and_then(|g| g.parse::<u32>().ok())
        .ok_or_else(|| fail("invalid gain segment"))?;
    let timestamp = parse_timestamp(timestamp).ok_or_else(|| fail("invalid timestamp"))?;
    let temperature_c = parse_temperature(temperature).ok_or_else(|| fail("invalid temperature"))?;
    let frame_index = Some(index)
        .filter(|i| i.len() == 4 && is_digits(i))
        .and_then(|i| i.parse::<u32>().ok())
        .filter(|&i| i >= 1)
        .ok_or_else(|| fail("invalid frame index"))?;

    Ok(FrameName {
        spec: ImageSpec::new(kind, exposure, exposure_ms, head[binning_at], filter, gain),
        file_name: file_name.to_string(),
        extension: FRAME_EXTENSION.to_string(),
        timestamp,
        frame_index,
        temperature_c,
    })
}

/// Parse a filename and place it in the sequence started by `previous`.
pub fn parse_frame(
    file_name: &str,
    source_directory: PathBuf,
    previous: Option<&FileFrame>,
) -> Result<FileFrame> {
    let name = parse_file_name(file_name)?;
    let slot = assign_sequence(previous, &name);
    Ok(FileFrame::new(name, source_directory, slot))
}

/// `60.0s` → 60000, `810.0ms` → 810.
pub fn parse_exposure_ms(exposure: &str) -> Option<f64> {
    let (value, factor) = if let Some(v) = exposure.strip_suffix("ms") {
        (v, 1.0)
    } else {
        (exposure.strip_suffix('s')?, 1000.0)
    };
    if !is_decimal(value, None) {
        return None;
    }
    value.parse::<f64>().ok().map(|v| v * factor)
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let well_formed = text.len() == 15
        && text
            .char_indices()
            .all(|(i, c)| if i == 8 { c == '-' } else { c.is_ascii_digit() });
    if !well_formed {
        return None;
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

/// `-10.0C` → -10.0. Exactly one fractional digit.
fn parse_temperature(text: &str) -> Option<f64> {
    let value = text.strip_suffix('C')?;
    let unsigned = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    if !is_decimal(unsigned, Some(1)) {
        return None;
    }
    value.parse::<f64>().ok()
}

fn is_binning(token: &str) -> bool {
    token
        .strip_prefix("Bin")
        .is_some_and(|n| n.len() == 1 && is_digits(n))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// `digits.digits`, optionally with a fixed number of fractional digits.
fn is_decimal(text: &str, fraction_digits: Option<usize>) -> bool {
    match text.split_once('.') {
        Some((int, frac)) => {
            is_digits(int) && is_digits(frac) && fraction_digits.map_or(true, |n| frac.len() == n)
        }
        None => false,
    }
}
