use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::consts::TIMESTAMP_FORMAT;

use super::{FileFrame, FrameName};

/// Sequence membership computed for a freshly parsed frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceSlot {
    pub sequence_id: String,
    pub sequence_position: u32,
}

/// `20240626-010850`.
pub fn format_sequence_id(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Decide whether `current` continues the sequence of `previous`.
///
/// A frame continues a sequence when it has the same set key and a strictly
/// greater frame index than the frame before it in the listing. Anything else
/// (another set, an index that went back) opens a new sequence named after
/// the current frame's timestamp.
pub fn assign_sequence(previous: Option<&FileFrame>, current: &FrameName) -> SequenceSlot {
    let sequence_id = match previous {
        Some(prev)
            if prev.spec.set_key == current.spec.set_key
                && prev.frame_index < current.frame_index =>
        {
            prev.sequence_id.clone()
        }
        _ => format_sequence_id(&current.timestamp),
    };
    SequenceSlot {
        sequence_id,
        sequence_position: current.frame_index,
    }
}

/// Fold an ordered listing of parsed names into frames, one pass, in order.
pub fn assign_sequences<I>(names: I) -> Vec<FileFrame>
where
    I: IntoIterator<Item = (FrameName, PathBuf)>,
{
    names
        .into_iter()
        .fold(Vec::new(), |mut frames, (name, source_directory)| {
            let slot = assign_sequence(frames.last(), &name);
            frames.push(FileFrame::new(name, source_directory, slot));
            frames
        })
}
