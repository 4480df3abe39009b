use std::collections::BTreeSet;
use std::fmt;

use super::{ParamValue, Result, ToolError};

const MAX_RANGE_SPAN: u32 = 65_536;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSelection {
    frames: BTreeSet<u32>,
}

impl FrameSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(count: u32) -> Self {
        (0..count).collect()
    }

    /// Parses `"0, 2, 5-7"`. An empty string is the empty selection.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut selection = Self::new();
        for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            match item.split_once('-') {
                Some((start, end)) => {
                    let start = parse_index(start)?;
                    let end = parse_index(end)?;
                    if start > end {
                        return Err(ToolError::InvalidFrames(format!(
                            "range `{item}` runs backwards"
                        )));
                    }
                    if end - start >= MAX_RANGE_SPAN {
                        return Err(ToolError::InvalidFrames(format!(
                            "range `{item}` spans more than {MAX_RANGE_SPAN} frames"
                        )));
                    }
                    selection.frames.extend(start..=end);
                }
                None => {
                    selection.frames.insert(parse_index(item)?);
                }
            }
        }
        Ok(selection)
    }

    pub fn toggle(&mut self, frame: u32) -> bool {
        if self.frames.remove(&frame) {
            false
        } else {
            self.frames.insert(frame);
            true
        }
    }

    pub fn select_all(&mut self, count: u32) {
        self.frames = (0..count).collect();
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn truncate(&mut self, count: u32) {
        self.frames.retain(|frame| *frame < count);
    }

    pub fn contains(&self, frame: u32) -> bool {
        self.frames.contains(&frame)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.frames.iter().copied()
    }
}

fn parse_index(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ToolError::InvalidFrames(format!("`{}` is not a frame index", raw.trim())))
}

impl FromIterator<u32> for FrameSelection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for FrameSelection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, frame) in self.frames.iter().enumerate() {
            if position > 0 {
                formatter.write_str(",")?;
            }
            write!(formatter, "{frame}")?;
        }
        Ok(())
    }
}

impl From<&FrameSelection> for ParamValue {
    fn from(selection: &FrameSelection) -> Self {
        ParamValue::Text(selection.to_string())
    }
}
