use std::str::FromStr;

use crate::foundation::error::{ScrollstageError, ScrollstageResult};

/// Where to place a label, tween or child timeline inside a timeline.
///
/// Parsed from the usual placement strings:
///
/// - `"stage0In"`, `"stage0In+=0.25"`, `"stage0In-=1"`: relative to a label of the same timeline
/// - `">"`, `">+=1.5"`: relative to the end of the most recently added child
/// - `"<"`, `"<+=0.2"`: relative to the start of the most recently added child
/// - `"+=2"`, `"-=1"`: relative to the current end of the timeline
/// - `"3.5"`: absolute local time
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Position {
    /// Current end of the timeline.
    #[default]
    End,
    /// Absolute local time.
    At(f64),
    /// Offset from the current end.
    FromEnd(f64),
    /// Offset from a label.
    Label {
        /// Label name.
        name: String,
        /// Signed offset in seconds.
        offset: f64,
    },
    /// Offset from the end of the most recently added child.
    AfterPrevious(f64),
    /// Offset from the start of the most recently added child.
    WithPrevious(f64),
}

impl Position {
    /// Offset from a label.
    pub fn label(name: impl Into<String>, offset: f64) -> Self {
        Self::Label {
            name: name.into(),
            offset,
        }
    }
}

impl From<f64> for Position {
    fn from(t: f64) -> Self {
        Self::At(t)
    }
}

impl FromStr for Position {
    type Err = ScrollstageError;

    fn from_str(s: &str) -> ScrollstageResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::End);
        }

        if let Ok(t) = s.parse::<f64>() {
            return if t.is_finite() {
                Ok(Self::At(t))
            } else {
                Err(ScrollstageError::timeline(format!(
                    "position \"{s}\" is not finite"
                )))
            };
        }

        let (anchor, offset) = split_offset(s)?;
        match anchor {
            "" => Ok(Self::FromEnd(offset)),
            ">" => Ok(Self::AfterPrevious(offset)),
            "<" => Ok(Self::WithPrevious(offset)),
            name if name.contains(['<', '>', '=', ' ']) => Err(ScrollstageError::timeline(
                format!("invalid position expression \"{s}\""),
            )),
            name => Ok(Self::label(name, offset)),
        }
    }
}

fn split_offset(s: &str) -> ScrollstageResult<(&str, f64)> {
    let Some(idx) = s.find("+=").or_else(|| s.find("-=")) else {
        return Ok((s, 0.0));
    };

    let (anchor, rest) = s.split_at(idx);
    let sign = if rest.starts_with('-') { -1.0 } else { 1.0 };
    let amount: f64 = rest[2..].trim().parse().map_err(|_| {
        ScrollstageError::timeline(format!("invalid offset in position \"{s}\""))
    })?;
    if !amount.is_finite() {
        return Err(ScrollstageError::timeline(format!(
            "offset in position \"{s}\" is not finite"
        )));
    }
    Ok((anchor.trim(), sign * amount))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/position.rs"]
mod tests;
