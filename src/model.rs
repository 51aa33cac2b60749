//! Result model: nail positions and the traversal path returned by the transformation service.

use std::io::Read;

use crate::foundation::error::ThreadlineResult;

/// Placeholder for a path entry that could not be read as a nail index.
pub const INVALID_INDEX: i64 = -1;

/// A peg on the board, in logical board coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Nail {
    /// Horizontal logical coordinate.
    pub x: f64,
    /// Vertical logical coordinate.
    pub y: f64,
}

impl Nail {
    /// Construct a nail at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One chord between two consecutive path entries, as validated nail indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Index into [`ArtResult::nails`] of the chord start.
    pub from: usize,
    /// Index into [`ArtResult::nails`] of the chord end.
    pub to: usize,
}

/// String-art result: nails plus the ordered path of nail indices.
///
/// The path is kept exactly as received (signed, possibly out of range). Invalid entries are
/// dropped per chord when segments are built, never at decode time, so one bad index cannot
/// block the rest of the drawing.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArtResult {
    /// Nail positions; the index is the nail's identity.
    pub nails: Vec<Nail>,
    /// Ordered nail indices; consecutive pairs are chords.
    ///
    /// Entries that are not integers in `i64` range (fractions, huge numbers, strings, `null`)
    /// decode as [`INVALID_INDEX`] so they are skipped like any other bad index.
    #[serde(deserialize_with = "lenient_path")]
    pub path: Vec<i64>,
}

impl ArtResult {
    /// Construct a result from already-decoded parts.
    pub fn new(nails: Vec<Nail>, path: Vec<i64>) -> Self {
        Self { nails, path }
    }

    /// Decode a JSON payload `{ "nails": [{"x":..,"y":..}], "path": [..] }`.
    pub fn from_json_slice(bytes: &[u8]) -> ThreadlineResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Decode a JSON payload from a reader.
    pub fn from_reader(r: impl Read) -> ThreadlineResult<Self> {
        Ok(serde_json::from_reader(r)?)
    }

    /// `true` when there is nothing to draw (no nails or no path).
    pub fn is_empty(&self) -> bool {
        self.nails.is_empty() || self.path.is_empty()
    }

    /// Number of path entries; the upper bound of the reveal count.
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// Resolve a raw path entry into a nail index, if it addresses an existing nail.
    pub fn nail_index(&self, raw: i64) -> Option<usize> {
        usize::try_from(raw).ok().filter(|&i| i < self.nails.len())
    }

    /// Nail at `index`, if any.
    pub fn nail(&self, index: usize) -> Option<Nail> {
        self.nails.get(index).copied()
    }

    /// Number of path entries that do not address a nail.
    pub fn invalid_indices(&self) -> usize {
        self.path
            .iter()
            .filter(|&&raw| self.nail_index(raw).is_none())
            .count()
    }

    /// Chords revealed by the first `reveal` path entries, skipping any pair with an invalid
    /// endpoint.
    ///
    /// Yields at most `max(0, reveal - 1)` segments; `reveal` beyond the path length is clamped.
    pub fn segments(&self, reveal: usize) -> impl Iterator<Item = Segment> + '_ {
        let end = reveal.min(self.path.len());
        self.path[..end].windows(2).filter_map(|w| {
            Some(Segment {
                from: self.nail_index(w[0])?,
                to: self.nail_index(w[1])?,
            })
        })
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Index(i64),
    Other(serde::de::IgnoredAny),
}

fn lenient_path<'de, D>(de: D) -> Result<Vec<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<RawIndex> = serde::Deserialize::deserialize(de)?;
    Ok(raw
        .into_iter()
        .map(|r| match r {
            RawIndex::Index(i) => i,
            RawIndex::Other(_) => INVALID_INDEX,
        })
        .collect())
}

#[cfg(test)]
#[path = "../tests/unit/model/model.rs"]
mod tests;
