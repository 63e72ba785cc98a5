//! The value mapping supplied at render time.
//!
//! A [`ValueMap`] is assembled in layers, later layers winning:
//! manifest defaults (opt-in), a `--values` JSON file, repeated `--set`
//! flags, then interactive answers. The renderer receives one finished map.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, SkelError};

/// An ordered token → value mapping. Extra keys are harmless; the renderer
/// only looks up the tokens the set actually references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueMap {
    inner: BTreeMap<String, String>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `--values` file: a flat JSON object whose values are all strings.
    /// Any other JSON shape is a hard error naming the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let parsed: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| SkelError::ValuesParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        let object = parsed.as_object().ok_or_else(|| SkelError::ValuesShape {
            path: path.to_path_buf(),
        })?;

        let mut map = Self::new();
        for (key, value) in object {
            let text = value.as_str().ok_or_else(|| SkelError::ValuesShape {
                path: path.to_path_buf(),
            })?;
            map.set(key, text);
        }
        Ok(map)
    }

    pub fn set(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(token.into(), value.into());
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.inner.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.inner.contains_key(token)
    }

    /// Overlay `other` on top of this map; entries in `other` win.
    pub fn merge(&mut self, other: ValueMap) {
        self.inner.extend(other.inner);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

/// Split a `--set Token=Value` argument at the first `=`.
///
/// A missing `=` or an empty token name is a usage error. An empty value
/// is allowed (some tokens, like `Author`, legitimately render to nothing).
pub fn parse_assignment(arg: &str) -> Result<(String, String)> {
    let (token, value) = arg
        .split_once('=')
        .ok_or_else(|| SkelError::InvalidAssignment(arg.to_string()))?;
    if token.is_empty() {
        return Err(SkelError::InvalidAssignment(arg.to_string()));
    }
    Ok((token.to_string(), value.to_string()))
}
