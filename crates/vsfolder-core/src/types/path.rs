//! Inventory path types.
//!
//! [`InventoryPath`] is an absolute, slash-delimited location in the
//! inventory tree (`/dc1/vm/dev/team-a`). [`FolderPath`] is a validated path
//! relative to a datacenter's VM folder (`dev/team-a`); the empty
//! `FolderPath` denotes the VM folder itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Maximum length of a single inventory object name.
pub const MAX_NAME_LEN: usize = 80;

/// Name of the per-datacenter folder that holds virtual machines.
pub const VM_FOLDER: &str = "vm";

/// An absolute inventory path.
///
/// Always starts with `/`, never ends with `/` (except the root itself) and
/// never contains empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct InventoryPath(String);

impl InventoryPath {
    /// The inventory root (`/`).
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Build a path from raw text, collapsing duplicate and trailing slashes.
    pub fn new(raw: &str) -> Self {
        let joined = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self(format!("/{joined}"))
    }

    /// Return the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the inventory root.
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Append a single object name.
    pub fn join(&self, name: &str) -> Self {
        if self.is_root() {
            Self(format!("/{name}"))
        } else {
            Self(format!("{}/{name}", self.0))
        }
    }

    /// Append every segment of a relative folder path.
    pub fn join_folder_path(&self, path: &FolderPath) -> Self {
        path.segments()
            .iter()
            .fold(self.clone(), |acc, segment| acc.join(segment))
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) | None => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
        }
    }

    /// The final segment, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.0.rsplit('/').next()
    }

    /// Iterate over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }
}

impl fmt::Display for InventoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for InventoryPath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for InventoryPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<InventoryPath> for String {
    fn from(path: InventoryPath) -> String {
        path.0
    }
}

/// A folder path relative to a datacenter's VM folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FolderPath {
    segments: Vec<String>,
}

impl FolderPath {
    /// The VM folder itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse and validate a relative folder path.
    ///
    /// Trailing slashes are trimmed. Leading slashes, empty segments, `.`,
    /// `..` and names longer than [`MAX_NAME_LEN`] are rejected. The empty
    /// string parses to [`FolderPath::root`].
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        if trimmed.starts_with('/') {
            return Err(AppError::validation(format!(
                "Folder path '{raw}' must be relative to the datacenter VM folder"
            )));
        }

        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            match segment {
                "" => {
                    return Err(AppError::validation(format!(
                        "Folder path '{raw}' contains an empty segment"
                    )));
                }
                "." | ".." => {
                    return Err(AppError::validation(format!(
                        "Folder path '{raw}' contains a relative segment '{segment}'"
                    )));
                }
                s if s.chars().count() > MAX_NAME_LEN => {
                    return Err(AppError::validation(format!(
                        "Folder name '{s}' exceeds {MAX_NAME_LEN} characters"
                    )));
                }
                s => segments.push(s.to_string()),
            }
        }
        Ok(Self { segments })
    }

    /// The path segments, root-most first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Whether this denotes the VM folder itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, or `None` for the VM folder.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The parent path. The parent of a single-segment path is the VM
    /// folder; the VM folder has no parent.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            None
        } else {
            Some(self.prefix(self.depth() - 1))
        }
    }

    /// The first `depth` segments (clamped to this path's depth).
    pub fn prefix(&self, depth: usize) -> Self {
        let depth = depth.min(self.segments.len());
        Self {
            segments: self.segments[..depth].to_vec(),
        }
    }

    /// Whether `other` is a component-wise prefix of this path.
    pub fn starts_with(&self, other: &FolderPath) -> bool {
        self.segments.starts_with(&other.segments)
    }

    /// Append a single segment.
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for FolderPath {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FolderPath {
    type Error = AppError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<FolderPath> for String {
    fn from(path: FolderPath) -> String {
        path.to_string()
    }
}
