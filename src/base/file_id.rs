//! File identifiers.

use std::fmt;

/// An opaque identifier for a source file known to the analyzer.
///
/// Ids are handed out by [`crate::analysis::AnalysisHost`] and are only
/// meaningful for the host that created them. Id `0` is reserved for the
/// bundled framework reference surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    /// The file holding the framework reference declarations.
    pub const FRAMEWORK: FileId = FileId(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns true for the framework reference file.
    pub fn is_framework(self) -> bool {
        self == Self::FRAMEWORK
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}
