//! Batch shape model.
//!
//! A stage invocation receives one token: a single path or a sequence of
//! paths, each expressed as text or as a structured path. The shape is
//! resolved once at ingestion into a [`BatchShape`] tag and reapplied when
//! the pass-through and forward outputs are built, so the algorithm itself
//! never branches on representation.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Whether the batch was a single item or a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Scalar,
    Sequence,
}

/// How each element of the batch was represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Path,
}

/// The resolved shape of an incoming batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchShape {
    pub arity: Arity,
    pub element: ElementKind,
}

/// A batch token as it crosses the stage boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    Text(String),
    TextList(Vec<String>),
    Path(PathBuf),
    PathList(Vec<PathBuf>),
}

impl PathToken {
    /// The shape tag for this token.
    pub fn shape(&self) -> BatchShape {
        match self {
            Self::Text(_) => BatchShape {
                arity: Arity::Scalar,
                element: ElementKind::Text,
            },
            Self::TextList(_) => BatchShape {
                arity: Arity::Sequence,
                element: ElementKind::Text,
            },
            Self::Path(_) => BatchShape {
                arity: Arity::Scalar,
                element: ElementKind::Path,
            },
            Self::PathList(_) => BatchShape {
                arity: Arity::Sequence,
                element: ElementKind::Path,
            },
        }
    }

    /// Resolve the shape and normalize every element into a canonical
    /// [`CandidatePath`], preserving order.
    pub fn decompose(&self) -> (BatchShape, Vec<CandidatePath>) {
        let paths = match self {
            Self::Text(s) => vec![CandidatePath::new(s)],
            Self::TextList(list) => list.iter().map(CandidatePath::new).collect(),
            Self::Path(p) => vec![CandidatePath::new(p)],
            Self::PathList(list) => list.iter().map(CandidatePath::new).collect(),
        };
        (self.shape(), paths)
    }

    /// Number of elements in the token.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(_) | Self::Path(_) => 1,
            Self::TextList(list) => list.len(),
            Self::PathList(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BatchShape {
    /// Rebuild a token from the surviving paths, mirroring the input shape.
    ///
    /// Returns `None` when `paths` is empty: absence of a token is how the
    /// stage signals "nothing to emit", distinct from an empty sequence.
    pub fn recompose(&self, paths: &[CandidatePath]) -> Option<PathToken> {
        if paths.is_empty() {
            return None;
        }
        Some(match (self.arity, self.element) {
            (Arity::Scalar, ElementKind::Text) => PathToken::Text(paths[0].to_text()),
            (Arity::Scalar, ElementKind::Path) => PathToken::Path(paths[0].as_path().to_path_buf()),
            (Arity::Sequence, ElementKind::Text) => {
                PathToken::TextList(paths.iter().map(CandidatePath::to_text).collect())
            }
            (Arity::Sequence, ElementKind::Path) => PathToken::PathList(
                paths.iter().map(|p| p.as_path().to_path_buf()).collect(),
            ),
        })
    }

    /// A single-item token in this shape's element representation.
    /// Used for the forward channel, which emits one path at a time.
    pub fn single(&self, path: &CandidatePath) -> PathToken {
        match self.element {
            ElementKind::Text => PathToken::Text(path.to_text()),
            ElementKind::Path => PathToken::Path(path.as_path().to_path_buf()),
        }
    }
}

/// Canonical registry key for a candidate resource.
///
/// Both representations of the same resource (text or structured path,
/// relative or absolute) normalize to the same key: an absolute path with
/// `.` and `..` components folded lexically. Symlinks are not resolved,
/// since a blacklisted path may not exist on disk at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidatePath(PathBuf);

impl CandidatePath {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self(normalize(path.as_ref()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn to_text(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }
}

impl fmt::Display for CandidatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Lexical normalization: anchor relative paths at the working directory,
/// drop `.` components, fold `..` against the preceding component.
fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` above the root stays at the root; an unanchored
                // leading `..` is kept as-is.
                if !out.pop() && !out.has_root() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
