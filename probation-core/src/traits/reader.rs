//! The pluggable validity-check delegate.

use std::path::Path;

use crate::errors::ReadError;

/// Attempts to load a container file. Implementations may be stateful and
/// are used strictly sequentially; the stage never shares an instance
/// across concurrent invocations.
pub trait ContainerReader {
    /// Attempt to load `path`, returning the number of containers read.
    /// Zero containers means the file is not currently usable.
    fn read(&mut self, path: &Path) -> Result<usize, ReadError>;
}

/// Produces the actual reader instance. The stage instantiates it lazily,
/// once, on the first validity check, mirroring a prototype-and-copy
/// collaborator that must not be touched before execution starts.
pub trait ReaderFactory {
    fn instantiate(&self) -> Box<dyn ContainerReader>;
}

impl<F> ReaderFactory for F
where
    F: Fn() -> Box<dyn ContainerReader>,
{
    fn instantiate(&self) -> Box<dyn ContainerReader> {
        self()
    }
}
