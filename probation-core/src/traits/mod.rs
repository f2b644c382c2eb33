//! Trait seams of the probation stage: time, cancellation, the pluggable
//! reader, and the downstream forward sink.

pub mod cancellation;
pub mod clock;
pub mod forward;
pub mod reader;

pub use cancellation::{Cancellable, CancellationToken, NeverCancelled};
pub use clock::{Clock, ManualClock, SystemClock};
pub use forward::ForwardSink;
pub use reader::{ContainerReader, ReaderFactory};
