//! Speaker pool coordination for the herald relay.
//!
//! A small fixed pool of speaker identities shares the work of reading chat
//! aloud. This crate owns the registry that knows which text and voice
//! channels are bound to which speaker, the first-fit selection protocol
//! with its global exclusivity checks, and the session lifecycle (connect,
//! disconnect, live rate changes, and auto-teardown when the last human
//! leaves a tracked voice channel).
//!
//! Platform specifics stay behind the [`SpeakerDriver`] trait; the pool
//! never sees a gateway. All lifecycle mutations serialize behind one
//! operations lock so the check-then-act sequences stay atomic under a
//! multi-threaded runtime.

pub mod driver;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod session;

pub use driver::{DriverError, NullDriver, SpeakerDriver};
pub use error::PoolError;
pub use lifecycle::{BindRequest, Teardown, MAX_SPEECH_RATE, MIN_SPEECH_RATE};
pub use registry::{PoolSnapshot, Speaker, SpeakerAvailability, SpeakerPool, SpeakerSnapshot};
pub use session::{Session, DEFAULT_SPEECH_RATE};
