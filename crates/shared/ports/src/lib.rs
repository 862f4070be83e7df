//! Levelgate Ports
//!
//! Port definitions (traits) for the levelgate decision engine.
//! These define the boundaries between the pure decision logic and the
//! collaborators around it: time, risk control and the execution boundary.

mod clock;
mod error;
mod risk;
mod sink;

pub use clock::Clock;
pub use error::{EngineError, EngineResult, InputSource};
pub use risk::RiskControl;
pub use sink::{DecisionSink, SinkError};
