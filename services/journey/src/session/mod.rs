pub mod controller;
pub mod cues;
pub mod protocol;
pub mod state;

// Re-export the control loop so the binary and the tests can drive a session
// without reaching into its internals.
pub use controller::run_session;
pub use protocol::{JourneyUpdate, VisitorEvent};
pub use state::AppState;
