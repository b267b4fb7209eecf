// Library surface shared by the binary and the integration tests.
pub mod alert;
pub mod app;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod session;
pub mod shell;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod ticker;
pub mod ui;

pub use engine::{SessionObserver, TimerEngine};
pub use error::FocusError;
pub use session::{BREAK_DURATION, SessionType, WORK_DURATION};
