//! Timer-driven state core of pester: a pure reducer over [`state::UiState`], the timers
//! that feed it, and a [`session::Session`] tying both to a host scheduler.

pub mod config;
pub mod event;
pub mod geometry;
pub mod popup;
pub mod reducer;
pub mod schedule;
pub mod session;
pub mod sound;
pub mod state;

pub use event::{Event, TimerSlot};
pub use geometry::{Point, Viewport};
pub use session::Session;
pub use state::UiState;
