pub mod runtime;
pub mod timers;
