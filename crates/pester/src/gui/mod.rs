pub mod app;
pub mod page;
pub mod theme;
