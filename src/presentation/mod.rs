pub mod app;
pub mod components;
pub mod session;
pub mod theme;
