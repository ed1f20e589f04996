pub mod menu;
pub mod session;
