//! Widgets shared by every tab.

pub mod confirm;
pub mod status_bar;
pub mod tab_bar;
