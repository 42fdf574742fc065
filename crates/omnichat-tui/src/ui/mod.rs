//! UI rendering module

mod layout;

pub use layout::{get_layout, AppLayout};
