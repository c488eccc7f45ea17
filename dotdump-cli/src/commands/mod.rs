pub mod common;
pub mod dump;
pub mod list;
