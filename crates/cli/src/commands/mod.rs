//! CLI Commands

pub mod adapt;
pub mod check;
pub mod init;

pub use adapt::AdaptCommand;
pub use check::CheckCommand;
pub use init::InitCommand;
