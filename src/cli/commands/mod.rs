mod command_result;
pub mod extract;
pub mod helper;
pub mod init;
pub mod prune;
pub mod translate;

pub use command_result::*;
