pub mod correct;
pub mod extract;
pub mod init;
pub mod insert;
pub mod resolve;

mod command_result;

pub use command_result::*;
