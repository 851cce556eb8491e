pub mod hooks;
pub mod package;
pub mod upload;
