pub mod error;
pub mod executable_utils;
pub mod loader;
pub mod table;
pub mod value_path;
pub mod writer;
