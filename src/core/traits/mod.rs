pub mod archive;
pub mod parser;
pub mod progress;
pub mod sink;
