pub mod archive;
pub mod parsers;
pub mod sinks;
