pub mod directory_archive;
