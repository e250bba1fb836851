pub mod download;
pub mod generate;
pub mod index;
