pub mod clear;
pub mod config;
pub mod prepare;
pub mod scripts;
