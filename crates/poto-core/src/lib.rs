pub mod cleanup;
pub mod config;
pub mod consts;
pub mod error;
pub mod frame;
pub mod layer_set;
pub mod matching;
pub mod pipeline;
pub mod project;
pub mod prompt;
pub mod scan;
pub mod scripts;
