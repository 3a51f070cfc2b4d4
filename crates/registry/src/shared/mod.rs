pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod format;
pub mod ids;
pub mod list_utils;
pub mod outcome;
