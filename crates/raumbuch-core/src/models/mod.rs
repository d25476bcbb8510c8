//! Data models for room-area extraction.

pub mod config;
pub mod room;
