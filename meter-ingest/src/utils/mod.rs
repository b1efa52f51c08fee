//! Utility helpers for the ingest service

pub mod parsing;
