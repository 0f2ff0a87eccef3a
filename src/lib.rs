//! Core library for the flightcodes-tools command line application.
//!
//! The library parses semicolon-delimited flight listings into an in-memory
//! table and normalises them in a fixed sequence of steps. Parsing and
//! rendering live under [`flightcodes::tools::io`], the table and record types
//! in [`flightcodes::tools::model`], the per-column cleaning steps in
//! [`flightcodes::tools::clean`], and the ordered orchestration in
//! [`flightcodes::tools::pipeline`].

pub mod flightcodes;

pub use flightcodes::tools::{Result, ToolError, clean, error, io, model, pipeline};
