//! Request and Response models for the command driver
//!
//! `Command` is parsed from input lines; replies serialize to JSON.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::Command;
pub use responses::{
    AddResponse, ErrorResponse, EvictResponse, GetResponse, LenResponse, RemoveResponse, Reply,
    StatsResponse,
};
