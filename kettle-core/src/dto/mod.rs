//! Data Transfer Objects for the Kettle server endpoints
//!
//! The server takes its parameters as query strings; these DTOs serialize
//! straight into them.

pub mod job;
