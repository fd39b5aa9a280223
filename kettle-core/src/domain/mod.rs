//! Core domain types
//!
//! This module contains the structures a single run works with. They are
//! built fresh from caller-supplied parameters for every invocation and
//! never outlive it.

pub mod job;
pub mod poll;
