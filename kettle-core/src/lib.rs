//! Kettle Core
//!
//! Core types and abstractions for driving jobs on a Kettle (Carte) server.
//!
//! This crate contains:
//! - Domain types: job identity, decoded job status, polling settings, run outcome
//! - DTOs: query payloads sent to the server endpoints
//! - Markup: the first-match tag extraction used to decode server responses

pub mod domain;
pub mod dto;
pub mod markup;
