//! noisekit CLI library.
//!
//! Command implementations for the `noisekit` binary: validating job
//! documents, generating PNG textures, sprites and animations from them, and
//! printing starter templates.

pub mod commands;
pub mod output;
