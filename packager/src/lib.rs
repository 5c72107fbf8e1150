//! Link Collector release packager.
//!
//! This crate packages the Link Collector browser extension for upload to the
//! Chrome Web Store: it stages the fixed set of extension assets, compresses
//! them into a flat zip archive, and removes the staging directory. It backs
//! the `link-collector-packager` binary and can be driven programmatically
//! for testing.
//!
//! # Modules
//!
//! - [`archive`] - Zip archive creation, digest, and inspection
//! - [`assembler`] - Packaging run orchestration and cleanup
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types
//! - [`layout`] - Asset list and output path layout
//! - [`metadata`] - Release metadata sidecar
//! - [`output`] - Console report formatting
//! - [`stager`] - Staging directory lifecycle

pub mod archive;
pub mod assembler;
pub mod cli;
pub mod error;
pub mod layout;
pub mod metadata;
pub mod output;
pub mod stager;
