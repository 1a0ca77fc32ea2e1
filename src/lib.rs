//! Extractive summarization with Luhn's significant-word clustering.
//!
//! [`summarize::luhn`] holds the scoring engine; [`nlp`] supplies the text
//! plumbing around it and [`mcp`] serves it over stdio.

pub mod config;
pub mod errors;
pub mod logging;
pub mod mcp;
pub mod nlp;
pub mod summarize;
