//! tbx-core — scanner, extractor, and session layer for tbx.
//!
//! # Architecture
//!
//! ```text
//! raw text ──► Scanner ──► parsed values ──► Extractor ──► log lines
//!                 └──────────── Session ────────────┘
//!                                  │
//!                                  ├──► Clipboard
//!                                  └──► Export
//! ```
//!
//! The scanner and extractor are pure functions over in-memory text with no
//! I/O and no shared state; the session wraps them into one request/response
//! cycle for the shell. Clipboard and export are thin platform glue.

pub mod clipboard;
pub mod config;
pub mod export;
pub mod extract;
pub mod scanner;
pub mod session;

pub use extract::extract;
pub use scanner::scan;
pub use session::{ExtractionOutcome, ExtractionStats};
