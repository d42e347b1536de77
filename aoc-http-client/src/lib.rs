//! AOC HTTP Client Library
//!
//! Fetches personal leaderboard pages from the Advent of Code website.
//!
//! # Features
//!
//! - Personal leaderboard fetching for any year
//! - Session cookie sent as a sensitive header and zeroized after use
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Blocking synchronous API
//! - Well-typed errors using thiserror
//!
//! # Example
//!
//! ```no_run
//! use aoc_http_client::AocClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AocClient::new()?;
//!
//! // Your session cookie from adventofcode.com
//! let session = "your_session_cookie_here";
//!
//! let page = client.get_leaderboard(2024, session)?;
//! println!("{} bytes", page.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{AocClient, AocClientBuilder};
pub use error::AocError;
