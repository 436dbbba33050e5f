//! # GC BSD
//!
//! Remote directory access for Ground Control: constituents, signup forms
//! and constituent groups fetched live from the Blue State Digital CRM.
//!
//! [`RemoteDirectory`] is the contract the graph layer depends on.
//! [`BsdClient`] talks to the real API; [`StaticDirectory`] serves a fixed
//! set of records from memory.

pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod memory;
mod xml;

pub use client::BsdClient;
pub use config::BsdConfig;
pub use directory::{ConstituentGroupRecord, ConstituentRecord, FormRecord, RemoteDirectory};
pub use error::{BsdError, BsdResult};
pub use memory::StaticDirectory;
