//! # RIA Report Builder
//!
//! A library for building registered investment adviser (RIA) reports: disclosed
//! firm data from a spreadsheet export, combined with AI-researched narrative
//! sections and their source citations.
//!
//! ## Core Concepts
//!
//! - **Firm Directory**: Firm records (location, AUM, staffing) loaded from CSV
//! - **Query Client**: One chat-completion call per prompt, parsed into text + citations
//! - **Report Sections**: Overview, history, offerings, size and leadership, generated in order
//! - **Export**: Markdown document, single-row CSV spreadsheet, or JSON
//!
//! ## Example
//!
//! ```rust,ignore
//! use ria_report_builder::*;
//!
//! let directory = FirmDirectory::from_path("firms.csv")?;
//! let client = QueryClient::from_config(ClientConfig::from_env()?)?;
//!
//! let record = directory.require("Acme Capital")?.clone();
//! let report = ReportGenerator::new(&client)
//!     .generate_report("Acme Capital", Some(record))
//!     .await?;
//!
//! std::fs::write("Acme Capital_RIA_Report.md", report.to_markdown())?;
//! ```

pub mod config;
pub mod error;
pub mod firm;
pub mod llm;
pub mod prompts;
pub mod report;
pub mod utils;

pub use config::{AccessGate, ClientConfig};
pub use error::{ReportError, Result};
pub use firm::{FirmDirectory, FirmRecord};
pub use llm::*;
pub use prompts::ReportSection;
pub use report::*;
pub use utils::*;
