//! Label Printing Module
//!
//! Asynchronous print dispatch: submission inserts a durable job row and
//! returns immediately; a background worker renders the label and hands it
//! to the external spooler, capturing the outcome per job.

pub mod executor;
pub mod service;
pub mod worker;

pub use executor::{PrintExecutor, PrintExecutorError, SpoolOutput};
pub use service::{LabelPrintService, PrintServiceError, PrintServiceResult};
pub use worker::PrintWorker;
