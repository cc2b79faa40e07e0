//! Credit Bureau Data Pump Client Library
//!
//! Submits credit contract records to the First Credit Bureau data pump
//! SOAP service: the caller's fields are validated, rendered as a credit
//! record XML document, zipped, base64-encoded, wrapped in a SOAP envelope
//! with credentials and posted; the response is read back into an outcome.
//!
//! # Modules
//!
//! - `archive`: Single-entry zip packaging and base64 encoding.
//! - `config`: Configuration management.
//! - `datapump_client`: Submission pipeline.
//! - `envelope`: SOAP request envelope.
//! - `errors`: Error handling types.
//! - `fields`: Required-field schema and validation.
//! - `models`: Core data models.
//! - `record`: Credit record document builder.
//! - `response`: SOAP response interpretation.
//! - `transport`: HTTP transport.

pub mod archive;
pub mod config;
pub mod datapump_client;
pub mod envelope;
pub mod errors;
pub mod fields;
pub mod models;
pub mod record;
pub mod response;
pub mod transport;

mod xml_writer;

pub use config::Config;
pub use datapump_client::DataPumpClient;
pub use errors::AppError;
pub use models::{Failure, FieldValue, Outcome, SoapFault, SubmissionFields};
