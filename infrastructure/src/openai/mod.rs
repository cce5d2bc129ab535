//! OpenAI-compatible oracle adapter
//!
//! Implements [`OracleGateway`](score_application::OracleGateway) over the
//! Responses and Files HTTP APIs.

pub mod error;
pub mod gateway;
pub mod protocol;
