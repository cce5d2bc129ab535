//! Oracle answers and their parsing
//!
//! The oracle returns free-form text that should contain one JSON object.
//! These functions extract that object and validate its shape; anything
//! unusable becomes [`DomainError::MalformedResponse`](crate::DomainError).

mod response;

pub use response::{
    AnalysisResult, SinglePartAnswer, extract_json_object, parse_analysis_response,
    parse_single_part_response,
};
