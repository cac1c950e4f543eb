// Analysis upload module
//
// Multipart framing, the blocking HTTP client for the two analysis
// endpoints, and the background task handle around one request.

pub mod client;
pub mod multipart;
pub mod task;

pub use client::{
    parse_describe_response, parse_predict_response, AnalysisClient, DescribeOutcome,
    PredictOutcome,
};
pub use task::UploadTask;
