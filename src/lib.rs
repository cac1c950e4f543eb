// Dayreel - Library Entry Point
//
// Find, play, and analyze daily progress videos. One clip per day,
// named after its date, with two remote analysis endpoints for emotion
// prediction and video description.

pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod playback;
pub mod resolver;
pub mod state;
pub mod tools;
pub mod upload;

pub use config::{load_config, save_config, Config, FootageConfig, ServerConfig};
pub use error::{DayreelError, Result};
pub use state::{reduce, UploadResult, ViewEvent, ViewState};
pub use upload::{AnalysisClient, DescribeOutcome, PredictOutcome, UploadTask};
