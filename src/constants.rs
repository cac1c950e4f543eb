// Dayreel Constants
// Values the rest of the crate agrees on: footage naming, the analysis
// endpoints, and upload framing. Change the endpoint defaults via config,
// not here.

// Footage naming
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const FOOTAGE_EXTENSION: &str = "mov";
pub const CONVERTED_AUDIO_FILENAME: &str = "convertedAudio.wav";

// Analysis servers
pub const DEFAULT_PREDICT_ENDPOINT: &str = "http://127.0.0.1:5010/predict";
pub const DEFAULT_DESCRIBE_ENDPOINT: &str = "http://127.0.0.1:5020/describe_video";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300; // 5 minutes

// Upload framing
pub const PREDICT_FIELD_NAME: &str = "file";
pub const DESCRIBE_FIELD_NAME: &str = "video";
pub const WAV_MIME_TYPE: &str = "audio/wav";
pub const MP4_MIME_TYPE: &str = "video/mp4";
pub const BOUNDARY_PREFIX: &str = "Boundary-";

// Audio extraction
pub const WAV_CODEC: &str = "pcm_s16le";

// Labels the predict server is trained on. The client accepts whatever
// value comes back; these are the shapes known to occur.
pub const EMOTION_LABELS: [&str; 7] = [
    "angry", "disgust", "fear", "happy", "sad", "surprise", "neutral",
];
