// View state for the date screen flow
//
// Immutable snapshots produced by a pure reducer over three events, so
// every transition can be checked without touching the filesystem or
// the network. Resolution runs before DateSelected is emitted; the
// reducer itself does no I/O.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::Result;
use crate::upload::{DescribeOutcome, PredictOutcome};

/// Snapshot of everything the date screen shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub selected_date: Option<NaiveDate>,
    /// Present only when the clip for the selected date existed at the
    /// last resolution.
    pub media: Option<PathBuf>,
    /// Empty until the first successful describe response; replaced on
    /// each success, never cleared.
    pub description: String,
    /// In-flight uploads. Nothing de-duplicates overlapping requests.
    pub pending_uploads: usize,
}

impl ViewState {
    /// Upload actions are offered only while footage is resolved.
    pub fn can_upload(&self) -> bool {
        self.media.is_some()
    }
}

/// Collapsed verdict of one upload, as the reducer sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadResult {
    /// Successful description; replaces the shown text.
    Description(String),
    /// Successful emotion prediction; displayed, never stored.
    Emotion(String),
    /// The server answered `{"error": ...}`.
    Rejected,
    /// Transport failure or a response nothing could parse.
    Failed,
}

impl UploadResult {
    /// Collapse a describe call's outcome. Takes a reference so the
    /// caller can still log the underlying error.
    pub fn from_describe(result: &Result<DescribeOutcome>) -> Self {
        match result {
            Ok(DescribeOutcome::Description(text)) => UploadResult::Description(text.clone()),
            Ok(DescribeOutcome::Rejected(_)) => UploadResult::Rejected,
            Err(_) => UploadResult::Failed,
        }
    }

    /// Collapse a predict call's outcome.
    pub fn from_predict(result: &Result<PredictOutcome>) -> Self {
        match result {
            Ok(PredictOutcome::Emotion(value)) => UploadResult::Emotion(display_value(value)),
            Ok(PredictOutcome::Rejected(_)) => UploadResult::Rejected,
            Err(_) => UploadResult::Failed,
        }
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Events the date screen reacts to.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// A date was picked and footage resolution already ran for it.
    DateSelected {
        date: NaiveDate,
        media: Option<PathBuf>,
    },
    /// The user asked for an upload of the resolved footage.
    UploadRequested,
    /// An upload finished, one way or the other.
    ResponseReceived(UploadResult),
}

/// Apply one event to a snapshot and return the next snapshot.
///
/// Rejected and failed uploads leave everything except the pending
/// counter untouched; a description is only ever replaced, never
/// cleared.
pub fn reduce(state: &ViewState, event: ViewEvent) -> ViewState {
    let mut next = state.clone();
    match event {
        ViewEvent::DateSelected { date, media } => {
            next.selected_date = Some(date);
            next.media = media;
        }
        ViewEvent::UploadRequested => {
            // Without resolved footage there is nothing to upload
            if next.can_upload() {
                next.pending_uploads += 1;
            }
        }
        ViewEvent::ResponseReceived(result) => {
            next.pending_uploads = next.pending_uploads.saturating_sub(1);
            if let UploadResult::Description(text) = result {
                next.description = text;
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::{parse_describe_response, parse_predict_response};
    use std::path::Path;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn with_media() -> ViewState {
        reduce(
            &ViewState::default(),
            ViewEvent::DateSelected {
                date: ymd(2024, 3, 1),
                media: Some(PathBuf::from("/footage/2024-03-01.mov")),
            },
        )
    }

    #[test]
    fn test_date_selected_sets_date_and_media() {
        let state = with_media();
        assert_eq!(state.selected_date, Some(ymd(2024, 3, 1)));
        assert_eq!(
            state.media.as_deref(),
            Some(Path::new("/footage/2024-03-01.mov"))
        );
        assert!(state.can_upload());
    }

    #[test]
    fn test_absent_media_disables_uploads() {
        let state = reduce(
            &ViewState::default(),
            ViewEvent::DateSelected {
                date: ymd(2024, 3, 2),
                media: None,
            },
        );
        assert!(!state.can_upload());

        // An upload request without footage changes nothing
        let after = reduce(&state, ViewEvent::UploadRequested);
        assert_eq!(after, state);
    }

    #[test]
    fn test_new_date_replaces_stale_media() {
        let state = with_media();
        let state = reduce(
            &state,
            ViewEvent::DateSelected {
                date: ymd(2024, 3, 2),
                media: None,
            },
        );
        assert_eq!(state.selected_date, Some(ymd(2024, 3, 2)));
        assert!(state.media.is_none(), "media is recomputed per date");
    }

    #[test]
    fn test_successful_description_is_exact() {
        let state = reduce(&with_media(), ViewEvent::UploadRequested);
        let outcome = parse_describe_response(r#"{"description": "X"}"#);
        let state = reduce(
            &state,
            ViewEvent::ResponseReceived(UploadResult::from_describe(&outcome)),
        );

        assert_eq!(state.description, "X");
        assert_eq!(state.pending_uploads, 0);
    }

    #[test]
    fn test_server_error_leaves_state_unchanged() {
        let before = reduce(&with_media(), ViewEvent::UploadRequested);

        let outcome = parse_describe_response(r#"{"error": "bad file"}"#);
        let after = reduce(
            &before,
            ViewEvent::ResponseReceived(UploadResult::from_describe(&outcome)),
        );

        assert_eq!(after.description, before.description);
        assert_eq!(after.selected_date, before.selected_date);
        assert_eq!(after.media, before.media);
        assert_eq!(after.pending_uploads, 0);
    }

    #[test]
    fn test_malformed_body_leaves_state_unchanged() {
        let before = reduce(&with_media(), ViewEvent::UploadRequested);

        // Parsing fails; the collapsed result is Failed and nothing but
        // the pending counter moves.
        let outcome = parse_describe_response("not json at all");
        assert!(outcome.is_err());

        let after = reduce(
            &before,
            ViewEvent::ResponseReceived(UploadResult::from_describe(&outcome)),
        );
        assert_eq!(after.description, before.description);
        assert_eq!(after.media, before.media);
        assert_eq!(after.pending_uploads, 0);
    }

    #[test]
    fn test_predict_outcomes_never_touch_description() {
        let state = reduce(&with_media(), ViewEvent::UploadRequested);

        let outcome = parse_predict_response(r#"{"emotion": "happy"}"#);
        let result = UploadResult::from_predict(&outcome);
        assert_eq!(result, UploadResult::Emotion("happy".to_string()));

        let after = reduce(&state, ViewEvent::ResponseReceived(result));
        assert_eq!(after.description, "");
        assert_eq!(after.pending_uploads, 0);
    }

    #[test]
    fn test_description_is_never_cleared() {
        let state = reduce(&with_media(), ViewEvent::UploadRequested);
        let state = reduce(
            &state,
            ViewEvent::ResponseReceived(UploadResult::Description("first".to_string())),
        );

        // A later failure keeps the old text
        let state = reduce(&state, ViewEvent::UploadRequested);
        let state = reduce(&state, ViewEvent::ResponseReceived(UploadResult::Failed));
        assert_eq!(state.description, "first");

        // Selecting another date keeps it too
        let state = reduce(
            &state,
            ViewEvent::DateSelected {
                date: ymd(2024, 3, 2),
                media: None,
            },
        );
        assert_eq!(state.description, "first");

        // Only a newer success replaces it
        let state = reduce(
            &state,
            ViewEvent::ResponseReceived(UploadResult::Description("second".to_string())),
        );
        assert_eq!(state.description, "second");
    }

    #[test]
    fn test_overlapping_uploads_are_counted_not_deduplicated() {
        let state = reduce(&with_media(), ViewEvent::UploadRequested);
        let state = reduce(&state, ViewEvent::UploadRequested);
        assert_eq!(state.pending_uploads, 2);

        let state = reduce(&state, ViewEvent::ResponseReceived(UploadResult::Rejected));
        assert_eq!(state.pending_uploads, 1);

        let state = reduce(
            &state,
            ViewEvent::ResponseReceived(UploadResult::Description("done".to_string())),
        );
        assert_eq!(state.pending_uploads, 0);
        assert_eq!(state.description, "done");
    }

    #[test]
    fn test_stray_response_does_not_underflow() {
        let state = reduce(
            &ViewState::default(),
            ViewEvent::ResponseReceived(UploadResult::Failed),
        );
        assert_eq!(state.pending_uploads, 0);
    }
}
