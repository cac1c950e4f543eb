// Footage playback via ffplay

use std::path::Path;
use std::process::Command;

use crate::error::{DayreelError, Result};

/// Play a clip in an ffplay window, returning when the window closes.
pub fn play(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(DayreelError::FileNotFound(path.display().to_string()));
    }

    log::debug!("Launching ffplay for {}", path.display());
    let status = Command::new(crate::tools::ffplay_path())
        .args(["-autoexit", "-loglevel", "error"])
        .arg(path)
        .status()
        .map_err(|e| DayreelError::Playback(format!("failed to launch ffplay: {}", e)))?;

    if !status.success() {
        return Err(DayreelError::Playback(format!(
            "ffplay exited with {}",
            status
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_play_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("2024-03-01.mov");

        let err = play(&missing).unwrap_err();
        assert!(matches!(err, DayreelError::FileNotFound(_)));
    }
}
