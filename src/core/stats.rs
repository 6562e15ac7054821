//! Per-run session statistics shown in the stats panel.

use crate::core::replies::capitalize;

/// Shown before the first successful analysis.
pub const NO_EMOTION: &str = "-";

/// Counters for the current run.
///
/// Read-only outside `core`: only the reducer records an analysis, and only
/// after the service returned a usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    session_count: u32,
    current_emotion: String,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            session_count: 0,
            current_emotion: NO_EMOTION.to_string(),
        }
    }
}

impl SessionStats {
    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    /// Capitalized label of the last detected emotion, or `"-"`.
    pub fn current_emotion(&self) -> &str {
        &self.current_emotion
    }

    pub(crate) fn record_analysis(&mut self, emotion: &str) {
        self.session_count = self.session_count.saturating_add(1);
        self.current_emotion = capitalize(emotion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let stats = SessionStats::default();
        assert_eq!(stats.session_count(), 0);
        assert_eq!(stats.current_emotion(), "-");
    }

    #[test]
    fn record_counts_and_capitalizes() {
        let mut stats = SessionStats::default();
        stats.record_analysis("joy");
        stats.record_analysis("sadness");
        assert_eq!(stats.session_count(), 2);
        assert_eq!(stats.current_emotion(), "Sadness");
    }
}
