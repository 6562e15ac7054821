//! Bot-side wording for everything the client appends to the transcript.

use crate::analysis::Analysis;

pub const PLACEHOLDER: &str = "⏳ Analyzing your emotions...";
pub const CONNECTIVITY_FAILURE: &str =
    "⚠️ Unable to connect to the analysis service. Please try again later.";
pub const TREND_FAILURE: &str = "⚠️ Unable to load sentiment trends. Please try again later.";

/// Upper-cases the first character only. `"joy"` → `"Joy"`, `"sAD"` → `"SAD"`.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `0.873` → `"87.3%"`. Ties round up: `0.8725` → `"87.3%"`.
pub fn format_confidence(confidence: f64) -> String {
    let percent = confidence * 100.0;
    format!("{:.1}%", (percent * 10.0).round() / 10.0)
}

pub fn service_error(error: &str) -> String {
    format!("⚠️ Error: {error}")
}

/// The bot messages for a successful analysis, in display order.
pub fn analysis_messages(analysis: &Analysis) -> Vec<String> {
    let label = capitalize(&analysis.emotion);
    let mut messages = vec![
        format!("🤖 {}", analysis.reply),
        format!(
            "📊 Emotion Detected: {} ({} confidence)",
            label,
            format_confidence(analysis.confidence)
        ),
        format!("📖 Quranic Verse:\n{}", analysis.quranic_aayat),
        format!("🔍 Translation:\n{}", analysis.translation),
    ];

    if let Some(original) = analysis.overridden_classification() {
        messages.push(format!(
            "🔧 Note: Initial classification was {} but was corrected to {} based on context.",
            capitalize(original),
            label
        ));
    }

    messages
}
