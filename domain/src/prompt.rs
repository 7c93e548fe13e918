//! Text sent to the external collaborators: the context-enriched message for the
//! sentiment classifier and the system instructions and user prompt for the
//! text generator.

use crate::emotion::{
    ConversationExchange, EmotionVector, EmotionalTrendSummary, Intensity, Strategy,
};
use std::fmt::Write;

fn recent(history: &[ConversationExchange], window: usize) -> &[ConversationExchange] {
    &history[history.len().saturating_sub(window)..]
}

fn write_trend(out: &mut String, summary: &EmotionalTrendSummary) {
    let _ = writeln!(
        out,
        "Emotional trend: {} ({}) across {} exchanges; average valence {:.2}, arousal {:.2}, confidence {:.2}.",
        summary.trend,
        summary.pattern,
        summary.exchange_count,
        summary.avg_valence,
        summary.avg_arousal,
        summary.avg_confidence,
    );
}

fn write_exchanges(out: &mut String, exchanges: &[ConversationExchange]) {
    if exchanges.is_empty() {
        return;
    }
    let _ = writeln!(out, "Previous exchanges (oldest first):");
    for exchange in exchanges {
        let _ = write!(out, "- User: {}", exchange.user_text);
        if let Some(label) = &exchange.emotion_label {
            let _ = write!(out, " [{label}]");
        }
        if !exchange.assistant_text.is_empty() {
            let _ = write!(out, " | Assistant: {}", exchange.assistant_text);
        }
        out.push('\n');
    }
}

/// Prefixes `text` with the trend summary and up to `window` prior exchanges.
/// Without history the text is returned unchanged.
pub fn enrich(
    text: &str,
    summary: Option<&EmotionalTrendSummary>,
    history: &[ConversationExchange],
    window: usize,
) -> String {
    let exchanges = recent(history, window);
    if summary.is_none() && exchanges.is_empty() {
        return text.to_string();
    }

    let mut out = String::from("Conversation context:\n");
    if let Some(summary) = summary {
        write_trend(&mut out, summary);
    }
    write_exchanges(&mut out, exchanges);
    let _ = write!(out, "Current message: {text}");
    out
}

/// Everything the generator needs to know about how to answer.
pub struct InstructionContext<'a> {
    pub strategy: Strategy,
    pub vector: &'a EmotionVector,
    pub intensity: Intensity,
    pub trend: Option<&'a EmotionalTrendSummary>,
    pub history: &'a [ConversationExchange],
    pub history_window: usize,
}

pub fn system_instructions(ctx: &InstructionContext<'_>) -> String {
    let profile = ctx.strategy.profile();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "You are an emotionally aware assistant. Adapt your reply to the user's emotional state."
    );
    let _ = writeln!(out, "Response strategy: {}", ctx.strategy);
    let _ = writeln!(out, "Tone: {}", profile.tone);
    let _ = writeln!(out, "Length: {}", profile.length);
    let _ = writeln!(out, "Questions: {}", profile.questions);
    let _ = writeln!(out, "{}", profile.instructions);
    let _ = writeln!(
        out,
        "Detected emotion: {} (valence {:.2}, arousal {:.2}, confidence {:.2}, intensity {}).",
        ctx.vector.label,
        ctx.vector.valence,
        ctx.vector.arousal,
        ctx.vector.confidence,
        ctx.intensity,
    );

    if ctx.vector.feedback_detected {
        let _ = writeln!(
            out,
            "The user is giving feedback on a previous answer. Address their request directly and fix the problem before anything else."
        );
    }

    if let Some(summary) = ctx.trend {
        write_trend(&mut out, summary);
    }
    write_exchanges(&mut out, recent(ctx.history, ctx.history_window));

    out.trim_end().to_string()
}

/// The user's message, with the caller's free-text context appended when present.
pub fn user_prompt(text: &str, context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!("{text}\n\nAdditional context: {context}"),
        None => text.to_string(),
    }
}

pub const REPHRASE_INSTRUCTIONS: &str = "Restate the user's message as one clear, neutral sentence that preserves its meaning. Reply with the restatement only.";

/// Template reply used when generation is unavailable.
pub fn fallback_response(template: &str, valence: f64, context: Option<&str>) -> String {
    let mut response = template.to_string();
    if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) {
        if valence > 0.5 {
            let _ = write!(response, " I can see you're feeling positive about {context}.");
        } else if valence < -0.5 {
            let _ = write!(response, " It sounds like {context} is really affecting you.");
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::{mapper, trend};
    use emotion_ai::{Label, Scores};

    fn exchange(user_text: &str, valence: f64) -> ConversationExchange {
        ConversationExchange {
            user_text: user_text.to_string(),
            assistant_text: "ok".to_string(),
            emotion_label: Some("Joy / Optimism".to_string()),
            valence: Some(valence),
            arousal: Some(0.5),
            confidence: Some(0.9),
        }
    }

    #[test]
    fn enrich_without_history_is_identity() {
        assert_eq!(enrich("hello there", None, &[], 10), "hello there");
    }

    #[test]
    fn enrich_includes_trend_and_recent_exchanges_only() {
        let history: Vec<_> = (0..12)
            .map(|i| exchange(&format!("message {i}"), 0.1 * i as f64 - 0.5))
            .collect();
        let summary = trend::analyze(&history, 10);

        let enriched = enrich("current", summary.as_ref(), &history, 10);

        assert!(enriched.starts_with("Conversation context:"));
        assert!(enriched.contains("Improving Emotional State"));
        assert!(!enriched.contains("message 1 "));
        assert!(enriched.contains("- User: message 2 [Joy / Optimism] | Assistant: ok"));
        assert!(enriched.contains("message 11"));
        assert!(enriched.ends_with("Current message: current"));
    }

    #[test]
    fn instructions_carry_the_strategy_contract() {
        let mut vector = mapper::map_scores(
            Label::Negative,
            Scores {
                positive: 0.05,
                negative: 0.85,
                neutral: 0.05,
                mixed: 0.05,
            },
        );
        vector.feedback_detected = true;
        let history = vec![exchange("first", 0.2), exchange("second", 0.3)];

        let instructions = system_instructions(&InstructionContext {
            strategy: Strategy::StressedUrgentClear,
            vector: &vector,
            intensity: Intensity::VeryHigh,
            trend: None,
            history: &history,
            history_window: 1,
        });

        assert!(instructions.contains("Response strategy: STRESSED_URGENT_CLEAR"));
        assert!(instructions.contains("Tone: clear, direct and supportive"));
        assert!(instructions.contains("intensity Very High"));
        assert!(instructions.contains("feedback on a previous answer"));
        assert!(instructions.contains("- User: second"));
        assert!(!instructions.contains("- User: first"));
    }

    #[test]
    fn user_prompt_appends_non_empty_context() {
        assert_eq!(user_prompt("hi", None), "hi");
        assert_eq!(user_prompt("hi", Some("  ")), "hi");
        assert_eq!(
            user_prompt("hi", Some("job interview")),
            "hi\n\nAdditional context: job interview"
        );
    }

    #[test]
    fn fallback_response_adds_a_context_clause_for_strong_valence() {
        assert_eq!(
            fallback_response("Great!", 0.72, Some("the promotion")),
            "Great! I can see you're feeling positive about the promotion."
        );
        assert_eq!(
            fallback_response("Sorry.", -0.68, Some("the move")),
            "Sorry. It sounds like the move is really affecting you."
        );
        assert_eq!(fallback_response("Hmm.", 0.2, Some("work")), "Hmm.");
        assert_eq!(fallback_response("Hmm.", 0.9, None), "Hmm.");
    }
}
