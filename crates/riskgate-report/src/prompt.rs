//! Prompt construction

use riskgate_events::Session;

/// Sessions above this score appear in the briefing
pub const BRIEFING_MIN_SCORE: u8 = 50;

/// One briefing line per risky session
pub fn risky_session_lines(sessions: &[Session]) -> Vec<String> {
    sessions
        .iter()
        .filter(|s| s.risk_score.value() > BRIEFING_MIN_SCORE)
        .map(|s| {
            format!(
                "- {} ({}): Risk {} [{}]",
                s.user.email,
                s.location,
                s.risk_score,
                s.risk_factors.join(", ")
            )
        })
        .collect()
}

pub fn briefing_prompt(sessions: &[Session]) -> String {
    let lines = risky_session_lines(sessions);
    let body = if lines.is_empty() {
        "No high-risk sessions in the current window.".to_string()
    } else {
        lines.join("\n")
    };

    format!(
        "You are a security operations analyst. Write a short executive briefing \
         on the current identity threat landscape.\n\
         Summarize the main patterns, name the most urgent accounts, and suggest \
         two or three next steps.\n\n\
         High-risk sessions:\n{}",
        body
    )
}

pub fn session_prompt(session: &Session) -> String {
    let factors = if session.risk_factors.is_empty() {
        "none".to_string()
    } else {
        session.risk_factors.join(", ")
    };

    format!(
        "Analyze this login session for account takeover risk.\n\
         User: {} ({})\n\
         Location: {}\n\
         IP: {}\n\
         Device: {}\n\
         Risk score: {} ({})\n\
         Detected factors: {}\n\n\
         Explain why the session was scored this way, judge whether the activity \
         looks like a human or a script, and recommend one action.",
        session.user.name,
        session.user.email,
        session.location,
        session.ip,
        session.device,
        session.risk_score,
        session.risk_level,
        factors
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use riskgate_common::UserId;
    use riskgate_engine::{score, RiskInput};
    use riskgate_events::{EventDraft, EventSource, EventType, SecurityEvent, UserRef, UserRole};

    pub(crate) fn session(email: &str, input: RiskInput) -> Session {
        let draft = EventDraft {
            event_type: EventType::LoginSuccess,
            user: UserRef {
                id: UserId::new(email).unwrap(),
                name: "Test User".into(),
                email: email.into(),
                role: UserRole::Developer,
            },
            source: EventSource::Web,
            location: "Berlin, DE".into(),
            ip: "10.0.0.7".into(),
            device: "Firefox / Linux".into(),
        };
        let event = SecurityEvent::from_verdict(draft, &score(&input));
        Session::from_event(&event)
    }

    #[test]
    fn test_briefing_keeps_only_risky_sessions() {
        let quiet = session("quiet@acme.io", RiskInput::default());
        let risky = session(
            "risky@acme.io",
            RiskInput { is_new_device: true, is_new_location: true, ..Default::default() },
        );

        let lines = risky_session_lines(&[quiet, risky]);
        assert_eq!(lines, vec!["- risky@acme.io (Berlin, DE): Risk 55 [New Device, New Location]"]);
    }

    #[test]
    fn test_score_of_fifty_is_excluded() {
        // 10 + 20 + 20
        let edge = session(
            "edge@acme.io",
            RiskInput { is_new_location: true, is_impossible_travel: true, ..Default::default() },
        );
        assert_eq!(edge.risk_score.value(), 50);
        assert!(risky_session_lines(&[edge]).is_empty());
    }

    #[test]
    fn test_empty_briefing_says_so() {
        assert!(briefing_prompt(&[]).contains("No high-risk sessions"));
    }

    #[test]
    fn test_session_prompt_fields() {
        let s = session("a@acme.io", RiskInput { is_new_device: true, ..Default::default() });
        let prompt = session_prompt(&s);
        assert!(prompt.contains("IP: 10.0.0.7"));
        assert!(prompt.contains("Risk score: 35 (MEDIUM)"));
        assert!(prompt.contains("Detected factors: New Device"));
        assert!(prompt.contains("human or a script"));
    }
}
