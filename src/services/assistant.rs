//! Intent routing and reply composition.
//!
//! Free-text messages are matched against keyword lists (first hit wins) and
//! dispatched to the matching calculator; anything unmatched falls back to
//! the document knowledge base. Calculator errors surface as short
//! human-readable replies and never escape the call.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::laytime::{ExclusionWindow, LaytimeRequest};
use crate::ports::PortsRegistry;
use crate::retrieval::KnowledgeRepository;
use crate::services::laytime::evaluate_laytime;
use crate::services::stages::VoyageStage;

/// Which calculator a message is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Laytime,
    Distance,
    Stage,
    Knowledge,
}

/// Reply returned to the presentation layer.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AgentReply {
    pub reply: String,
    pub citations: Vec<String>,
}

impl AgentReply {
    fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            citations: Vec::new(),
        }
    }
}

/// Route a message to a calculator by keyword, first hit wins.
pub fn route_intent(message: &str) -> Intent {
    let m = message.to_lowercase();
    if ["laytime", "demurrage", "despatch"].iter().any(|k| m.contains(k)) {
        return Intent::Laytime;
    }
    if ["distance", "nm", "route"].iter().any(|k| m.contains(k)) {
        return Intent::Distance;
    }
    if ["stage", "pre-fixture", "post-fixture", "loading", "discharge"]
        .iter()
        .any(|k| m.contains(k))
    {
        return Intent::Stage;
    }
    Intent::Knowledge
}

struct Patterns {
    arrived: Regex,
    completed: Regex,
    allowed: Regex,
    exclusion: Regex,
    distance: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        arrived: Regex::new(r"arrived\s+(\d{4}-\d{2}-\d{2} \d{2}:\d{2})").expect("valid pattern"),
        completed: Regex::new(r"completed\s+(\d{4}-\d{2}-\d{2} \d{2}:\d{2})")
            .expect("valid pattern"),
        allowed: Regex::new(r"allowed\s+(-?\d+(?:\.\d+)?)").expect("valid pattern"),
        exclusion: Regex::new(
            r"excluding\s+(\d{4}-\d{2}-\d{2} \d{2}:\d{2})\s+to\s+(\d{4}-\d{2}-\d{2} \d{2}:\d{2})",
        )
        .expect("valid pattern"),
        distance: Regex::new(r"distance\s+([a-z \-]+?)\s+to\s+([a-z \-]+)").expect("valid pattern"),
    })
}

/// Pull a structured laytime request out of a chat message, if all the
/// mandatory parts (`arrived`, `completed`, `allowed`) are present.
/// `excluding <ts> to <ts>` clauses become exclusion windows.
pub(crate) fn extract_laytime_request(message: &str) -> Option<LaytimeRequest> {
    let p = patterns();
    let arrival = p.arrived.captures(message)?.get(1)?.as_str().to_string();
    let completion = p.completed.captures(message)?.get(1)?.as_str().to_string();
    let allowed_days: f64 = p.allowed.captures(message)?.get(1)?.as_str().parse().ok()?;
    let exclusions = p
        .exclusion
        .captures_iter(message)
        .map(|c| ExclusionWindow::new(&c[1], &c[2]))
        .collect();
    Some(LaytimeRequest {
        arrival,
        completion,
        allowed_days,
        exclusions,
    })
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run one assistant turn: route the message and produce a reply.
///
/// Collaborators are passed in explicitly; the function holds no state of
/// its own and may run concurrently with any number of other turns.
pub async fn run_agent(
    ports: &PortsRegistry,
    knowledge: &dyn KnowledgeRepository,
    message: &str,
) -> AgentReply {
    match route_intent(message) {
        Intent::Laytime => laytime_reply(message),
        Intent::Distance => distance_reply(ports, message),
        Intent::Stage => stage_reply(message),
        Intent::Knowledge => knowledge_reply(knowledge, message).await,
    }
}

fn laytime_reply(message: &str) -> AgentReply {
    let Some(request) = extract_laytime_request(message) else {
        return AgentReply::text(
            "Provide: arrived <YYYY-MM-DD HH:MM>, completed <YYYY-MM-DD HH:MM>, allowed <days>.",
        );
    };
    match evaluate_laytime(&request) {
        Ok(result) => AgentReply::text(format!(
            "Laytime result:\n\
             - Gross: {} h, Exclusions: {} h\n\
             - Used: {} h vs Allowed: {} h\n\
             - Balance: {} h => **{}**",
            result.gross_hours,
            result.excluded_hours,
            result.used_hours,
            result.allowed_hours,
            result.balance_hours,
            result.status.to_string().to_uppercase(),
        )),
        Err(err) => AgentReply::text(err.to_string()),
    }
}

fn distance_reply(ports: &PortsRegistry, message: &str) -> AgentReply {
    let lowered = message.to_lowercase();
    let Some(caps) = patterns().distance.captures(&lowered) else {
        return AgentReply::text(
            "Say: distance <PORT A> to <PORT B> (e.g., distance Singapore to Rotterdam).",
        );
    };
    let from = caps[1].trim().to_string();
    let to = caps[2].trim().to_string();
    match ports.distance_nm(&from, &to) {
        Ok(nm) => AgentReply::text(format!(
            "Great-circle distance {} to {}: **{} nm** (no routing/canals).",
            title_case(&from),
            title_case(&to),
            nm
        )),
        Err(err) => AgentReply::text(err.to_string()),
    }
}

fn stage_reply(message: &str) -> AgentReply {
    let last_word = message
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .trim_end_matches(['.', '?', '!']);
    match last_word.parse::<VoyageStage>() {
        Ok(stage) => {
            let bullets = stage
                .suggested_documents()
                .iter()
                .map(|item| format!("- {}", item))
                .collect::<Vec<_>>()
                .join("\n");
            AgentReply::text(format!(
                "**{} stage - suggested documents:**\n{}",
                title_case(stage.as_str()),
                bullets
            ))
        }
        Err(_) => AgentReply::text("Stages I know: pre-fixture, post-fixture, loading, discharge."),
    }
}

async fn knowledge_reply(knowledge: &dyn KnowledgeRepository, message: &str) -> AgentReply {
    match knowledge.query(message, 4).await {
        Ok(snippets) if !snippets.is_empty() => {
            let reply = snippets
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            let mut citations = Vec::new();
            for snippet in &snippets {
                if !citations.contains(&snippet.source) {
                    citations.push(snippet.source.clone());
                }
            }
            AgentReply { reply, citations }
        }
        Ok(_) => AgentReply::text(
            "No matching documents in the knowledge base yet. \
             Upload charter parties or statements of fact via /v1/ingest.",
        ),
        Err(err) => AgentReply::text(format!("Knowledge base unavailable: {}", err)),
    }
}
