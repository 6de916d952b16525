//! Embedded prompt and refusal text
//!
//! All generation-facing text ships inside the binary so a deployment
//! never depends on template files being present at runtime.

use safety_engine::table::{RuleHit, RuleTable};
use shared_types::{PersonaInfo, SafetyVerdict, ScenarioClass};

/// System prompt framing the style-imitation task
pub const PHYSICIAN_SYSTEM_PROMPT: &str = "\
You draft reply emails on behalf of a physician, writing in that physician's \
personal style. You will be shown example replies the physician has written to \
other patients. Match their tone, structure, typical length, greeting, and \
sign-off.

Write only the body of the reply email. Do not add a subject line, and do not \
invent clinical details that are not supported by the patient's message or the \
examples.";

/// Safety clauses attached to every generation request
pub const SAFETY_POLICY_CLAUSES: &[&str] = &[
    "Never state or imply a definitive diagnosis. When discussing possibilities, \
     use 'your symptoms are consistent with' phrasing.",
    "Never give a specific medication dose or quantity. Direct the patient to \
     their prescription label or pharmacist for dosing questions.",
    "If anything in the message could describe an emergency, tell the patient to \
     call 911 or go to the nearest emergency room instead of offering an \
     appointment.",
    "Always end with a concrete next step the patient can take.",
    "Do not promise outcomes or guarantee that a treatment will work.",
];

/// Prepended to the system prompt when a draft must be regenerated
pub const REINFORCEMENT_PREFIX: &str = "\
REVISION REQUIRED: the previous draft violated the output policy. Rewrite the \
reply, fixing every issue listed in the safety clauses marked REVISION, and \
keep the rest of the content intact.";

/// Refusal shown when the pre-check classifies a message as an emergency
pub const EMERGENCY_REFUSAL_TEMPLATE: &str = "\
Thank you for reaching out. What you describe needs faster attention than \
email can provide, so we are not sending a routine reply. Please act on the \
guidance below right now:";

/// Refusal shown when the pre-check detects a self-harm crisis
pub const CRISIS_REFUSAL_TEMPLATE: &str = "\
Thank you for trusting us with this message. What you are describing deserves \
immediate, person-to-person support that email cannot give you:";

/// Standard disclaimer sentence personas are nudged toward
pub const DEFAULT_DISCLAIMER: &str = "\
This message is for general guidance and is not medical advice; if your \
symptoms change or worsen, contact our office or call 911.";

/// Get an embedded template by name
pub fn get_template(name: &str) -> Option<&'static str> {
    match name {
        "physician_system" => Some(PHYSICIAN_SYSTEM_PROMPT),
        "reinforcement_prefix" => Some(REINFORCEMENT_PREFIX),
        "emergency_refusal" => Some(EMERGENCY_REFUSAL_TEMPLATE),
        "crisis_refusal" => Some(CRISIS_REFUSAL_TEMPLATE),
        "default_disclaimer" => Some(DEFAULT_DISCLAIMER),
        _ => None,
    }
}

/// List all embedded template names
pub fn template_names() -> Vec<&'static str> {
    vec![
        "physician_system",
        "reinforcement_prefix",
        "emergency_refusal",
        "crisis_refusal",
        "default_disclaimer",
    ]
}

/// Compose the refusal email for a blocking pre-check verdict.
///
/// The body is the stage template for the verdict's class followed by
/// the guidance line of every triggered rule, deduplicated in verdict
/// order.
pub fn refusal_message(
    verdict: &SafetyVerdict,
    table: &RuleTable,
    persona: Option<&PersonaInfo>,
) -> String {
    let base = match verdict.classification {
        ScenarioClass::Blocked => CRISIS_REFUSAL_TEMPLATE,
        _ => EMERGENCY_REFUSAL_TEMPLATE,
    };

    let mut guidance: Vec<&'static str> = Vec::new();
    for reason in &verdict.reasons {
        if let Some(rule) = table.rule(reason) {
            if !guidance.contains(&rule.guidance) {
                guidance.push(rule.guidance);
            }
        }
    }

    let mut message = String::from(base);
    message.push('\n');
    for line in &guidance {
        message.push_str("\n- ");
        message.push_str(line);
    }
    message.push_str(
        "\n\nEmail replies are not monitored quickly enough for situations like \
         this. Once you have been seen, we are glad to follow up here.\n\n",
    );
    match persona {
        Some(info) => {
            message.push_str("The office of ");
            message.push_str(&info.display_name);
        }
        None => message.push_str("Your care team"),
    }
    message
}

/// Revision clauses derived from post-check rule hits, one per distinct
/// violation
pub fn reinforcement_clauses(hits: &[RuleHit]) -> Vec<String> {
    let mut clauses: Vec<String> = Vec::new();
    for hit in hits {
        let clause = match &hit.term {
            Some(term) => format!(
                "REVISION: {} The previous draft contained {:?}.",
                hit.guidance, term
            ),
            None => format!("REVISION: {}", hit.guidance),
        };
        if !clauses.contains(&clause) {
            clauses.push(clause);
        }
    }
    clauses
}
