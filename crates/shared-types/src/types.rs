#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyStage {
    Pre,
    Post,
}

/// Scenario classification, declared in ascending severity so `Ord` and
/// `max` pick the most severe match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioClass {
    Routine,
    Escalate,
    OutOfScope,
    Blocked,
}

impl ScenarioClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioClass::Routine => "routine",
            ScenarioClass::Escalate => "escalate",
            ScenarioClass::OutOfScope => "out_of_scope",
            ScenarioClass::Blocked => "blocked",
        }
    }

    /// Classes that stop generation outright at the pre gate.
    pub fn is_blocking(&self) -> bool {
        matches!(self, ScenarioClass::OutOfScope | ScenarioClass::Blocked)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SafetyVerdict {
    pub stage: SafetyStage,
    pub classification: ScenarioClass,
    pub reasons: Vec<String>, // Triggered rule ids, in rule-table order
}

impl SafetyVerdict {
    pub fn routine(stage: SafetyStage) -> Self {
        Self {
            stage,
            classification: ScenarioClass::Routine,
            reasons: Vec::new(),
        }
    }

    pub fn is_routine(&self) -> bool {
        self.classification == ScenarioClass::Routine
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DraftResult {
    pub draft_text: String,
    pub escalation_flag: bool,
    pub exemplars_used: Vec<String>, // ScenarioRecord ids, retrieval order
    pub safety_verdicts: Vec<SafetyVerdict>,
}

impl DraftResult {
    /// True when the pre gate stopped the request and `draft_text` is a
    /// templated refusal rather than generated output.
    pub fn was_refused(&self) -> bool {
        self.safety_verdicts
            .iter()
            .any(|v| v.stage == SafetyStage::Pre && v.classification.is_blocking())
    }

    /// Serialize to JSON, verdicts included, for the transport/audit layer.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize draft result: {}", e))
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to deserialize draft result: {}", e))
    }
}
