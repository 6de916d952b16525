//! Persona tag vocabulary shared by ingestion, retrieval, and profiling.
//!
//! Labels mirror the corpus dataset. Unknown labels are rejected at parse
//! time so a typo in an ingested record fails loudly instead of silently
//! skewing tone statistics.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A corpus label that does not match the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} label: {value:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Communication tone attached to a physician reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    Reassuring,
    DataDriven,
    Formal,
    Urgent,
    Empathetic,
    Descriptive,
    Concise,
    Friendly,
    Holistic,
    Firm,
    Supportive,
    Analytical,
    Encouraging,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Reassuring => "reassuring",
            Tone::DataDriven => "data-driven",
            Tone::Formal => "formal",
            Tone::Urgent => "urgent",
            Tone::Empathetic => "empathetic",
            Tone::Descriptive => "descriptive",
            Tone::Concise => "concise",
            Tone::Friendly => "friendly",
            Tone::Holistic => "holistic",
            Tone::Firm => "firm",
            Tone::Supportive => "supportive",
            Tone::Analytical => "analytical",
            Tone::Encouraging => "encouraging",
        }
    }
}

impl FromStr for Tone {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reassuring" => Ok(Tone::Reassuring),
            "data-driven" => Ok(Tone::DataDriven),
            "formal" => Ok(Tone::Formal),
            "urgent" => Ok(Tone::Urgent),
            "empathetic" => Ok(Tone::Empathetic),
            "descriptive" => Ok(Tone::Descriptive),
            "concise" => Ok(Tone::Concise),
            "friendly" => Ok(Tone::Friendly),
            "holistic" => Ok(Tone::Holistic),
            "firm" => Ok(Tone::Firm),
            "supportive" => Ok(Tone::Supportive),
            "analytical" => Ok(Tone::Analytical),
            "encouraging" => Ok(Tone::Encouraging),
            _ => Err(UnknownLabel {
                kind: "tone",
                value: s.to_string(),
            }),
        }
    }
}

/// How quickly the underlying scenario needed attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyClass {
    Routine,
    TimeSensitive,
    Emergency,
}

impl UrgencyClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyClass::Routine => "routine",
            UrgencyClass::TimeSensitive => "time-sensitive",
            UrgencyClass::Emergency => "emergency",
        }
    }
}

impl FromStr for UrgencyClass {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "routine" => Ok(UrgencyClass::Routine),
            "time-sensitive" => Ok(UrgencyClass::TimeSensitive),
            "emergency" => Ok(UrgencyClass::Emergency),
            _ => Err(UnknownLabel {
                kind: "urgency",
                value: s.to_string(),
            }),
        }
    }
}

/// Coarse subject area of the patient message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicArea {
    Administrative,
    Medication,
    Symptom,
    LabResult,
    Lifestyle,
    Emergency,
}

impl TopicArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicArea::Administrative => "administrative",
            TopicArea::Medication => "medication",
            TopicArea::Symptom => "symptom",
            TopicArea::LabResult => "lab-result",
            TopicArea::Lifestyle => "lifestyle",
            TopicArea::Emergency => "emergency",
        }
    }
}

impl FromStr for TopicArea {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "administrative" => Ok(TopicArea::Administrative),
            "medication" => Ok(TopicArea::Medication),
            "symptom" => Ok(TopicArea::Symptom),
            "lab-result" => Ok(TopicArea::LabResult),
            "lifestyle" => Ok(TopicArea::Lifestyle),
            "emergency" => Ok(TopicArea::Emergency),
            _ => Err(UnknownLabel {
                kind: "topic",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaTags {
    pub tone: Tone,
    pub urgency_class: UrgencyClass,
    pub topic: TopicArea,
}

/// Display metadata for one physician persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaInfo {
    pub persona_id: String,
    pub display_name: String,
    pub specialty: String,
}
