pub mod tags;
pub mod types;

pub use tags::{PersonaInfo, PersonaTags, Tone, TopicArea, UnknownLabel, UrgencyClass};
pub use types::{DraftResult, SafetyStage, SafetyVerdict, ScenarioClass};
