//! Charter-party voyage stage guidance.
//!
//! Static lookup of the documents worth having ready at each stage of a
//! voyage charter, from fixture negotiation through discharge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Voyage stages the assistant can advise on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoyageStage {
    PreFixture,
    PostFixture,
    Loading,
    Discharge,
}

impl VoyageStage {
    pub const ALL: [VoyageStage; 4] = [
        VoyageStage::PreFixture,
        VoyageStage::PostFixture,
        VoyageStage::Loading,
        VoyageStage::Discharge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoyageStage::PreFixture => "pre-fixture",
            VoyageStage::PostFixture => "post-fixture",
            VoyageStage::Loading => "loading",
            VoyageStage::Discharge => "discharge",
        }
    }

    /// Suggested documents to have in hand at this stage.
    pub fn suggested_documents(&self) -> &'static [&'static str] {
        match self {
            VoyageStage::PreFixture => &[
                "Charter Party draft (GENCON/ASBATANKVOY etc.)",
                "Vessel particulars, P&I, class certificates",
                "Port info & restrictions",
            ],
            VoyageStage::PostFixture => &[
                "Fixture recap, NOR template, SOF template",
                "Bunkers plan, weather routing contact",
            ],
            VoyageStage::Loading => &[
                "NOR, SOF, Cargo docs, Stowage plan",
                "Laytime sheet initiation",
            ],
            VoyageStage::Discharge => &[
                "Discharge orders, Receivers contact, Final SOF",
                "Laytime finalization, Demurrage/Despatch calc",
            ],
        }
    }
}

impl FromStr for VoyageStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pre-fixture" => Ok(Self::PreFixture),
            "post-fixture" => Ok(Self::PostFixture),
            "loading" => Ok(Self::Loading),
            "discharge" => Ok(Self::Discharge),
            _ => Err(format!("Unknown stage: {}", s)),
        }
    }
}

impl fmt::Display for VoyageStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guidance payload returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageGuidance {
    pub stage: String,
    pub suggestions: Vec<String>,
}

/// Look up the suggested documents for a stage.
pub fn stage_guidance(stage: VoyageStage) -> StageGuidance {
    StageGuidance {
        stage: stage.as_str().to_string(),
        suggestions: stage
            .suggested_documents()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}
