//! Service layer: the calculators and the assistant orchestration.
//!
//! Each service is a stateless function over explicit inputs. The HTTP layer
//! and the chat assistant both call into this module; nothing here touches
//! the network or global state.

pub mod assistant;
pub mod laytime;
pub mod stages;

#[cfg(test)]
#[path = "laytime_tests.rs"]
mod laytime_tests;

pub use assistant::{route_intent, run_agent, AgentReply, Intent};
pub use laytime::evaluate_laytime;
pub use stages::{stage_guidance, StageGuidance, VoyageStage};
