pub mod orchestrator;

pub use orchestrator::{FetchOrchestrator, RefreshOutcome};
