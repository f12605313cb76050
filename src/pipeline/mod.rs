//! Training pipeline abstractions
//!
//! This module provides:
//! - A pipeline that plays episodes of any [`EpisodicEnvironment`]
//! - Observers for progress, metrics and JSONL export
//! - A mutex-shared agent handle and a random baseline
//!
//! [`EpisodicEnvironment`]: crate::ports::EpisodicEnvironment

pub mod agents;
pub mod observers;
pub mod training;

pub use agents::{RandomAgent, SharedAgent};
pub use observers::{
    EpisodeObservation, JsonlObserver, MetricsObserver, ProgressObserver, TurnObservation,
};
pub use training::{EpisodeSummary, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Agent, Observer};
