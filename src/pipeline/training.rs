//! Training pipeline driving agents through episodes

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Result,
    ports::{Agent, EpisodicEnvironment, Observer},
    types::Outcome,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes to play
    pub num_episodes: usize,

    /// Turn limit per episode; `None` lets the environment decide alone
    pub max_steps_per_episode: Option<usize>,

    /// Random seed handed to the agent before the first episode
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 100,
            max_steps_per_episode: Some(1_000),
            seed: None,
        }
    }
}

/// What happened in one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode index (0-based)
    pub episode: usize,
    /// Terminal outcome; `None` when the turn limit cut the episode short
    pub outcome: Option<Outcome>,
    /// Final score
    pub score: f64,
    /// Actions taken
    pub steps: usize,
}

impl EpisodeSummary {
    pub fn won(&self) -> bool {
        self.outcome == Some(Outcome::Win)
    }

    pub fn truncated(&self) -> bool {
        self.outcome.is_none()
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub truncated: usize,
    pub win_rate: f64,
    pub average_score: f64,
    pub average_steps: f64,
}

impl TrainingResult {
    /// Aggregate per-episode summaries
    pub fn from_summaries(summaries: &[EpisodeSummary]) -> Self {
        let total_episodes = summaries.len();
        let wins = summaries.iter().filter(|s| s.won()).count();
        let truncated = summaries.iter().filter(|s| s.truncated()).count();
        let losses = total_episodes - wins - truncated;

        let mean = |total: f64| {
            if total_episodes > 0 {
                total / total_episodes as f64
            } else {
                0.0
            }
        };

        Self {
            total_episodes,
            wins,
            losses,
            truncated,
            win_rate: mean(wins as f64),
            average_score: mean(summaries.iter().map(|s| s.score).sum()),
            average_steps: mean(summaries.iter().map(|s| s.steps as f64).sum()),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays episodes of an environment with one agent, notifying observers.
///
/// Per episode: reset the environment and tell the agent a new episode began,
/// ask the agent for an action each turn until the environment reports an
/// outcome (or the turn limit is hit), then tell the agent the episode ended.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run all configured episodes
    pub fn run<E: EpisodicEnvironment>(
        &mut self,
        agent: &mut dyn Agent,
        env: &mut E,
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        let mut summaries = Vec::with_capacity(self.config.num_episodes);
        for episode in 0..self.config.num_episodes {
            let summary = self.play_episode(episode, agent, env)?;
            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }
            summaries.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::from_summaries(&summaries))
    }

    fn play_episode<E: EpisodicEnvironment>(
        &mut self,
        episode: usize,
        agent: &mut dyn Agent,
        env: &mut E,
    ) -> Result<EpisodeSummary> {
        env.reset()?;
        agent.episode_start()?;
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let mut steps = 0;
        while !env.is_terminal() {
            if self
                .config
                .max_steps_per_episode
                .is_some_and(|limit| steps >= limit)
            {
                warn!(
                    agent = agent.name(),
                    episode, steps, "episode hit the turn limit before a terminal state"
                );
                break;
            }

            let score = env.score();
            let action = agent.act(&*env)?;
            for observer in &mut self.observers {
                observer.on_turn(episode, steps, action, score)?;
            }

            env.apply(action)?;
            steps += 1;
        }

        // A cut-short episode still ends for the agent, so its in-flight move
        // is credited with whatever score it reached.
        agent.episode_end(&*env)?;

        Ok(EpisodeSummary {
            episode,
            outcome: env.outcome(),
            score: env.score(),
            steps,
        })
    }
}
