//! Observer implementations for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the training loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    pipeline::training::{EpisodeSummary, TrainingResult},
    ports::Observer,
    types::{Action, Outcome},
};

/// One turn of an observed episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnObservation {
    pub step: usize,
    pub action: Action,
    pub score: f64,
}

/// Complete observation of an episode, one JSONL line each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeObservation {
    pub episode: usize,
    pub outcome: Option<Outcome>,
    pub final_score: f64,
    pub turns: Vec<TurnObservation>,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("W:{} L:{}", self.wins, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        match summary.outcome {
            Some(Outcome::Win) => self.wins += 1,
            Some(Outcome::Loss) => self.losses += 1,
            None => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    summaries: Vec<EpisodeSummary>,
    turns: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary of every episode observed so far
    pub fn summary(&self) -> TrainingResult {
        TrainingResult::from_summaries(&self.summaries)
    }

    /// Turns observed across all episodes
    pub fn total_turns(&self) -> usize {
        self.turns
    }

    /// Scores of the most recent `window` episodes, oldest first
    pub fn recent_scores(&self, window: usize) -> Vec<f64> {
        let start = self.summaries.len().saturating_sub(window);
        self.summaries[start..].iter().map(|s| s.score).collect()
    }
}

impl Observer for MetricsObserver {
    fn on_turn(&mut self, _episode: usize, _step: usize, _action: Action, _score: f64) -> Result<()> {
        self.turns += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}

/// JSONL observer - Exports episodes to JSON Lines format
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_turns: Vec<TurnObservation>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_turns: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_turns.clear();
        Ok(())
    }

    fn on_turn(&mut self, _episode: usize, step: usize, action: Action, score: f64) -> Result<()> {
        self.current_turns.push(TurnObservation {
            step,
            action,
            score,
        });
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        let observation = EpisodeObservation {
            episode: summary.episode,
            outcome: summary.outcome,
            final_score: summary.score,
            turns: std::mem::take(&mut self.current_turns),
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn summary(episode: usize, outcome: Option<Outcome>, score: f64) -> EpisodeSummary {
        EpisodeSummary {
            episode,
            outcome,
            score,
            steps: 3,
        }
    }

    #[test]
    fn test_metrics_observer_counts() {
        let mut metrics = MetricsObserver::new();
        metrics.on_turn(0, 0, Action::East, 0.0).unwrap();
        metrics.on_turn(0, 1, Action::East, -1.0).unwrap();
        metrics
            .on_episode_end(&summary(0, Some(Outcome::Win), 8.0))
            .unwrap();
        metrics
            .on_episode_end(&summary(1, Some(Outcome::Loss), -4.0))
            .unwrap();
        metrics.on_episode_end(&summary(2, None, 1.0)).unwrap();

        let result = metrics.summary();
        assert_eq!(result.total_episodes, 3);
        assert_eq!(result.wins, 1);
        assert_eq!(result.losses, 1);
        assert_eq!(result.truncated, 1);
        assert_eq!(metrics.total_turns(), 2);
        assert_eq!(metrics.recent_scores(2), vec![-4.0, 1.0]);
    }

    #[test]
    fn test_progress_message_labels_wins_and_losses() {
        let mut progress = ProgressObserver::new();
        progress
            .on_episode_end(&summary(0, Some(Outcome::Win), 8.0))
            .unwrap();
        progress
            .on_episode_end(&summary(1, Some(Outcome::Loss), -4.0))
            .unwrap();
        progress
            .on_episode_end(&summary(2, Some(Outcome::Win), 6.0))
            .unwrap();
        assert_eq!(progress.message(), "W:2 L:1");
    }

    #[test]
    fn test_jsonl_observer_writes_one_line_per_episode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("episodes.jsonl");

        let mut observer = JsonlObserver::new(&path).unwrap();
        for episode in 0..2 {
            observer.on_episode_start(episode).unwrap();
            observer.on_turn(episode, 0, Action::North, 0.0).unwrap();
            observer
                .on_episode_end(&summary(episode, Some(Outcome::Win), 5.0))
                .unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: EpisodeObservation = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.episode, 1);
        assert_eq!(parsed.outcome, Some(Outcome::Win));
        assert_eq!(parsed.turns.len(), 1);
        assert_eq!(parsed.turns[0].action, Action::North);
    }
}
