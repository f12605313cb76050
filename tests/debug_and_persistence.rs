//! Debug diagnostics and persistence through the app container.

mod common;

use common::Corridor;
use qlearner::{
    Phase, QLearnAgent,
    adapters::{InMemoryRepository, MsgPackRepository},
    app::{AgentConfig, App},
    pipeline::{
        EpisodeObservation, JsonlObserver, ProgressObserver, TrainingConfig, TrainingPipeline,
    },
};
use tempfile::TempDir;

fn config(num_training: usize) -> AgentConfig {
    AgentConfig::default()
        .with_alpha(0.5)
        .with_epsilon(0.2)
        .with_gamma(0.8)
        .with_num_training(num_training)
        .with_seed(17)
}

fn run(agent: &mut QLearnAgent, episodes: usize) -> Vec<f64> {
    let mut env = Corridor::new(6, 3, 25);
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_episodes: episodes,
        max_steps_per_episode: None,
        seed: None,
    });
    let result = pipeline.run(agent, &mut env).unwrap();
    vec![result.average_score, result.average_steps]
}

#[test]
fn test_debug_output_does_not_change_behavior() {
    let app = App::new();
    let mut quiet = app.create_agent(config(30)).unwrap();
    let mut noisy = app.create_agent(config(30).with_debug(true)).unwrap();
    assert!(noisy.is_debug());

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();

    let quiet_stats = run(&mut quiet, 30);
    let noisy_stats = tracing::subscriber::with_default(subscriber, || run(&mut noisy, 30));

    assert_eq!(quiet_stats, noisy_stats);
    assert_eq!(quiet.q_table().entries(), noisy.q_table().entries());
    assert_eq!(quiet.phase(), noisy.phase());
}

#[test]
fn test_save_and_resume_training() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agent.msgpack");
    let app = App::for_testing()
        .with_repository(MsgPackRepository::new())
        .build();

    let mut agent = app.create_agent(config(20)).unwrap();
    run(&mut agent, 10);
    app.save_agent(&agent, &path).unwrap();

    let mut restored = app.load_agent(&path).unwrap();
    assert_eq!(restored.episodes_so_far(), 10);
    assert_eq!(restored.phase(), Phase::Training);
    assert_eq!(restored.q_table().entries(), agent.q_table().entries());
    assert_eq!(restored.rng_seed(), Some(17));

    run(&mut restored, 10);
    assert_eq!(restored.episodes_so_far(), 20);
    assert_eq!(restored.phase(), Phase::Evaluation);
    assert_eq!(restored.alpha(), 0.0);
}

#[test]
fn test_frozen_agent_stays_frozen_after_reload() {
    let repo = InMemoryRepository::new();
    let app = App::for_testing().with_repository(repo.clone()).build();
    let path = std::path::Path::new("memory/frozen.msgpack");

    let mut agent = app.create_agent(config(5)).unwrap();
    run(&mut agent, 5);
    app.save_agent(&agent, path).unwrap();
    assert!(repo.contains(path));

    let mut restored = app.load_agent(path).unwrap();
    assert_eq!(restored.phase(), Phase::Evaluation);
    assert_eq!(restored.epsilon(), 0.0);
    assert!(restored.set_alpha(0.3).is_err());
}

#[test]
fn test_config_file_drives_agent_creation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agent.json");
    std::fs::write(&path, r#"{"alpha": 0.4, "num_training": 0}"#).unwrap();

    let config = AgentConfig::from_json_file(&path).unwrap();
    let agent = App::new().create_agent(config).unwrap();

    // Zero training episodes means the agent starts out exploiting.
    assert_eq!(agent.phase(), Phase::Evaluation);
    assert_eq!(agent.alpha(), 0.0);
    assert_eq!(agent.gamma(), 0.8);
}

#[test]
fn test_observers_record_training_run() {
    let dir = TempDir::new().unwrap();
    let jsonl = dir.path().join("episodes.jsonl");

    let mut agent = App::new().create_agent(config(4)).unwrap();
    let mut env = Corridor::new(6, 3, 25);
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_episodes: 4,
        max_steps_per_episode: Some(10),
        seed: None,
    })
    .with_observer(Box::new(ProgressObserver::new()))
    .with_observer(Box::new(JsonlObserver::new(&jsonl).unwrap()));

    let result = pipeline.run(&mut agent, &mut env).unwrap();
    let result_path = dir.path().join("result.json");
    result.save(&result_path).unwrap();

    let contents = std::fs::read_to_string(&jsonl).unwrap();
    let episodes: Vec<EpisodeObservation> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(episodes.len(), 4);
    for (index, episode) in episodes.iter().enumerate() {
        assert_eq!(episode.episode, index);
        assert!(!episode.turns.is_empty());
        assert!(episode.turns.len() <= 10);
    }

    let total_turns: usize = episodes.iter().map(|e| e.turns.len()).sum();
    assert_eq!(result.average_steps, total_turns as f64 / 4.0);
    assert_eq!(
        qlearner::pipeline::TrainingResult::load(&result_path).unwrap(),
        result
    );
}
