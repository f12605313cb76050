//! Q-learning agent driving the per-turn and end-of-episode cycles
//!
//! Each turn the agent encodes what it sees, credits the previous move with
//! the score change since then, and picks the next move ε-greedily. At the end
//! of an episode it credits the last move against a terminal successor. Once
//! the configured number of training episodes has been played, the learning
//! rate and exploration rate drop to zero for good.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    ports::{Agent, Environment},
    q_learning::{
        policy::EpsilonGreedy,
        q_table::QTable,
        state_key::StateKey,
        update::{Successor, TdStep, TemporalDifference},
    },
    types::Action,
};

/// Learning parameters supplied at construction.
///
/// `alpha` and `epsilon` change at runtime (both end at zero once training
/// completes); `gamma` and `num_training` are fixed for the agent's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Learning rate α (≥ 0)
    pub alpha: f64,
    /// Exploration rate ε in [0, 1]
    pub epsilon: f64,
    /// Discount factor γ in [0, 1]
    pub gamma: f64,
    /// Number of training episodes before the policy is frozen
    pub num_training: usize,
}

impl Hyperparameters {
    pub const DEFAULT_ALPHA: f64 = 0.2;
    pub const DEFAULT_EPSILON: f64 = 0.05;
    pub const DEFAULT_GAMMA: f64 = 0.8;
    pub const DEFAULT_NUM_TRAINING: usize = 10;

    /// Create validated hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when any rate is out of range.
    pub fn new(alpha: f64, epsilon: f64, gamma: f64, num_training: usize) -> Result<Self> {
        let params = Self {
            alpha,
            epsilon,
            gamma,
            num_training,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every rate against its valid range.
    pub fn validate(&self) -> Result<()> {
        validate_alpha(self.alpha)?;
        validate_epsilon(self.epsilon)?;
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(Error::InvalidConfiguration {
                message: format!("gamma must be within [0, 1], got {}", self.gamma),
            });
        }
        Ok(())
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            epsilon: Self::DEFAULT_EPSILON,
            gamma: Self::DEFAULT_GAMMA,
            num_training: Self::DEFAULT_NUM_TRAINING,
        }
    }
}

fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha.is_finite() && alpha >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("alpha must be finite and non-negative, got {alpha}"),
        })
    }
}

fn validate_epsilon(epsilon: f64) -> Result<()> {
    if (0.0..=1.0).contains(&epsilon) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("epsilon must be within [0, 1], got {epsilon}"),
        })
    }
}

/// The move currently waiting for its reward.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: StateKey,
    pub action: Action,
    pub score: f64,
}

/// Where the agent is within the current episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeState {
    /// No move has been made yet; the next turn has nothing to credit.
    AwaitingFirstMove,
    /// A move is in flight and will be credited on the next turn.
    Stepping,
}

/// Whether the agent is still learning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Training,
    Evaluation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AgentState {
    pub name: String,
    pub params: Hyperparameters,
    pub episodes_so_far: usize,
    pub phase: Phase,
    pub rng_seed: Option<u64>,
    pub debug: bool,
}

/// Tabular Q-learning agent
///
/// Owns its table; nothing is global. The in-flight transition is cleared at
/// every episode boundary, so an episode interrupted before
/// [`QLearnAgent::on_episode_end`] simply leaves its last move unlearned.
#[derive(Debug, Clone)]
pub struct QLearnAgent {
    name: String,
    q_table: QTable,
    policy: EpsilonGreedy,
    td: TemporalDifference,
    alpha: f64,
    epsilon: f64,
    num_training: usize,
    episodes_so_far: usize,
    phase: Phase,
    in_flight: Option<Transition>,
    debug: bool,
}

impl QLearnAgent {
    /// Create a new agent from validated hyperparameters
    ///
    /// With `num_training == 0` no training is requested, so the agent starts
    /// out frozen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when any rate is out of range,
    /// including parameters built as a struct literal.
    pub fn new(params: Hyperparameters) -> Result<Self> {
        params.validate()?;
        let mut agent = Self {
            name: "Q-Learning".to_string(),
            q_table: QTable::new(),
            policy: EpsilonGreedy::new(),
            td: TemporalDifference::new(params.gamma),
            alpha: params.alpha,
            epsilon: params.epsilon,
            num_training: params.num_training,
            episodes_so_far: 0,
            phase: Phase::Training,
            in_flight: None,
            debug: false,
        };
        if params.num_training == 0 {
            agent.freeze();
        }
        Ok(agent)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.policy.reseed(Some(seed));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Emit per-turn diagnostics through `tracing` at debug level.
    ///
    /// Purely observational: actions and learned values are the same either way.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Play one turn: learn from the previous move, then choose the next one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] if the environment offers nothing
    /// but `Stop`. The table and the in-flight move are left untouched.
    pub fn on_turn<E: Environment + ?Sized>(&mut self, env: &E) -> Result<Action> {
        let state = StateKey::observe(env);
        let legal = state.legal_actions().to_vec();
        let score = env.score();

        if legal.is_empty() {
            return Err(Error::NoLegalActions {
                state: state.to_string(),
            });
        }

        if self.debug {
            debug!(
                agent = %self.name,
                legal = ?legal,
                position = %state.agent(),
                adversaries = ?state.adversaries(),
                targets = ?state.targets(),
                score,
                "observed turn"
            );
        }

        self.q_table.ensure_initialized(&state, &legal);

        if let Some(prev) = &self.in_flight {
            let step = self.td.update(
                &mut self.q_table,
                &prev.state,
                prev.action,
                score - prev.score,
                Successor::State {
                    state: &state,
                    legal_actions: &legal,
                },
                self.alpha,
            )?;
            self.trace_update(prev.action, &step);
        }

        let action = self
            .policy
            .select(&self.q_table, &state, &legal, self.epsilon)?;
        self.in_flight = Some(Transition {
            state,
            action,
            score,
        });
        Ok(action)
    }

    /// Finish the episode: credit the last move, count the episode, and
    /// freeze the policy once the training budget is spent.
    pub fn on_episode_end<E: Environment + ?Sized>(&mut self, env: &E) -> Result<()> {
        if let Some(prev) = self.in_flight.take() {
            let step = self.td.update(
                &mut self.q_table,
                &prev.state,
                prev.action,
                env.score() - prev.score,
                Successor::Terminal,
                self.alpha,
            )?;
            self.trace_update(prev.action, &step);
        }

        self.episodes_so_far += 1;
        info!(
            agent = %self.name,
            episode = self.episodes_so_far,
            score = env.score(),
            states = self.q_table.num_states(),
            "episode finished"
        );

        if self.episodes_so_far == self.num_training {
            self.freeze();
            info!(
                agent = %self.name,
                episodes = self.episodes_so_far,
                "training done, alpha and epsilon set to zero"
            );
        }
        Ok(())
    }

    /// Drop any in-flight transition without learning from it.
    ///
    /// Call when a new episode starts after the previous one was abandoned.
    pub fn begin_episode(&mut self) {
        self.in_flight = None;
    }

    fn freeze(&mut self) {
        self.alpha = 0.0;
        self.epsilon = 0.0;
        self.phase = Phase::Evaluation;
    }

    fn trace_update(&self, action: Action, step: &TdStep) {
        if self.debug {
            debug!(
                agent = %self.name,
                %action,
                previous = step.previous,
                target = step.target,
                updated = step.updated,
                "applied update"
            );
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Change the learning rate while still training.
    ///
    /// # Errors
    ///
    /// Rejects out-of-range values, and any change once the policy is frozen.
    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        self.ensure_training("alpha")?;
        validate_alpha(alpha)?;
        self.alpha = alpha;
        Ok(())
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Change the exploration rate while still training.
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        self.ensure_training("epsilon")?;
        validate_epsilon(epsilon)?;
        self.epsilon = epsilon;
        Ok(())
    }

    fn ensure_training(&self, parameter: &str) -> Result<()> {
        match self.phase {
            Phase::Training => Ok(()),
            Phase::Evaluation => Err(Error::InvalidConfiguration {
                message: format!("cannot change {parameter} after training has finished"),
            }),
        }
    }

    pub fn gamma(&self) -> f64 {
        self.td.discount_factor()
    }

    pub fn num_training(&self) -> usize {
        self.num_training
    }

    pub fn episodes_so_far(&self) -> usize {
        self.episodes_so_far
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn episode_state(&self) -> EpisodeState {
        if self.in_flight.is_some() {
            EpisodeState::Stepping
        } else {
            EpisodeState::AwaitingFirstMove
        }
    }

    pub fn in_flight(&self) -> Option<&Transition> {
        self.in_flight.as_ref()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.policy.seed()
    }

    /// Current hyperparameters (rates reflect any runtime changes).
    pub fn hyperparameters(&self) -> Hyperparameters {
        Hyperparameters {
            alpha: self.alpha,
            epsilon: self.epsilon,
            gamma: self.gamma(),
            num_training: self.num_training,
        }
    }

    pub(crate) fn export_state(&self) -> AgentState {
        AgentState {
            name: self.name.clone(),
            params: self.hyperparameters(),
            episodes_so_far: self.episodes_so_far,
            phase: self.phase,
            rng_seed: self.policy.seed(),
            debug: self.debug,
        }
    }

    pub(crate) fn from_state(state: AgentState, q_table: QTable) -> Self {
        Self {
            name: state.name,
            q_table,
            policy: EpsilonGreedy::from_seed(state.rng_seed),
            td: TemporalDifference::new(state.params.gamma),
            alpha: state.params.alpha,
            epsilon: state.params.epsilon,
            num_training: state.params.num_training,
            episodes_so_far: state.episodes_so_far,
            phase: state.phase,
            in_flight: None,
            debug: state.debug,
        }
    }
}

impl Agent for QLearnAgent {
    fn act(&mut self, env: &dyn Environment) -> Result<Action> {
        self.on_turn(env)
    }

    fn episode_start(&mut self) -> Result<()> {
        self.begin_episode();
        Ok(())
    }

    fn episode_end(&mut self, env: &dyn Environment) -> Result<()> {
        self.on_episode_end(env)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.policy.reseed(Some(seed));
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
