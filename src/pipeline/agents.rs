//! Agent wrappers and baselines for pipelines

use std::sync::{Arc, Mutex, MutexGuard};

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    ports::{Agent, Environment},
    q_learning::QLearnAgent,
    types::Action,
};

/// Shared Q-learning agent handle
///
/// Several callers can drive one table through clones of this handle. Each
/// turn holds the lock across update and selection, so a selection never
/// sees a half-applied update.
#[derive(Clone)]
pub struct SharedAgent {
    agent: Arc<Mutex<QLearnAgent>>,
    name: String,
}

impl SharedAgent {
    pub fn new(agent: QLearnAgent) -> Self {
        let name = Agent::name(&agent).to_string();
        Self {
            agent: Arc::new(Mutex::new(agent)),
            name,
        }
    }

    /// Get a clone of the shared agent reference
    pub fn clone_ref(&self) -> Arc<Mutex<QLearnAgent>> {
        Arc::clone(&self.agent)
    }

    /// Lock the agent for direct inspection.
    pub fn lock(&self) -> Result<MutexGuard<'_, QLearnAgent>> {
        self.agent.lock().map_err(|_| Error::LockPoisoned {
            name: self.name.clone(),
        })
    }
}

impl Agent for SharedAgent {
    fn act(&mut self, env: &dyn Environment) -> Result<Action> {
        self.lock()?.on_turn(env)
    }

    fn episode_start(&mut self) -> Result<()> {
        self.lock()?.begin_episode();
        Ok(())
    }

    fn episode_end(&mut self, env: &dyn Environment) -> Result<()> {
        self.lock()?.on_episode_end(env)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.lock()?.set_rng_seed(seed)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Uniformly random baseline; `Stop` is never chosen.
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a new random agent
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random agent with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, env: &dyn Environment) -> Result<Action> {
        let legal: Vec<Action> = env
            .legal_actions()
            .into_iter()
            .filter(|action| !action.is_stop())
            .collect();
        if legal.is_empty() {
            return Err(Error::NoLegalActions {
                state: format!("{:?}", env.snapshot()),
            });
        }
        let index = self.rng.random_range(0..legal.len());
        Ok(legal[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
