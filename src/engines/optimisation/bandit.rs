use crate::config::{ConfigSection, RlParams};
use crate::error::{DesignError, Result};
use crate::types::{Guide, PolicyKey};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Running reward estimate per guide, keyed by `(locus, guide_sequence)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BanditMemory {
    values: HashMap<PolicyKey, f64>,
}

impl BanditMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PolicyKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Value used during exploitation; unseen guides count as 0
    pub fn value_or_default(&self, key: &PolicyKey) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    /// Exponential moving average step, returns the stored value
    pub fn update(&mut self, key: &PolicyKey, reward: f64, learning_rate: f64) -> f64 {
        let entry = self.values.entry(key.clone()).or_insert(0.0);
        *entry += learning_rate * (reward - *entry);
        *entry
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PolicyKey, &f64)> {
        self.values.iter()
    }
}

struct BanditState {
    params: RlParams,
    seed: u64,
    memory: BanditMemory,
    rng: StdRng,
}

/// Epsilon-greedy selector over scored guides.
///
/// All state sits behind one mutex: a selection holds it for its whole draw
/// sequence and each policy update holds it for one read-modify-write, so
/// concurrent feedback never loses an update.
pub struct BanditOptimizer {
    state: Mutex<BanditState>,
}

impl BanditOptimizer {
    pub fn new(params: RlParams, seed: u64) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            state: Mutex::new(BanditState {
                params,
                seed,
                memory: BanditMemory::new(),
                rng: StdRng::seed_from_u64(seed),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, BanditState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn params(&self) -> RlParams {
        self.lock().params
    }

    pub fn seed(&self) -> u64 {
        self.lock().seed
    }

    /// Swap exploration parameters. A changed seed restarts the random stream.
    pub fn reconfigure(&self, params: RlParams, seed: u64) -> Result<()> {
        params.validate()?;
        let mut state = self.lock();
        state.params = params;
        if state.seed != seed {
            state.seed = seed;
            state.rng = StdRng::seed_from_u64(seed);
        }
        Ok(())
    }

    /// Pick up to `top_k` guides without replacement, in the order they were chosen.
    ///
    /// Each pick draws once: below epsilon (or with no memory yet) it takes a
    /// uniformly random remaining guide, otherwise the first guide with the
    /// highest known average reward.
    pub fn optimize_guides(&self, candidates: Vec<Guide>, top_k: usize) -> Vec<Guide> {
        let mut pool = candidates;
        let mut keys: Vec<PolicyKey> = pool.iter().map(Guide::policy_key).collect();
        let picks = top_k.min(pool.len());
        let mut selected = Vec::with_capacity(picks);

        let mut state = self.lock();
        let mut explored = 0usize;

        while selected.len() < picks {
            let draw: f64 = state.rng.gen();
            let index = if draw < state.params.epsilon || state.memory.is_empty() {
                explored += 1;
                state.rng.gen_range(0..pool.len())
            } else {
                best_known(&state.memory, &keys)
            };

            keys.remove(index);
            selected.push(pool.remove(index));
        }

        log::debug!(
            "Bandit selected {} guides ({} explored, {} exploited)",
            selected.len(),
            explored,
            selected.len() - explored
        );

        selected
    }

    /// Move the stored estimate for `key` toward `reward` (expected in [0, 1]).
    pub fn update_policy(&self, key: &PolicyKey, reward: f64) -> Result<f64> {
        if !reward.is_finite() || !(0.0..=1.0).contains(&reward) {
            return Err(DesignError::InvalidFeedback(format!(
                "reward must be within [0, 1], got {}",
                reward
            )));
        }

        let mut state = self.lock();
        let learning_rate = state.params.learning_rate;
        let value = state.memory.update(key, reward, learning_rate);
        log::debug!("Policy update {} -> {:.4}", key, value);
        Ok(value)
    }

    pub fn memory_value(&self, key: &PolicyKey) -> Option<f64> {
        self.lock().memory.get(key)
    }

    pub fn memory_len(&self) -> usize {
        self.lock().memory.len()
    }

    pub fn snapshot(&self) -> BanditMemory {
        self.lock().memory.clone()
    }
}

/// Index of the first key whose value strictly beats everything before it
fn best_known(memory: &BanditMemory, keys: &[PolicyKey]) -> usize {
    let mut best_index = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, key) in keys.iter().enumerate() {
        let value = memory.value_or_default(key);
        if value > best_value {
            best_value = value;
            best_index = i;
        }
    }
    best_index
}
