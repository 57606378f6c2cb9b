use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

pub const STATE_LEN: usize = 16;
pub const STATE_TTL: Duration = Duration::from_secs(600);
pub const MAX_OUTSTANDING: usize = 10_000;

/// Issues login state tokens and remembers them until they are redeemed or expire.
pub struct StateLedger {
    rng: Mutex<StdRng>,
    issued: Mutex<HashMap<String, Instant>>,
    ttl: Duration,
    capacity: usize,
}

impl Default for StateLedger {
    fn default() -> Self {
        Self::new(STATE_TTL)
    }
}

impl StateLedger {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, MAX_OUTSTANDING)
    }

    /// Once `capacity` states are outstanding, issuing another evicts the oldest.
    pub fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            issued: Mutex::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..STATE_LEN)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect()
    }

    pub fn issue(&self) -> String {
        let state = self.generate();
        let mut issued = self.issued.lock().unwrap_or_else(PoisonError::into_inner);
        let ttl = self.ttl;
        issued.retain(|_, at| at.elapsed() < ttl);
        while issued.len() >= self.capacity {
            let Some(oldest) = issued
                .iter()
                .min_by_key(|(_, at)| **at)
                .map(|(s, _)| s.clone())
            else {
                break;
            };
            issued.remove(&oldest);
        }
        issued.insert(state.clone(), Instant::now());
        state
    }

    /// Removes `state` from the ledger. Returns false if it was never issued or has expired.
    pub fn consume(&self, state: &str) -> bool {
        let mut issued = self.issued.lock().unwrap_or_else(PoisonError::into_inner);
        match issued.remove(state) {
            Some(at) => at.elapsed() < self.ttl,
            None => false,
        }
    }

    pub fn outstanding(&self) -> usize {
        self.issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
