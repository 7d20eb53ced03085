//! ACO run parameters.

/// Configuration for an ant colony run.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_alpha(1.0)
///     .with_beta(2.0)
///     .with_evaporation(0.1)
///     .with_rounds(vec![3, 1])
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Pheromone importance exponent. Must be positive.
    pub alpha: f64,

    /// Heuristic importance exponent. Must be positive.
    pub beta: f64,

    /// Deposit constant `Q`. Each tour deposits `Q / cost` on its edges.
    pub deposit: f64,

    /// Evaporation rate `rho` in `[0, 1)`. `0.0` disables evaporation.
    pub evaporation: f64,

    /// Number of ants in each successive round.
    ///
    /// Every round runs against the pheromone left by the previous one.
    pub rounds: Vec<usize>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 2.0,
            deposit: 1.0,
            evaporation: 0.1,
            rounds: vec![3, 1],
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_deposit(mut self, q: f64) -> Self {
        self.deposit = q;
        self
    }

    pub fn with_evaporation(mut self, rho: f64) -> Self {
        self.evaporation = rho;
        self
    }

    pub fn with_rounds(mut self, rounds: Vec<usize>) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.alpha > 0.0 && self.alpha.is_finite()) {
            return Err(format!("alpha must be positive, got {}", self.alpha));
        }
        if !(self.beta > 0.0 && self.beta.is_finite()) {
            return Err(format!("beta must be positive, got {}", self.beta));
        }
        if !(self.deposit > 0.0 && self.deposit.is_finite()) {
            return Err(format!("deposit must be positive, got {}", self.deposit));
        }
        if !(0.0..1.0).contains(&self.evaporation) {
            return Err(format!(
                "evaporation must be in [0, 1), got {}",
                self.evaporation
            ));
        }
        if let Some(round) = self.rounds.iter().position(|&ants| ants == 0) {
            return Err(format!("round {round} has no ants"));
        }
        Ok(())
    }
}
