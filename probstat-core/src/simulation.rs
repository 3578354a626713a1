use probstat_common::{ProbStatError, Result, DEFAULT_TRIALS, MAX_TRIALS, MIN_TRIALS};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::figure::{Figure, FigureBar, FigureKind};
use crate::profile::{FrequencyCounter, FrequencyEntry};

/// Fixed label set of a coin flip.
pub const OUTCOMES: [&str; 2] = ["Heads", "Tails"];
const BAR_COLORS: [&str; 2] = ["skyblue", "lightgreen"];
const BAR_WIDTH: f64 = 0.8;

/// Number of simulated trials, always within `[MIN_TRIALS, MAX_TRIALS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TrialCount(u32);

impl TrialCount {
    pub fn new(value: i64) -> Result<Self> {
        if value < MIN_TRIALS as i64 || value > MAX_TRIALS as i64 {
            return Err(ProbStatError::TrialsOutOfRange { value, min: MIN_TRIALS, max: MAX_TRIALS });
        }
        Ok(Self(value as u32))
    }

    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(MIN_TRIALS as i64, MAX_TRIALS as i64) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(self, step: u32) -> Self {
        Self::clamped(self.0 as i64 + step as i64)
    }

    pub fn decrement(self, step: u32) -> Self {
        Self::clamped(self.0 as i64 - step as i64)
    }
}

impl Default for TrialCount {
    fn default() -> Self {
        Self(DEFAULT_TRIALS)
    }
}

impl fmt::Display for TrialCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TrialCount {
    type Err = ProbStatError;
    fn from_str(s: &str) -> Result<Self> {
        let v: i64 = s
            .trim()
            .parse()
            .map_err(|_| ProbStatError::Other(format!("not an integer: {s}")))?;
        Self::new(v)
    }
}

impl TryFrom<u32> for TrialCount {
    type Error = ProbStatError;
    fn try_from(v: u32) -> Result<Self> {
        Self::new(v as i64)
    }
}

impl From<TrialCount> for u32 {
    fn from(t: TrialCount) -> u32 {
        t.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub trials: u32,
    /// Label-sorted; only labels that were drawn appear.
    pub counts: Vec<FrequencyEntry>,
}

impl SimulationOutcome {
    pub fn count_of(&self, label: &str) -> u64 {
        self.counts.iter().find(|e| e.value == label).map(|e| e.count).unwrap_or(0)
    }
}

/// Draws `trials` labels uniformly, with replacement, from [`OUTCOMES`].
pub fn simulate<R: Rng + ?Sized>(trials: TrialCount, rng: &mut R) -> SimulationOutcome {
    let mut counter = FrequencyCounter::new();
    for _ in 0..trials.get() {
        if let Some(label) = OUTCOMES.choose(rng) {
            counter.add(label);
        }
    }
    let outcome = SimulationOutcome { trials: trials.get(), counts: counter.into_entries() };
    tracing::debug!(trials = outcome.trials, heads = outcome.count_of("Heads"), tails = outcome.count_of("Tails"), "simulated coin flips");
    outcome
}

pub fn simulation_figure(outcome: &SimulationOutcome) -> Figure {
    let mut fig = Figure::new(FigureKind::Categorical, "Simulation Results", "Outcome", "Count");
    fig.bars = outcome
        .counts
        .iter()
        .enumerate()
        .map(|(i, e)| FigureBar {
            label: e.value.clone(),
            x: i as f64 - BAR_WIDTH / 2.0,
            width: BAR_WIDTH,
            height: e.count,
            color: BAR_COLORS[i % BAR_COLORS.len()].into(),
            edge_color: None,
            alpha: 1.0,
        })
        .collect();
    fig.annotate_bars(0.0, None, |_| true);
    fig
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn trial_bounds_are_inclusive() {
        assert!(TrialCount::new(1).is_ok());
        assert!(TrialCount::new(10_000).is_ok());
        assert!(matches!(TrialCount::new(0), Err(ProbStatError::TrialsOutOfRange { value: 0, .. })));
        assert!(TrialCount::new(10_001).is_err());
        assert!(TrialCount::new(-3).is_err());
    }

    #[test]
    fn clamping_enforces_floor_and_ceiling() {
        assert_eq!(TrialCount::clamped(0).get(), 1);
        assert_eq!(TrialCount::clamped(50_000).get(), 10_000);
        assert_eq!(TrialCount::clamped(1).decrement(1).get(), 1);
        assert_eq!(TrialCount::clamped(9_950).increment(100).get(), 10_000);
        assert_eq!(TrialCount::default().get(), 1000);
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("250".parse::<TrialCount>().unwrap().get(), 250);
        assert!("0".parse::<TrialCount>().is_err());
        assert!("ten".parse::<TrialCount>().is_err());
    }

    #[test]
    fn counts_sum_to_trials() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in [1, 2, 17, 1000, 10_000] {
            let out = simulate(TrialCount::new(n).unwrap(), &mut rng);
            let sum: u64 = out.counts.iter().map(|e| e.count).sum();
            assert_eq!(sum, n as u64);
            assert!(out.counts.iter().all(|e| OUTCOMES.contains(&e.value.as_str())));
        }
    }

    #[test]
    fn single_trial_has_one_label() {
        let mut rng = StdRng::seed_from_u64(42);
        let out = simulate(TrialCount::new(1).unwrap(), &mut rng);
        assert_eq!(out.counts.len(), 1);
        assert_eq!(out.counts[0].count, 1);
    }

    #[test]
    fn seeded_runs_repeat() {
        let a = simulate(TrialCount::default(), &mut StdRng::seed_from_u64(3));
        let b = simulate(TrialCount::default(), &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn roughly_fair_over_many_trials() {
        let out = simulate(TrialCount::new(10_000).unwrap(), &mut StdRng::seed_from_u64(11));
        let heads = out.count_of("Heads") as f64;
        assert!((heads - 5000.0).abs() < 300.0, "heads={heads}");
    }

    #[test]
    fn figure_has_one_annotated_bar_per_label() {
        let out = simulate(TrialCount::new(500).unwrap(), &mut StdRng::seed_from_u64(5));
        let fig = simulation_figure(&out);
        assert_eq!(fig.title, "Simulation Results");
        assert_eq!((fig.x_label.as_str(), fig.y_label.as_str()), ("Outcome", "Count"));
        assert_eq!(fig.bars.len(), out.counts.len());
        assert_eq!(fig.annotations.len(), fig.bars.len());
        assert_eq!(fig.total(), 500);
        assert_eq!(fig.bars[0].color, "skyblue");
        assert_eq!(fig.annotations[0].rotation_deg, 0.0);
    }

    #[test]
    fn serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<TrialCount>("0").is_err());
        assert_eq!(serde_json::from_str::<TrialCount>("12").unwrap().get(), 12);
    }
}
