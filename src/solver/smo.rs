//! Sequential Minimal Optimization (SMO) solver implementation
//!
//! Solves the dual of the soft-margin SVM for one binary problem:
//!
//! ```text
//! max  W(α) = Σ αᵢ - ½ Σᵢ Σⱼ αᵢ αⱼ yᵢ yⱼ K(xᵢ, xⱼ)
//! s.t. 0 ≤ αᵢ ≤ C,  Σ αᵢ yᵢ = 0
//! ```
//!
//! Following Platt's SMO, every step picks two multipliers and optimizes them
//! jointly in closed form, which keeps the equality constraint satisfied. The
//! outer loop alternates full sweeps with sweeps over the non-bound examples
//! (`0 < α < C`) until a full sweep changes nothing.
//!
//! The decision function is `f(x) = Σ αᵢ yᵢ K(xᵢ, x) - b` and the error of an
//! example is `Eᵢ = f(xᵢ) - yᵢ`.

use crate::cache::ErrorCache;
use crate::core::{BinaryObservation, OptimizationResult, OptimizerConfig, Result, SVMError};
use crate::kernel::Kernel;
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Distance from a box edge, relative to C, under which a multiplier is
/// snapped onto that edge. Only absorbs round-off.
const BOUND_SNAP: f64 = 1e-12;

/// SMO solver for SVM optimization
///
/// The solver itself is stateless: every call to [`SMOSolver::solve`] builds a
/// fresh working state (multipliers, error cache, threshold and a PRNG seeded
/// from the configuration) that lives only for that run.
pub struct SMOSolver<K> {
    kernel: Arc<K>,
    config: OptimizerConfig,
}

impl<K> SMOSolver<K> {
    /// Create a new SMO solver with the given kernel and configuration
    pub fn new(kernel: Arc<K>, config: OptimizerConfig) -> Self {
        Self { kernel, config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Solve the SVM optimization problem
    ///
    /// Fewer than two observations yield all-zero multipliers: no pair can be
    /// optimized, so the resulting model has no support vectors.
    ///
    /// # Errors
    /// [`SVMError::InvalidParameter`] for an invalid configuration and
    /// [`SVMError::ConvergenceFailure`] when `max_sweeps` sweeps were not
    /// enough to converge.
    pub fn solve<V>(&self, observations: &[BinaryObservation<V>]) -> Result<OptimizationResult>
    where
        K: Kernel<V>,
    {
        self.config.validate()?;

        let mut state = SolverState::new(observations, self.kernel.as_ref(), &self.config);
        state.optimize()?;
        Ok(state.into_result())
    }
}

/// The example chosen by `examine_example`, as seen when its partner is sought
#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    y: f64,
    alpha: f64,
    error: f64,
}

/// Working state of one optimization run
struct SolverState<'a, V, K: ?Sized> {
    observations: &'a [BinaryObservation<V>],
    kernel: &'a K,
    config: &'a OptimizerConfig,
    alphas: Vec<f64>,
    errors: ErrorCache,
    b: f64,
    rng: StdRng,
    sweeps: usize,
    steps: usize,
}

impl<'a, V, K: Kernel<V> + ?Sized> SolverState<'a, V, K> {
    fn new(
        observations: &'a [BinaryObservation<V>],
        kernel: &'a K,
        config: &'a OptimizerConfig,
    ) -> Self {
        let n = observations.len();
        Self {
            observations,
            kernel,
            config,
            alphas: vec![0.0; n],
            errors: ErrorCache::new(n),
            b: 0.0,
            rng: StdRng::seed_from_u64(config.seed),
            sweeps: 0,
            steps: 0,
        }
    }

    fn len(&self) -> usize {
        self.alphas.len()
    }

    fn y(&self, i: usize) -> f64 {
        self.observations[i].sign()
    }

    fn k(&self, i: usize, j: usize) -> f64 {
        self.kernel
            .compute(self.observations[i].value(), self.observations[j].value())
    }

    fn is_non_bound(&self, i: usize) -> bool {
        let alpha = self.alphas[i];
        alpha > 0.0 && alpha < self.config.c
    }

    /// Snap a multiplier lying within round-off of a box edge onto the edge
    fn snap_to_bounds(&self, alpha: f64) -> f64 {
        let c = self.config.c;
        let margin = BOUND_SNAP * c;
        if alpha < margin {
            0.0
        } else if alpha > c - margin {
            c
        } else {
            alpha
        }
    }

    /// Raw decision value for training example `index`, recomputed from
    /// every positive multiplier
    fn svm_output(&self, index: usize) -> f64 {
        let sum: f64 = self
            .alphas
            .iter()
            .enumerate()
            .filter(|&(_, &alpha)| alpha > 0.0)
            .map(|(i, &alpha)| alpha * self.y(i) * self.k(i, index))
            .sum();
        sum - self.b
    }

    /// Prediction error, from the cache when it is trustworthy
    fn error(&self, i: usize) -> f64 {
        if self.is_non_bound(i) {
            self.errors.get(i)
        } else {
            self.svm_output(i) - self.y(i)
        }
    }

    /// Outer loop: alternate full and non-bound sweeps until a full sweep
    /// changes no multiplier
    fn optimize(&mut self) -> Result<()> {
        let n = self.len();
        let mut num_changed = 0;
        let mut examine_all = true;

        while num_changed > 0 || examine_all {
            if self.sweeps >= self.config.max_sweeps {
                warn!(
                    "SMO stopped after {} sweeps with {} multipliers still changing",
                    self.sweeps, num_changed
                );
                return Err(SVMError::ConvergenceFailure {
                    sweeps: self.sweeps,
                });
            }

            num_changed = 0;
            for i in 0..n {
                if (examine_all || self.is_non_bound(i)) && self.examine_example(i) {
                    num_changed += 1;
                }
            }
            self.sweeps += 1;

            debug!(
                "sweep {} ({}): {} multipliers changed",
                self.sweeps,
                if examine_all { "full" } else { "non-bound" },
                num_changed
            );

            if examine_all {
                examine_all = false;
            } else if num_changed == 0 {
                examine_all = true;
            }
        }

        debug!(
            "SMO converged on {} examples after {} sweeps and {} steps",
            n, self.sweeps, self.steps
        );
        Ok(())
    }

    /// Check example `i2` against the KKT conditions and, if it violates them,
    /// try to find a partner that allows a joint step
    fn examine_example(&mut self, i2: usize) -> bool {
        let second = Candidate {
            index: i2,
            y: self.y(i2),
            alpha: self.alphas[i2],
            error: self.error(i2),
        };
        let c = self.config.c;
        let tolerance = self.config.tolerance;
        let r2 = second.error * second.y;

        if !((r2 < -tolerance && second.alpha < c) || (r2 > tolerance && second.alpha > 0.0)) {
            return false;
        }

        if let Some(i1) = self.max_error_partner(second.error) {
            if self.take_step(i1, &second) {
                return true;
            }
        }

        let n = self.len();

        let start = self.rng.gen_range(0..n);
        for i1 in (start..start + n).map(|j| j % n) {
            if self.is_non_bound(i1) && self.take_step(i1, &second) {
                return true;
            }
        }

        let start = self.rng.gen_range(0..n);
        for i1 in (start..start + n).map(|j| j % n) {
            if self.take_step(i1, &second) {
                return true;
            }
        }

        false
    }

    /// Non-bound example maximizing `|E1 - E2|`, the step-size heuristic
    fn max_error_partner(&self, e2: f64) -> Option<usize> {
        let mut best = None;
        let mut max = 0.0;

        for j in (0..self.len()).filter(|&j| self.is_non_bound(j)) {
            let diff = (self.errors.get(j) - e2).abs();
            if diff > max {
                best = Some(j);
                max = diff;
            }
        }

        best
    }

    /// Jointly optimize the multipliers of `i1` and `second`
    fn take_step(&mut self, i1: usize, second: &Candidate) -> bool {
        let i2 = second.index;
        if i1 == i2 {
            return false;
        }

        let c = self.config.c;
        let eps = self.config.eps;
        let Candidate {
            y: y2,
            alpha: alpha2,
            error: e2,
            ..
        } = *second;

        let alpha1 = self.alphas[i1];
        let y1 = self.y(i1);
        let e1 = self.error(i1);
        let s = y1 * y2;

        // Feasible segment for the new alpha2
        let (low, high) = if s > 0.0 {
            ((alpha1 + alpha2 - c).max(0.0), c.min(alpha1 + alpha2))
        } else {
            ((alpha2 - alpha1).max(0.0), c.min(c + alpha2 - alpha1))
        };

        if (low - high).abs() < self.config.bound_epsilon {
            return false;
        }

        let k11 = self.k(i1, i1);
        let k12 = self.k(i1, i2);
        let k22 = self.k(i2, i2);
        let eta = 2.0 * k12 - k11 - k22;

        let mut new_alpha2 = if eta < 0.0 {
            let unclipped = alpha2 - y2 * (e1 - e2) / eta;
            if unclipped < low {
                low
            } else if unclipped > high {
                high
            } else {
                unclipped
            }
        } else {
            // Degenerate direction: evaluate the dual objective along the
            // constraint line at both ends of the segment
            let c1 = eta / 2.0;
            let c2 = y2 * (e1 - e2) - eta * alpha2;
            let low_obj = c1 * low * low + c2 * low;
            let high_obj = c1 * high * high + c2 * high;

            if low_obj > high_obj + eps {
                low
            } else if low_obj < high_obj - eps {
                high
            } else {
                alpha2
            }
        };
        new_alpha2 = self.snap_to_bounds(new_alpha2);

        if (new_alpha2 - alpha2).abs() < eps * (new_alpha2 + alpha2 + eps) {
            return false;
        }

        let mut new_alpha1 = alpha1 - s * (new_alpha2 - alpha2);
        let margin = BOUND_SNAP * c;
        if new_alpha1 < margin {
            new_alpha2 += s * new_alpha1;
            new_alpha1 = 0.0;
        } else if new_alpha1 > c - margin {
            new_alpha2 += s * (new_alpha1 - c);
            new_alpha1 = c;
        }
        new_alpha2 = self.snap_to_bounds(new_alpha2);

        // Threshold: exact for whichever multiplier ends up strictly inside
        // the box; midway when both sit on a bound
        let t1 = y1 * (new_alpha1 - alpha1);
        let t2 = y2 * (new_alpha2 - alpha2);
        let b1 = self.b + e1 + t1 * k11 + t2 * k12;
        let b2 = self.b + e2 + t1 * k12 + t2 * k22;
        let new_b = if new_alpha1 > 0.0 && new_alpha1 < c {
            b1
        } else if new_alpha2 > 0.0 && new_alpha2 < c {
            b2
        } else {
            (b1 + b2) / 2.0
        };
        let delta_b = self.b - new_b;
        self.b = new_b;

        for i in 0..self.len() {
            if self.is_non_bound(i) {
                let delta = t1 * self.k(i1, i) + t2 * self.k(i2, i) + delta_b;
                self.errors.shift(i, delta);
            }
        }
        self.errors.invalidate(i1);
        self.errors.invalidate(i2);

        self.alphas[i1] = new_alpha1;
        self.alphas[i2] = new_alpha2;
        self.steps += 1;

        trace!(
            "step {}: alpha[{}] {} -> {}, alpha[{}] {} -> {}, b = {}",
            self.steps,
            i1,
            alpha1,
            new_alpha1,
            i2,
            alpha2,
            new_alpha2,
            self.b
        );

        true
    }

    /// Dual objective `W(α)` over the positive multipliers
    fn objective(&self) -> f64 {
        let support: Vec<usize> = (0..self.len()).filter(|&i| self.alphas[i] > 0.0).collect();

        let linear: f64 = support.iter().map(|&i| self.alphas[i]).sum();
        let mut quadratic = 0.0;
        for &i in &support {
            for &j in &support {
                quadratic += self.alphas[i] * self.alphas[j] * self.y(i) * self.y(j) * self.k(i, j);
            }
        }

        linear - 0.5 * quadratic
    }

    fn into_result(self) -> OptimizationResult {
        let objective_value = self.objective();
        OptimizationResult {
            alphas: self.alphas,
            b: self.b,
            sweeps: self.sweeps,
            steps: self.steps,
            objective_value,
        }
    }
}
