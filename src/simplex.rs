//! Derivative-free direct search over the two-dimensional shape space.
//!
//! A small Nelder–Mead implementation with the standard coefficients
//! (reflection 1, expansion 2, contraction 1/2, shrink 1/2). The state is the
//! three simplex vertices plus their objective values; callers drive it one
//! `step` at a time and test `size` against their own tolerance, which keeps
//! convergence policy, early exits and iteration caps out of the search itself.

use nalgebra::Vector2;

/// Result of advancing the simplex by one search step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step completed and the simplex was updated.
    Advanced,
    /// The step produced non-finite vertices and cannot make further progress.
    Stalled,
}

/// State of a two-dimensional Nelder–Mead search: three candidate vertices and
/// their objective values. Owned by the driver; dropped on every exit path.
#[derive(Clone, Debug)]
pub struct Simplex {
    vertices: [Vector2<f64>; 3],
    values: [f64; 3],
}

impl Simplex {
    /// Builds the initial simplex from a starting point and per-dimension
    /// offsets, evaluating the objective at each vertex.
    pub fn initialize<F>(f: &mut F, start: Vector2<f64>, steps: Vector2<f64>) -> Self
    where
        F: FnMut(&Vector2<f64>) -> f64,
    {
        let vertices = [
            start,
            start + Vector2::new(steps[0], 0.0),
            start + Vector2::new(0.0, steps[1]),
        ];
        let values = [f(&vertices[0]), f(&vertices[1]), f(&vertices[2])];
        Self { vertices, values }
    }

    /// Advances the search by one reflection/expansion/contraction/shrink step.
    pub fn step<F>(&mut self, f: &mut F) -> StepOutcome
    where
        F: FnMut(&Vector2<f64>) -> f64,
    {
        self.order();
        let [best, second, worst] = self.vertices;
        let centroid = (best + second) / 2.0;

        let reflected = centroid + (centroid - worst);
        let f_reflected = f(&reflected);

        if f_reflected < self.values[0] {
            let expanded = centroid + 2.0 * (centroid - worst);
            let f_expanded = f(&expanded);
            if f_expanded < f_reflected {
                self.replace_worst(expanded, f_expanded);
            } else {
                self.replace_worst(reflected, f_reflected);
            }
        } else if f_reflected < self.values[1] {
            self.replace_worst(reflected, f_reflected);
        } else {
            let contracted = (centroid + worst) / 2.0;
            let f_contracted = f(&contracted);
            if f_contracted <= self.values[2] {
                self.replace_worst(contracted, f_contracted);
            } else {
                // Shrink everything toward the current best vertex.
                for i in 1..3 {
                    self.vertices[i] = (self.vertices[i] + self.vertices[0]) / 2.0;
                    self.values[i] = f(&self.vertices[i]);
                }
            }
        }

        if self.is_degenerate() {
            StepOutcome::Stalled
        } else {
            StepOutcome::Advanced
        }
    }

    /// Characteristic simplex size: mean distance from the vertices to their
    /// centroid. Used by the driver as the convergence metric.
    pub fn size(&self) -> f64 {
        let centroid = (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0;
        self.vertices
            .iter()
            .map(|vertex| (vertex - centroid).norm())
            .sum::<f64>()
            / 3.0
    }

    /// Returns the best vertex seen so far and its objective value.
    pub fn best(&self) -> (Vector2<f64>, f64) {
        let mut index = 0;
        for i in 1..3 {
            if self.values[i] < self.values[index] {
                index = i;
            }
        }
        (self.vertices[index], self.values[index])
    }

    /// Sorts vertices so `vertices[0]` is the best and `vertices[2]` the worst.
    fn order(&mut self) {
        let mut indices = [0usize, 1, 2];
        indices.sort_by(|&a, &b| self.values[a].total_cmp(&self.values[b]));
        self.vertices = [
            self.vertices[indices[0]],
            self.vertices[indices[1]],
            self.vertices[indices[2]],
        ];
        self.values = [
            self.values[indices[0]],
            self.values[indices[1]],
            self.values[indices[2]],
        ];
    }

    fn replace_worst(&mut self, vertex: Vector2<f64>, value: f64) {
        self.vertices[2] = vertex;
        self.values[2] = value;
    }

    fn is_degenerate(&self) -> bool {
        self.vertices
            .iter()
            .any(|vertex| !vertex[0].is_finite() || !vertex[1].is_finite())
            || self.values.iter().any(|value| value.is_nan())
    }
}
