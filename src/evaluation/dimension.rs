//! Cumulative dimensions (distance, time, load) and their bounds.

use std::fmt;

use crate::models::{Violation, ViolationType};

const EPS: f64 = 1e-9;

/// Which quantity a dimension accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionKind {
    /// Travel cost, one transit per arc.
    Distance,
    /// Derived travel time plus service, in whole minutes.
    Time,
    /// Demand of each node arrived at.
    Capacity,
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DimensionKind::Distance => "Distance",
            DimensionKind::Time => "Time",
            DimensionKind::Capacity => "Capacity",
        })
    }
}

/// A cumulative quantity tracked along every route.
///
/// The cumulative value at the route start is either pinned to zero or
/// placed in the vehicle's start range; each arc adds its transit, and each
/// node may add up to `slack_max` of waiting. Every value must stay within
/// `[0, capacity]` and the final value within the vehicle's end range.
///
/// Schedules are computed earliest-first: the start is placed as low as
/// possible and delayed (or padded with slack) only to reach the lower bound
/// of the end range.
///
/// # Examples
///
/// ```
/// use shift_routing::evaluation::{Dimension, DimensionKind};
///
/// let mut time = Dimension::new(DimensionKind::Time, 0.0, vec![1440.0], false);
/// time.set_start_range(0, 540.0, 1080.0);
/// time.set_end_range(0, 540.0, 1080.0);
///
/// let cumuls = time.cumulate(0, &[0, 1, 0], |_, _| 30.0).unwrap();
/// assert_eq!(cumuls, vec![540.0, 570.0, 600.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Dimension {
    kind: DimensionKind,
    slack_max: f64,
    capacities: Vec<f64>,
    start_cumul_to_zero: bool,
    start_ranges: Vec<(f64, f64)>,
    end_ranges: Vec<(f64, f64)>,
    global_span_cost_coefficient: f64,
}

impl Dimension {
    /// Creates a dimension with one capacity per vehicle.
    ///
    /// Start and end ranges default to `[0, capacity]`.
    pub fn new(
        kind: DimensionKind,
        slack_max: f64,
        capacities: Vec<f64>,
        start_cumul_to_zero: bool,
    ) -> Self {
        let ranges: Vec<(f64, f64)> = capacities.iter().map(|&c| (0.0, c)).collect();
        Self {
            kind,
            slack_max,
            capacities,
            start_cumul_to_zero,
            start_ranges: ranges.clone(),
            end_ranges: ranges,
            global_span_cost_coefficient: 0.0,
        }
    }

    /// Charges `coefficient × (max end cumul − min start cumul)` over all
    /// vehicles to the objective.
    pub fn with_global_span_cost(mut self, coefficient: f64) -> Self {
        self.global_span_cost_coefficient = coefficient;
        self
    }

    /// Restricts the cumulative value at the vehicle's start node.
    pub fn set_start_range(&mut self, vehicle: usize, earliest: f64, latest: f64) {
        self.start_ranges[vehicle] = (earliest, latest);
    }

    /// Restricts the cumulative value at the vehicle's end node.
    pub fn set_end_range(&mut self, vehicle: usize, earliest: f64, latest: f64) {
        self.end_ranges[vehicle] = (earliest, latest);
    }

    pub fn kind(&self) -> DimensionKind {
        self.kind
    }

    pub fn slack_max(&self) -> f64 {
        self.slack_max
    }

    pub fn capacity(&self, vehicle: usize) -> f64 {
        self.capacities[vehicle]
    }

    pub fn start_cumul_to_zero(&self) -> bool {
        self.start_cumul_to_zero
    }

    pub fn start_range(&self, vehicle: usize) -> (f64, f64) {
        self.start_ranges[vehicle]
    }

    pub fn end_range(&self, vehicle: usize) -> (f64, f64) {
        self.end_ranges[vehicle]
    }

    pub fn global_span_cost_coefficient(&self) -> f64 {
        self.global_span_cost_coefficient
    }

    /// Computes the cumulative value at every node of `path` for `vehicle`.
    ///
    /// `path` holds the full route, start and end included. Returns the
    /// first bound broken, if any.
    pub fn cumulate(
        &self,
        vehicle: usize,
        path: &[usize],
        transit: impl Fn(usize, usize) -> f64,
    ) -> Result<Vec<f64>, Violation> {
        let violation = |kind| Violation::new(vehicle, self.kind, kind);
        let capacity = self.capacities[vehicle];

        let (start_lo, start_hi) = if self.start_cumul_to_zero {
            (0.0, 0.0)
        } else {
            let (lo, hi) = self.start_ranges[vehicle];
            (lo.max(0.0), hi.min(capacity))
        };
        if start_lo > start_hi + EPS {
            let (earliest, latest) = self.start_ranges[vehicle];
            return Err(violation(ViolationType::StartOutsideRange { earliest, latest }));
        }

        let mut cumuls = Vec::with_capacity(path.len());
        let mut value = start_lo;
        cumuls.push(value);
        for arc in path.windows(2) {
            value += transit(arc[0], arc[1]);
            cumuls.push(value);
        }

        let (end_lo, end_hi) = self.end_ranges[vehicle];
        let mut deficit = end_lo - value;
        if deficit > EPS {
            let delay = deficit.min(start_hi - start_lo);
            if delay > 0.0 {
                cumuls.iter_mut().for_each(|c| *c += delay);
                deficit -= delay;
            }
            // Wait as late as possible so earlier visits keep their earliest times.
            if self.slack_max > 0.0 {
                for k in (0..cumuls.len().saturating_sub(1)).rev() {
                    if deficit <= EPS {
                        break;
                    }
                    let wait = deficit.min(self.slack_max);
                    cumuls[k + 1..].iter_mut().for_each(|c| *c += wait);
                    deficit -= wait;
                }
            }
        }

        if let Some(i) = cumuls.iter().position(|&c| c > capacity + EPS) {
            return Err(violation(ViolationType::CapacityExceeded {
                node: path[i],
                value: cumuls[i],
                limit: capacity,
            }));
        }

        let last = cumuls.last().copied().unwrap_or(start_lo);
        if last < end_lo - EPS || last > end_hi + EPS {
            return Err(violation(ViolationType::EndOutsideRange {
                value: last,
                earliest: end_lo,
                latest: end_hi,
            }));
        }

        Ok(cumuls)
    }
}
