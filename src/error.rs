//! Error types surfaced by model construction and solving.

use thiserror::Error;

/// Malformed job description. Detected once, before any search starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("malformed job description: {0}")]
    Malformed(String),

    #[error("distance matrix is empty")]
    EmptyMatrix,

    #[error("distance matrix row {row} has {actual} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("distance matrix entry ({from}, {to}) is {value}, expected a finite non-negative number")]
    InvalidCost { from: usize, to: usize, value: f64 },

    #[error("job declares no vehicles")]
    NoVehicles,

    #[error("`{field}` has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("`{field}[{position}]` = {index} is out of range for {len} nodes")]
    IndexOutOfRange {
        field: &'static str,
        position: usize,
        index: usize,
        len: usize,
    },

    #[error("`{field}[{position}]` = {value} must be non-negative")]
    Negative {
        field: &'static str,
        position: usize,
        value: i64,
    },

    #[error("`vehicle_capacity` is declared without `demands`")]
    CapacityWithoutDemands,

    #[error("`demands` is declared without `vehicle_capacity`")]
    DemandsWithoutCapacity,

    #[error("shift of vehicle {vehicle} is [{earliest}, {latest}], expected 0 <= earliest <= latest")]
    InvalidShift {
        vehicle: usize,
        earliest: i64,
        latest: i64,
    },

    #[error("`{field}` = {value} is out of range")]
    InvalidParameter { field: &'static str, value: f64 },

    #[error("duplicate identifier `{id}` in `{field}`")]
    DuplicateId { field: &'static str, id: String },
}

/// Every way a solve request can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A mandatory node has no feasible position in any route.
    #[error("mandatory node `{node_id}` (index {node}) cannot be placed in any route")]
    Infeasible { node: usize, node_id: String },

    /// No assignment satisfies the hard constraints, even after dropping
    /// every optional node.
    #[error("no feasible solution found")]
    NoSolutionFound,
}
