//! JSON wire types: the job description read by the solver and the
//! solution report written back.

mod job;
mod report;

pub use job::{CapacitySpec, JobDescription};
pub use report::SolutionReport;
