use crate::models::task::TaskGroup;
use clap::ValueEnum;
use std::fmt;

/// Task cohort tracked separately by the period averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Cohort {
    Primary,
    Alternative,
}

impl Cohort {
    pub const ALL: [Cohort; 2] = [Cohort::Primary, Cohort::Alternative];

    pub fn group(&self) -> TaskGroup {
        match self {
            Cohort::Primary => TaskGroup::Productive,
            Cohort::Alternative => TaskGroup::Alternative,
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cohort::Primary => f.write_str("primary"),
            Cohort::Alternative => f.write_str("alternative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Daily, Period::Weekly, Period::Monthly];

    /// Multiplier applied to the daily average when the history is too
    /// short to hold one complete period.
    pub fn fallback_days(&self) -> i32 {
        match self {
            Period::Daily => 1,
            Period::Weekly => 7,
            Period::Monthly => 30,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Daily => f.write_str("daily"),
            Period::Weekly => f.write_str("weekly"),
            Period::Monthly => f.write_str("monthly"),
        }
    }
}
