//! Core domain types for the Caltrack calorie tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Logged entries (meals and workouts)
//! - The aggregate summary pushed to views

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Daily limit used when the store holds none and after a reset.
pub const DEFAULT_DAILY_LIMIT: i64 = 2000;

/// A logged food intake event
///
/// Entries are immutable after creation; the only edit is removal by id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub calories: i64,
}

impl Meal {
    /// Create a meal with a freshly generated id
    pub fn new(name: impl Into<String>, calories: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calories,
        }
    }
}

/// A logged exercise event; its calories count against the total
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub calories: i64,
}

impl Workout {
    /// Create a workout with a freshly generated id
    pub fn new(name: impl Into<String>, calories: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calories,
        }
    }
}

/// Aggregate values handed to the view on every refresh
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub daily_limit: i64,
    /// Net calories: consumed minus burned
    pub total: i64,
    pub consumed: i64,
    pub burned: i64,
    /// Limit minus total; negative once the limit is exceeded
    pub remaining: i64,
    /// Share of the limit consumed, clamped to 0..=100
    pub progress_percentage: f64,
}

impl Summary {
    /// True once the daily limit has been exceeded
    pub fn over_limit(&self) -> bool {
        self.remaining < 0
    }
}
