//! View seam between the tracker and a presentation layer.
//!
//! The tracker never renders anything itself; it calls these hooks
//! synchronously after each mutation and the presentation layer decides
//! what to draw.

use crate::{Meal, Summary, Workout};

/// Callbacks a presentation layer receives from the tracker
pub trait TrackerView {
    /// Full display refresh with the updated aggregate values
    fn refresh(&mut self, _summary: &Summary) {}

    /// A single newly added meal, for incremental rendering
    fn meal_added(&mut self, _meal: &Meal) {}

    /// A single newly added workout, for incremental rendering
    fn workout_added(&mut self, _workout: &Workout) {}
}

/// View that renders nothing, for headless trackers
pub struct NullView;

impl TrackerView for NullView {}
