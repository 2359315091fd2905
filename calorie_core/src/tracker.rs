//! The calorie tracker: in-memory state owner.
//!
//! The tracker loads its state from the persistence gateway at
//! construction, applies user mutations, maintains the running total
//! incrementally, writes changes back through the gateway and signals the
//! injected view after every mutation.

use crate::{KeyValueStore, Meal, Result, StorageGateway, Summary, TrackerView, Workout};
use uuid::Uuid;

pub struct CalorieTracker<S: KeyValueStore> {
    daily_limit: i64,
    total: i64,
    meals: Vec<Meal>,
    workouts: Vec<Workout>,
    gateway: StorageGateway<S>,
    view: Box<dyn TrackerView>,
    reset_clears_limit: bool,
}

impl<S: KeyValueStore> CalorieTracker<S> {
    /// Build a tracker whose state is loaded from the gateway
    pub fn new(gateway: StorageGateway<S>, view: Box<dyn TrackerView>) -> Result<Self> {
        let daily_limit = gateway.limit()?;
        let total = gateway.total()?;
        let meals = gateway.meals()?;
        let workouts = gateway.workouts()?;

        tracing::info!(
            "Loaded tracker state: limit {}, total {}, {} meals, {} workouts",
            daily_limit,
            total,
            meals.len(),
            workouts.len()
        );

        Ok(Self {
            daily_limit,
            total,
            meals,
            workouts,
            gateway,
            view,
            reset_clears_limit: false,
        })
    }

    /// Make [`reset`](Self::reset) clear the persisted limit as well
    pub fn with_reset_clears_limit(mut self, clears: bool) -> Self {
        self.reset_clears_limit = clears;
        self
    }

    /// Set and persist the daily limit
    pub fn set_daily_limit(&mut self, limit: i64) -> Result<()> {
        self.daily_limit = limit;
        self.gateway.set_limit(limit)?;
        tracing::info!("Daily limit set to {}", limit);
        self.refresh();
        Ok(())
    }

    /// Log a meal: its calories are added to the running total
    pub fn add_meal(&mut self, meal: Meal) -> Result<()> {
        self.total += meal.calories;
        self.gateway.set_total(self.total)?;
        self.gateway.append_meal(&meal)?;
        self.view.meal_added(&meal);
        tracing::info!("Added meal {:?} ({} kcal)", meal.name, meal.calories);
        self.meals.push(meal);
        self.refresh();
        Ok(())
    }

    /// Log a workout: its calories are subtracted from the running total
    pub fn add_workout(&mut self, workout: Workout) -> Result<()> {
        self.total -= workout.calories;
        self.gateway.set_total(self.total)?;
        self.gateway.append_workout(&workout)?;
        self.view.workout_added(&workout);
        tracing::info!("Added workout {:?} ({} kcal)", workout.name, workout.calories);
        self.workouts.push(workout);
        self.refresh();
        Ok(())
    }

    /// Remove a meal by id; an unknown id is a silent no-op
    pub fn remove_meal(&mut self, id: Uuid) -> Result<()> {
        let Some(index) = self.meals.iter().position(|meal| meal.id == id) else {
            tracing::debug!("No meal with id {}", id);
            return Ok(());
        };

        let meal = self.meals.remove(index);
        self.total -= meal.calories;
        self.gateway.set_total(self.total)?;
        self.gateway.remove_meal(id)?;
        tracing::info!("Removed meal {:?} ({} kcal)", meal.name, meal.calories);
        self.refresh();
        Ok(())
    }

    /// Remove a workout by id; removal adds its calories back to the total
    pub fn remove_workout(&mut self, id: Uuid) -> Result<()> {
        let Some(index) = self.workouts.iter().position(|workout| workout.id == id) else {
            tracing::debug!("No workout with id {}", id);
            return Ok(());
        };

        let workout = self.workouts.remove(index);
        self.total += workout.calories;
        self.gateway.set_total(self.total)?;
        self.gateway.remove_workout(id)?;
        tracing::info!("Removed workout {:?} ({} kcal)", workout.name, workout.calories);
        self.refresh();
        Ok(())
    }

    /// Wipe the tracked day.
    ///
    /// The in-memory limit returns to the gateway default. The persisted
    /// limit survives unless `reset_clears_limit` is set, so a later
    /// reload shows the old limit again.
    pub fn reset(&mut self) -> Result<()> {
        self.daily_limit = self.gateway.default_limit();
        self.total = 0;
        self.meals.clear();
        self.workouts.clear();
        self.gateway.clear_all()?;
        if self.reset_clears_limit {
            self.gateway.clear_limit()?;
        }
        tracing::info!("Tracker reset");
        self.refresh();
        Ok(())
    }

    /// Replay add signals for every in-memory item.
    ///
    /// Called once at startup to materialize persisted state into the view.
    pub fn load_items(&mut self) {
        for meal in &self.meals {
            self.view.meal_added(meal);
        }
        for workout in &self.workouts {
            self.view.workout_added(workout);
        }
    }

    /// Push the current aggregate values to the view
    pub fn render(&mut self) {
        self.refresh();
    }

    fn refresh(&mut self) {
        let summary = self.summary();
        self.view.refresh(&summary);
    }

    pub fn daily_limit(&self) -> i64 {
        self.daily_limit
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn consumed(&self) -> i64 {
        self.meals.iter().map(|meal| meal.calories).sum()
    }

    pub fn burned(&self) -> i64 {
        self.workouts.iter().map(|workout| workout.calories).sum()
    }

    pub fn remaining(&self) -> i64 {
        self.daily_limit - self.total
    }

    /// Share of the daily limit consumed, clamped to 0..=100
    pub fn progress_percentage(&self) -> f64 {
        if self.total < 0 {
            return 0.0;
        }
        let percentage = self.total as f64 * 100.0 / self.daily_limit as f64;
        percentage.min(100.0)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            daily_limit: self.daily_limit,
            total: self.total,
            consumed: self.consumed(),
            burned: self.burned(),
            remaining: self.remaining(),
            progress_percentage: self.progress_percentage(),
        }
    }

    /// Meals whose name contains `text`, case-insensitively
    pub fn filter_meals(&self, text: &str) -> Vec<&Meal> {
        let needle = text.to_lowercase();
        self.meals
            .iter()
            .filter(|meal| meal.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Workouts whose name contains `text`, case-insensitively
    pub fn filter_workouts(&self, text: &str) -> Vec<&Workout> {
        let needle = text.to_lowercase();
        self.workouts
            .iter()
            .filter(|workout| workout.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Tear the tracker down and give the underlying store back
    pub fn into_store(self) -> S {
        self.gateway.into_store()
    }
}
