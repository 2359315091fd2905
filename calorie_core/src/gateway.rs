//! Persistence gateway over the key-value store.
//!
//! Four independent records make up the persisted state: `daily-limit` and
//! `calorie-total` as decimal strings, `meal-list` and `workout-list` as
//! JSON snapshots. The gateway owns no domain state; it reads and writes
//! records on behalf of the tracker.

use crate::{Error, KeyValueStore, Meal, Result, Workout, DEFAULT_DAILY_LIMIT};
use uuid::Uuid;

pub const KEY_DAILY_LIMIT: &str = "daily-limit";
pub const KEY_CALORIE_TOTAL: &str = "calorie-total";
pub const KEY_MEAL_LIST: &str = "meal-list";
pub const KEY_WORKOUT_LIST: &str = "workout-list";

/// Stateless pass-through between the tracker and a [`KeyValueStore`]
pub struct StorageGateway<S> {
    store: S,
    default_limit: i64,
}

impl<S: KeyValueStore> StorageGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_default_limit(store, DEFAULT_DAILY_LIMIT)
    }

    /// Use a different fallback when the store holds no limit record
    pub fn with_default_limit(store: S, default_limit: i64) -> Self {
        Self {
            store,
            default_limit,
        }
    }

    /// The limit handed out when the store holds none
    pub fn default_limit(&self) -> i64 {
        self.default_limit
    }

    /// Give the underlying store back, e.g. to rebuild a tracker on it
    pub fn into_store(self) -> S {
        self.store
    }

    fn read_int(&self, key: &str, default: i64) -> Result<i64> {
        match self.store.get(key)? {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|e| Error::Store(format!("record {:?} is not an integer: {}", key, e))),
        }
    }

    fn read_list<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.store.get(key)? {
            None => Ok(Vec::new()),
            Some(raw) => Ok(serde_json::from_str(&raw)?),
        }
    }

    fn write_list<T: serde::Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
        let snapshot = serde_json::to_string(items)?;
        self.store.set(key, &snapshot)
    }

    pub fn limit(&self) -> Result<i64> {
        self.read_int(KEY_DAILY_LIMIT, self.default_limit)
    }

    pub fn set_limit(&mut self, limit: i64) -> Result<()> {
        self.store.set(KEY_DAILY_LIMIT, &limit.to_string())
    }

    pub fn total(&self) -> Result<i64> {
        self.read_int(KEY_CALORIE_TOTAL, 0)
    }

    pub fn set_total(&mut self, total: i64) -> Result<()> {
        self.store.set(KEY_CALORIE_TOTAL, &total.to_string())
    }

    pub fn meals(&self) -> Result<Vec<Meal>> {
        self.read_list(KEY_MEAL_LIST)
    }

    /// Read the full snapshot, append, write it back
    pub fn append_meal(&mut self, meal: &Meal) -> Result<()> {
        let mut meals = self.meals()?;
        meals.push(meal.clone());
        self.write_list(KEY_MEAL_LIST, &meals)
    }

    /// Read the full snapshot, drop every entry matching id, write it back
    pub fn remove_meal(&mut self, id: Uuid) -> Result<()> {
        let mut meals = self.meals()?;
        meals.retain(|meal| meal.id != id);
        self.write_list(KEY_MEAL_LIST, &meals)
    }

    pub fn workouts(&self) -> Result<Vec<Workout>> {
        self.read_list(KEY_WORKOUT_LIST)
    }

    pub fn append_workout(&mut self, workout: &Workout) -> Result<()> {
        let mut workouts = self.workouts()?;
        workouts.push(workout.clone());
        self.write_list(KEY_WORKOUT_LIST, &workouts)
    }

    pub fn remove_workout(&mut self, id: Uuid) -> Result<()> {
        let mut workouts = self.workouts()?;
        workouts.retain(|workout| workout.id != id);
        self.write_list(KEY_WORKOUT_LIST, &workouts)
    }

    /// Delete total and both lists. The `daily-limit` record is left in
    /// place; [`clear_limit`](Self::clear_limit) handles it separately.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.remove(KEY_CALORIE_TOTAL)?;
        self.store.remove(KEY_MEAL_LIST)?;
        self.store.remove(KEY_WORKOUT_LIST)?;
        tracing::debug!("Cleared total and list records");
        Ok(())
    }

    /// Delete the persisted daily limit
    pub fn clear_limit(&mut self) -> Result<()> {
        self.store.remove(KEY_DAILY_LIMIT)
    }
}
