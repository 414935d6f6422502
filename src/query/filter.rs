use std::fmt;
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A caller-supplied predicate over entities of type `T`.
///
/// Cheap to clone (shares the closure), so lazy queries can keep one around
/// and re-evaluate it every time they are iterated.
pub struct Filter<T> {
    predicate: Predicate<T>,
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

impl<T: 'static> Filter<T> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// A filter every entity passes.
    pub fn any() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, entity: &T) -> bool {
        (self.predicate)(entity)
    }

    /// Both filters must pass. Short-circuits on the left side.
    pub fn and(self, other: Filter<T>) -> Self {
        Self::new(move |entity| self.matches(entity) && other.matches(entity))
    }

    /// Either filter may pass. Short-circuits on the left side.
    pub fn or(self, other: Filter<T>) -> Self {
        Self::new(move |entity| self.matches(entity) || other.matches(entity))
    }

    pub fn negate(self) -> Self {
        Self::new(move |entity| !self.matches(entity))
    }
}
