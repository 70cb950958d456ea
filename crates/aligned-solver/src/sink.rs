use crate::BoxedTechniqueStep;

/// Receives hints as a technique finds them.
pub trait HintSink {
    /// Accepts a hint.
    ///
    /// Returns `true` if the producing search should stop now.
    fn add(&mut self, step: BoxedTechniqueStep) -> bool;
}

/// A [`HintSink`] that stores hints, either stopping after the first one or
/// collecting everything.
///
/// # Examples
///
/// ```
/// use aligned_solver::HintAccumulator;
///
/// let first = HintAccumulator::first();
/// assert!(first.is_exit_early());
/// assert!(first.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct HintAccumulator {
    steps: Vec<BoxedTechniqueStep>,
    exit_early: bool,
}

impl HintAccumulator {
    /// Creates a sink that asks the search to stop after one hint.
    #[must_use]
    pub fn first() -> Self {
        Self {
            steps: Vec::new(),
            exit_early: true,
        }
    }

    /// Creates a sink that collects every hint.
    #[must_use]
    pub fn all() -> Self {
        Self {
            steps: Vec::new(),
            exit_early: false,
        }
    }

    /// Returns `true` if this sink stops the search after one hint.
    #[must_use]
    pub fn is_exit_early(&self) -> bool {
        self.exit_early
    }

    /// Returns the collected hints.
    #[must_use]
    pub fn steps(&self) -> &[BoxedTechniqueStep] {
        &self.steps
    }

    /// Returns the number of collected hints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no hint was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consumes the sink and returns the collected hints.
    #[must_use]
    pub fn into_steps(self) -> Vec<BoxedTechniqueStep> {
        self.steps
    }
}

impl HintSink for HintAccumulator {
    fn add(&mut self, step: BoxedTechniqueStep) -> bool {
        self.steps.push(step);
        self.exit_early
    }
}
