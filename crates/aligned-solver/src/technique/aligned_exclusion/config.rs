use crate::ConfigError;

/// Smallest supported aligned-set size.
pub const MIN_DEGREE: usize = 2;
/// Largest supported aligned-set size.
pub const MAX_DEGREE: usize = 10;

const NAMES: [&str; MAX_DEGREE + 1] = [
    "",
    "",
    "Aligned Pair Exclusion",
    "Aligned Triple Exclusion",
    "Aligned Quad Exclusion",
    "Aligned Pent Exclusion",
    "Aligned Hex Exclusion",
    "Aligned Sept Exclusion",
    "Aligned Oct Exclusion",
    "Aligned Nona Exclusion",
    "Aligned Dec Exclusion",
];

const DEFAULT_CACHE_SHIFT: u8 = 14;
const DEFAULT_REJECTION_LIMIT: usize = 256;

/// How many common excluders an aligned set needs before it is examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MinExcluders {
    /// One common excluder. Finds every aligned exclusion.
    One,
    /// Two common excluders ("hacked" mode). Much faster at high degrees, but
    /// misses eliminations that rest on a single excluder.
    Two,
}

impl MinExcluders {
    /// Returns the minimum as a count.
    #[must_use]
    #[inline]
    pub const fn count(self) -> usize {
        match self {
            MinExcluders::One => 1,
            MinExcluders::Two => 2,
        }
    }
}

/// Settings for one [`AlignedExclusion`](super::AlignedExclusion) instance.
///
/// # Examples
///
/// ```
/// use aligned_solver::{AlignedExclusionConfig, MinExcluders};
///
/// let config = AlignedExclusionConfig::new(4)?
///     .with_hacked(true)
///     .with_cache_shift(16)?;
/// assert_eq!(config.degree(), 4);
/// assert_eq!(config.min_excluders(), MinExcluders::Two);
/// assert_eq!(config.name(), "Aligned Quad Exclusion");
/// # Ok::<(), aligned_solver::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedExclusionConfig {
    degree: usize,
    min_excluders: MinExcluders,
    cache: bool,
    cache_shift: u8,
    watchdog_limit: Option<u64>,
    rejection_limit: usize,
}

impl AlignedExclusionConfig {
    /// Creates a configuration for aligned sets of `degree` cells.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDegree`] if `degree` is not in
    /// `2..=10`.
    pub fn new(degree: usize) -> Result<Self, ConfigError> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&degree) {
            return Err(ConfigError::InvalidDegree {
                degree,
                min: MIN_DEGREE,
                max: MAX_DEGREE,
            });
        }
        Ok(Self {
            degree,
            min_excluders: MinExcluders::One,
            cache: true,
            cache_shift: DEFAULT_CACHE_SHIFT,
            watchdog_limit: None,
            rejection_limit: DEFAULT_REJECTION_LIMIT,
        })
    }

    /// Requires two common excluders instead of one.
    #[must_use]
    pub fn with_hacked(mut self, hacked: bool) -> Self {
        self.min_excluders = if hacked {
            MinExcluders::Two
        } else {
            MinExcluders::One
        };
        self
    }

    /// Enables or disables the non-hinter cache.
    #[must_use]
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    /// Sets the non-hinter cache size to `1 << shift` slots.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCacheShift`] if `shift` is not in
    /// `4..=24`.
    pub fn with_cache_shift(mut self, shift: u8) -> Result<Self, ConfigError> {
        if !(4..=24).contains(&shift) {
            return Err(ConfigError::InvalidCacheShift(shift));
        }
        self.cache_shift = shift;
        Ok(self)
    }

    /// Overrides the outer-search iteration budget.
    ///
    /// By default the budget is derived from the candidate count and can only
    /// be exceeded by a broken search.
    #[must_use]
    pub fn with_watchdog_limit(mut self, limit: Option<u64>) -> Self {
        self.watchdog_limit = limit;
        self
    }

    /// Caps the number of rejected combos recorded per hint. Zero disables
    /// the rejection map.
    #[must_use]
    pub fn with_rejection_limit(mut self, limit: usize) -> Self {
        self.rejection_limit = limit;
        self
    }

    /// Returns the aligned-set size.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the minimum number of common excluders.
    #[must_use]
    pub fn min_excluders(&self) -> MinExcluders {
        self.min_excluders
    }

    /// Returns `true` if the non-hinter cache is enabled.
    #[must_use]
    pub fn cache_enabled(&self) -> bool {
        self.cache
    }

    /// Returns the non-hinter cache size exponent.
    #[must_use]
    pub fn cache_shift(&self) -> u8 {
        self.cache_shift
    }

    /// Returns the explicit watchdog budget, if any.
    #[must_use]
    pub fn watchdog_limit(&self) -> Option<u64> {
        self.watchdog_limit
    }

    /// Returns the rejection map cap.
    #[must_use]
    pub fn rejection_limit(&self) -> usize {
        self.rejection_limit
    }

    /// Returns the technique name for this degree.
    #[must_use]
    pub fn name(&self) -> &'static str {
        NAMES[self.degree]
    }
}
