use serde::{Deserialize, Serialize};

/// Indicator category taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Momentum oscillators
    Momentum,
    /// Price overlays
    Overlap,
    /// Return measures
    Performance,
    /// Statistical transforms
    Statistics,
    /// Trend strength
    Trend,
    /// Volatility measures
    Volatility,
    /// Volume based
    Volume,
}

impl Category {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Momentum => "momentum",
            Category::Overlap => "overlap",
            Category::Performance => "performance",
            Category::Statistics => "statistics",
            Category::Trend => "trend",
            Category::Volatility => "volatility",
            Category::Volume => "volume",
        }
    }
}

/// Error parsing a category name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCategoryError;

impl std::fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unrecognized indicator category")
    }
}

impl std::error::Error for ParseCategoryError {}

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "momentum" => Ok(Category::Momentum),
            "overlap" => Ok(Category::Overlap),
            "performance" => Ok(Category::Performance),
            "statistics" => Ok(Category::Statistics),
            "trend" => Ok(Category::Trend),
            "volatility" => Ok(Category::Volatility),
            "volume" => Ok(Category::Volume),
            _ => Err(ParseCategoryError),
        }
    }
}

/// A named series of optional samples.
///
/// `None` marks an undefined entry: warm-up rows, missing input or a
/// post-processing shift. Alignment between series is positional; all
/// series taking part in one computation must have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Output name, e.g. "RSI_14"
    pub name: String,
    /// Category tag for indicator outputs
    pub category: Option<Category>,
    /// Sample values; `None` marks an undefined entry
    pub values: Vec<Option<f64>>,
}

impl Series {
    /// Creates a series from optional samples.
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            category: None,
            values,
        }
    }

    /// Creates a fully defined series from raw values.
    pub fn from_values(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, values.into_iter().map(Some).collect())
    }

    /// Sets the category tag.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Number of samples, defined or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no samples at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample at `index`, `None` when out of bounds or undefined.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Returns the series when it has at least `min_len` samples.
    ///
    /// Absence is the library's only failure signal: a series too short
    /// for an indicator's window never produces a partial result.
    #[must_use]
    pub fn verify(&self, min_len: usize) -> Option<&Series> {
        if self.values.len() < min_len {
            return None;
        }
        Some(self)
    }
}
