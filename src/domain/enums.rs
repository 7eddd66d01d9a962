use serde::{Deserialize, Serialize};

/// Priority level of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parse a priority from its stored form ("low"/"medium"/"high")
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Stored form of the priority
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Sort rank: high sorts before medium sorts before low
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Flame badge for display
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Low => "🔥",
            Self::Medium => "🔥🔥",
            Self::High => "🔥🔥🔥",
        }
    }

    /// Next level (wraps around), for cycling in the input form
    pub fn next(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// Previous level (wraps around)
    pub fn prev(&self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Medium => Self::Low,
            Self::High => Self::Medium,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Low
    }
}

/// View selector over the task collection (not a storage-level property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    All,
    Active,
    Completed,
}

impl Filter {
    /// Display label for the filter tab
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Next filter tab (wraps around)
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    /// All filters in tab order
    pub fn all() -> &'static [Filter] {
        &[Filter::All, Filter::Active, Filter::Completed]
    }

    /// Index in tab order
    pub fn index(&self) -> usize {
        match self {
            Self::All => 0,
            Self::Active => 1,
            Self::Completed => 2,
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::All
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_str() {
        assert_eq!(Priority::from_str("low"), Some(Priority::Low));
        assert_eq!(Priority::from_str("medium"), Some(Priority::Medium));
        assert_eq!(Priority::from_str("HIGH"), Some(Priority::High));
        assert_eq!(Priority::from_str("urgent"), None);
        assert_eq!(Priority::from_str(""), None);
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_priority_cycle() {
        assert_eq!(Priority::Low.next(), Priority::Medium);
        assert_eq!(Priority::High.next(), Priority::Low);
        assert_eq!(Priority::Low.prev(), Priority::High);
    }

    #[test]
    fn test_filter_cycle_reaches_all() {
        let mut filter = Filter::All;
        filter = filter.next();
        assert_eq!(filter, Filter::Active);
        filter = filter.next();
        assert_eq!(filter, Filter::Completed);
        filter = filter.next();
        assert_eq!(filter, Filter::All);
    }

    #[test]
    fn test_filter_index_matches_tab_order() {
        for (i, filter) in Filter::all().iter().enumerate() {
            assert_eq!(filter.index(), i);
        }
    }
}
