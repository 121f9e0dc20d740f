//! Lesson identifiers and descriptive metadata.

use std::fmt;
use std::str::FromStr;

use crate::types::SigmaError;

/// Identifier of one of the four lessons.
///
/// # Examples
/// ```
/// use sigma_core::lesson::ModuleId;
///
/// let id: ModuleId = "time".parse().unwrap();
/// assert_eq!(id, ModuleId::Time);
/// assert_eq!(id.to_string(), "time");
/// assert_eq!(id.info().title, "Time Aggregation");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ModuleId {
    /// Additivity of independent variances
    #[default]
    Additivity,
    /// Convexity of SD under averaging
    Averaging,
    /// Variance impact of SD shocks
    Distance,
    /// Square-root-of-time scaling
    Time,
}

impl ModuleId {
    /// All lessons in presentation order.
    pub const ALL: [ModuleId; 4] = [
        ModuleId::Additivity,
        ModuleId::Averaging,
        ModuleId::Distance,
        ModuleId::Time,
    ];

    /// Stable lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleId::Additivity => "additivity",
            ModuleId::Averaging => "averaging",
            ModuleId::Distance => "distance",
            ModuleId::Time => "time",
        }
    }

    /// Descriptive metadata for this lesson.
    pub fn info(&self) -> &'static LessonInfo {
        match self {
            ModuleId::Additivity => &CATALOG[0],
            ModuleId::Averaging => &CATALOG[1],
            ModuleId::Distance => &CATALOG[2],
            ModuleId::Time => &CATALOG[3],
        }
    }
}

impl FromStr for ModuleId {
    type Err = SigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "additivity" => Ok(ModuleId::Additivity),
            "averaging" => Ok(ModuleId::Averaging),
            "distance" => Ok(ModuleId::Distance),
            "time" => Ok(ModuleId::Time),
            _ => Err(SigmaError::UnknownModule(s.to_string())),
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title and descriptions shown for a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LessonInfo {
    /// Lesson identifier
    pub id: ModuleId,
    /// Full title
    pub title: &'static str,
    /// One-line teaser
    pub short_description: &'static str,
    /// Paragraph explaining what the lesson demonstrates
    pub description: &'static str,
    /// Takeaway shown next to the results
    pub insight: &'static str,
}

/// Static lesson table, in presentation order.
pub const CATALOG: [LessonInfo; 4] = [
    LessonInfo {
        id: ModuleId::Additivity,
        title: "Additivity & Independence",
        short_description: "Why σ₁ + σ₂ is wrong",
        description: "Demonstrating how independent variances add linearly, while standard deviations behave like sides of a triangle.",
        insight: "Standard deviations of independent sources are orthogonal vectors, not parallel lines.",
    },
    LessonInfo {
        id: ModuleId::Averaging,
        title: "Averaging & Interpolation",
        short_description: "The convexity of SD",
        description: "Visualizing why the RMS blend of two standard deviations sits above their simple average.",
        insight: "Mixing low and high dispersion gives a combined state more dispersed than the simple average suggests.",
    },
    LessonInfo {
        id: ModuleId::Distance,
        title: "Distance & Shock Size",
        short_description: "Equal σ jumps ≠ Equal impact",
        description: "Comparing linear standard deviation distance against the true energy/variance distance.",
        insight: "Distance in standard deviation space is misleading: the same jump adds far more variance at a high baseline.",
    },
    LessonInfo {
        id: ModuleId::Time,
        title: "Time Aggregation",
        short_description: "The √T Rule",
        description: "Deriving the square root of time rule from variance additivity (Random Walk).",
        insight: "Variances add over time. Standard deviations scale with the square root of time for independent increments.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_ids() {
        for id in ModuleId::ALL {
            assert_eq!(id.as_str().parse::<ModuleId>().unwrap(), id);
            assert_eq!(id.info().id, id);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Distance".parse::<ModuleId>().unwrap(), ModuleId::Distance);
        assert_eq!(" TIME ".parse::<ModuleId>().unwrap(), ModuleId::Time);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "volatility".parse::<ModuleId>().unwrap_err();
        assert_eq!(err, SigmaError::UnknownModule("volatility".to_string()));
    }

    #[test]
    fn test_default_is_additivity() {
        assert_eq!(ModuleId::default(), ModuleId::Additivity);
    }

    #[test]
    fn test_catalog_order_matches_all() {
        let ids: Vec<ModuleId> = CATALOG.iter().map(|info| info.id).collect();
        assert_eq!(ids, ModuleId::ALL.to_vec());
        assert!(CATALOG.iter().all(|info| !info.title.is_empty()));
    }
}
