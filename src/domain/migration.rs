use serde::Serialize;

/// Where a public signature is in its migration.
///
/// `Original` has only the old entry point, `Transitional` keeps the old one
/// forwarding to its replacement, `Final` has only the replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStage {
    Original,
    Transitional,
    Final,
}

impl ApiStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiStage::Original => "original",
            ApiStage::Transitional => "transitional",
            ApiStage::Final => "final",
        }
    }
}

impl std::fmt::Display for ApiStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A deprecated entry point and what replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegacyEntryPoint {
    pub path: &'static str,
    pub replacement: &'static str,
    pub since: &'static str,
    pub change: &'static str,
}

pub const LEGACY_ENTRY_POINTS: &[LegacyEntryPoint] = &[
    LegacyEntryPoint {
        path: "ReservationLedger::add_reservation_legacy",
        replacement: "ReservationLedger::add_reservation",
        since: "0.1.0",
        change: "added parameter `is_priority` (legacy form passes false)",
    },
    LegacyEntryPoint {
        path: "region::in_new_england",
        replacement: "region::is_in_new_england",
        since: "0.1.0",
        change: "takes the state code instead of the whole customer",
    },
    LegacyEntryPoint {
        path: "geometry::circum",
        replacement: "geometry::circumference",
        since: "0.1.0",
        change: "renamed",
    },
];

/// Stage this build was compiled at. Controlled by the `legacy-api` feature.
pub fn current_stage() -> ApiStage {
    if cfg!(feature = "legacy-api") {
        ApiStage::Transitional
    } else {
        ApiStage::Final
    }
}

/// Legacy entry points compiled into this build.
pub fn active_legacy_entry_points() -> &'static [LegacyEntryPoint] {
    match current_stage() {
        ApiStage::Final => &[],
        _ => LEGACY_ENTRY_POINTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_entries_are_distinct() {
        for (i, a) in LEGACY_ENTRY_POINTS.iter().enumerate() {
            assert_ne!(a.path, a.replacement);
            for b in &LEGACY_ENTRY_POINTS[i + 1..] {
                assert_ne!(a.path, b.path);
            }
        }
    }

    #[test]
    #[cfg(feature = "legacy-api")]
    fn test_transitional_stage_exposes_catalogue() {
        assert_eq!(current_stage(), ApiStage::Transitional);
        assert_eq!(active_legacy_entry_points().len(), LEGACY_ENTRY_POINTS.len());
    }

    #[test]
    #[cfg(not(feature = "legacy-api"))]
    fn test_final_stage_has_no_legacy_entry_points() {
        assert_eq!(current_stage(), ApiStage::Final);
        assert!(active_legacy_entry_points().is_empty());
    }
}
