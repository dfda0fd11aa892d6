//! Timezone lookup table.
//!
//! Maps the labels shown in the dropdown to the POSIX `TZ` rule strings the
//! peripheral understands. The table is static and read-only.

/// A selectable timezone and its POSIX rule string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneRule {
    /// Label shown in the UI
    pub label: &'static str,
    /// POSIX rule, e.g. `EST5EDT,M3.2.0,M11.1.0`
    pub posix: &'static str,
}

/// All timezones offered to the user, in display order
pub const TIMEZONES: &[TimezoneRule] = &[
    TimezoneRule {
        label: "UTC",
        posix: "UTC0",
    },
    TimezoneRule {
        label: "CET (Central Europe)",
        posix: "CET-1CEST,M3.5.0/2,M10.5.0/3",
    },
    TimezoneRule {
        label: "EST (Eastern US)",
        posix: "EST5EDT,M3.2.0,M11.1.0",
    },
    TimezoneRule {
        label: "PST (Pacific US)",
        posix: "PST8PDT,M3.2.0,M11.1.0",
    },
];

/// Find a timezone by its exact display label
pub fn lookup(label: &str) -> Option<&'static TimezoneRule> {
    TIMEZONES.iter().find(|tz| tz.label == label)
}

/// The initial dropdown selection
pub fn default_rule() -> &'static TimezoneRule {
    &TIMEZONES[0]
}
