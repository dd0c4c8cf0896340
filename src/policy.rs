//! Build-eligibility policy.
//!
//! Decides whether a content item takes part in the current build based on
//! its draft flag and publish/expiry dates. A `None` date is the zero date
//! and never excludes anything.

use crate::utils::date::DateTimeUtc;

/// Which otherwise-excluded items the build lets through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildFlags {
    pub future: bool,
    pub expired: bool,
    pub drafts: bool,
}

/// Eligibility against the wall clock.
pub fn should_build(
    flags: BuildFlags,
    is_draft: bool,
    publish_date: Option<DateTimeUtc>,
    expiry_date: Option<DateTimeUtc>,
) -> bool {
    should_build_at(flags, is_draft, publish_date, expiry_date, DateTimeUtc::now())
}

/// Eligibility against an explicit `now`.
///
/// Excluded iff any of: draft without `drafts`; publish date strictly after
/// `now` without `future`; expiry date strictly before `now` without `expired`.
pub fn should_build_at(
    flags: BuildFlags,
    is_draft: bool,
    publish_date: Option<DateTimeUtc>,
    expiry_date: Option<DateTimeUtc>,
    now: DateTimeUtc,
) -> bool {
    if is_draft && !flags.drafts {
        return false;
    }
    if !flags.future && publish_date.is_some_and(|date| date > now) {
        return false;
    }
    if !flags.expired && expiry_date.is_some_and(|date| date < now) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: DateTimeUtc = DateTimeUtc::new(2024, 6, 15, 12, 0, 0);
    const PAST: DateTimeUtc = DateTimeUtc::from_ymd(2020, 1, 1);
    const FUTURE: DateTimeUtc = DateTimeUtc::from_ymd(2030, 1, 1);

    fn flags(future: bool, expired: bool, drafts: bool) -> BuildFlags {
        BuildFlags {
            future,
            expired,
            drafts,
        }
    }

    #[test]
    fn test_plain_page_builds() {
        assert!(should_build_at(BuildFlags::default(), false, None, None, NOW));
        assert!(should_build_at(
            BuildFlags::default(),
            false,
            Some(PAST),
            Some(FUTURE),
            NOW
        ));
    }

    #[test]
    fn test_draft_requires_flag() {
        assert!(!should_build_at(BuildFlags::default(), true, None, None, NOW));
        assert!(should_build_at(flags(false, false, true), true, None, None, NOW));
    }

    #[test]
    fn test_future_requires_flag() {
        assert!(!should_build_at(BuildFlags::default(), false, Some(FUTURE), None, NOW));
        assert!(should_build_at(flags(true, false, false), false, Some(FUTURE), None, NOW));
    }

    #[test]
    fn test_expired_requires_flag() {
        assert!(!should_build_at(BuildFlags::default(), false, None, Some(PAST), NOW));
        assert!(should_build_at(flags(false, true, false), false, None, Some(PAST), NOW));
    }

    #[test]
    fn test_boundaries_are_strict() {
        // publish == now and expiry == now are both still eligible
        assert!(should_build_at(BuildFlags::default(), false, Some(NOW), Some(NOW), NOW));
    }

    /// Excluded iff at least one rule fires, and enabling any flag never
    /// excludes an included item.
    #[test]
    fn test_exhaustive_rules_and_monotonicity() {
        let dates = [None, Some(PAST), Some(NOW), Some(FUTURE)];
        let bools = [false, true];

        for &draft in &bools {
            for &publish in &dates {
                for &expiry in &dates {
                    for &f in &bools {
                        for &e in &bools {
                            for &d in &bools {
                                let fl = flags(f, e, d);
                                let got = should_build_at(fl, draft, publish, expiry, NOW);

                                let draft_rule = draft && !d;
                                let future_rule = !f && publish.is_some_and(|p| p > NOW);
                                let expired_rule = !e && expiry.is_some_and(|x| x < NOW);
                                assert_eq!(got, !(draft_rule || future_rule || expired_rule));

                                if got {
                                    for wider in [
                                        flags(true, e, d),
                                        flags(f, true, d),
                                        flags(f, e, true),
                                    ] {
                                        assert!(should_build_at(wider, draft, publish, expiry, NOW));
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_wall_clock_variant() {
        assert!(should_build(BuildFlags::default(), false, Some(PAST), None));
        assert!(!should_build(BuildFlags::default(), false, Some(FUTURE), None));
    }
}
