// src/interval_tests.rs

#[cfg(test)]
mod tests {
    use crate::interval::*;
    use crate::record::DayPunch;

    // Helper function to create a punch pair
    fn punch(check_in: Option<&str>, check_out: Option<&str>) -> DayPunch {
        DayPunch {
            check_in: check_in.map(str::to_string),
            check_out: check_out.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_well_formed_and_placeholders() {
        assert_eq!(PunchTime::parse(Some("08:00")), PunchTime::Clock(480));
        assert_eq!(PunchTime::parse(Some(" 17:45 ")), PunchTime::Clock(1065));
        assert_eq!(PunchTime::parse(None), PunchTime::Absent);
        assert_eq!(PunchTime::parse(Some("")), PunchTime::Absent);
        assert_eq!(PunchTime::parse(Some("-")), PunchTime::Absent);
    }

    #[test]
    fn test_parse_tolerates_out_of_range_values() {
        assert_eq!(PunchTime::parse(Some("25:70")), PunchTime::Clock(25 * 60 + 70));
        assert_eq!(PunchTime::parse(Some("08:00:59")), PunchTime::Clock(480));
    }

    #[test]
    fn test_parse_overflowing_hours_is_unparseable() {
        let raw = "999999999999999999:00";
        assert_eq!(
            PunchTime::parse(Some(raw)),
            PunchTime::Unparseable(raw.to_string())
        );
        assert_eq!(
            PunchTime::parse(Some("153722867280912930:59")).minutes(),
            None
        );
    }

    #[test]
    fn test_huge_punch_times_never_panic() {
        let interval = DayInterval::compute(1, &punch(Some("08:00"), Some("999999999999999999:00")));
        assert_eq!(interval.worked_minutes, None);
        assert_eq!(interval.duration_label(), PLACEHOLDER);
        assert_eq!(interval.check_out, "999999999999999999:00");

        // Both ends parse, but the span does not fit in i64
        let interval = DayInterval::compute(
            2,
            &punch(Some("-153722867280912930:00"), Some("153722867280912930:00")),
        );
        assert_eq!(interval.worked_minutes, None);
    }

    #[test]
    fn test_monthly_total_saturates_instead_of_wrapping() {
        let huge = "153722867280912929:00";
        let mut total = MonthlyTotal::new();
        total.accumulate(1, &punch(Some("00:00"), Some(huge)));
        total.accumulate(2, &punch(Some("00:00"), Some(huge)));
        assert_eq!(total.minutes(), i64::MAX);
    }

    #[test]
    fn test_parse_malformed_is_unparseable() {
        assert_eq!(
            PunchTime::parse(Some("ab:cd")),
            PunchTime::Unparseable("ab:cd".to_string())
        );
        assert_eq!(
            PunchTime::parse(Some("0800")),
            PunchTime::Unparseable("0800".to_string())
        );
        assert_eq!(PunchTime::parse(Some("falta")).minutes(), None);
    }

    #[test]
    fn test_day_with_valid_pair() {
        let interval = DayInterval::compute(5, &punch(Some("08:00"), Some("12:00")));
        assert_eq!(interval.worked_minutes, Some(240));
        assert_eq!(interval.duration_label(), "04:00");
        assert_eq!(interval.check_in, "08:00");
        assert_eq!(interval.check_out, "12:00");
    }

    #[test]
    fn test_overnight_shift_is_no_data() {
        let interval = DayInterval::compute(6, &punch(Some("22:00"), Some("06:00")));
        assert_eq!(interval.worked_minutes, None);
        assert_eq!(interval.duration_label(), "-");
    }

    #[test]
    fn test_equal_times_and_missing_sides_are_no_data() {
        let cases = [
            punch(Some("08:00"), Some("08:00")),
            punch(Some("08:00"), None),
            punch(None, Some("12:00")),
            punch(None, None),
            punch(Some("08:00"), Some("meio-dia")),
        ];
        for case in &cases {
            let interval = DayInterval::compute(1, case);
            assert_eq!(interval.worked_minutes, None, "case {:?}", case);
            assert_eq!(interval.duration_label(), PLACEHOLDER);
        }
    }

    #[test]
    fn test_absent_punches_echo_placeholder() {
        let interval = DayInterval::compute(31, &punch(None, Some("  ")));
        assert_eq!(interval.check_in, "-");
        assert_eq!(interval.check_out, "-");
    }

    #[test]
    fn test_format_duration_exceeds_24_hours() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(59), "00:59");
        assert_eq!(format_duration(1450), "24:10");
        assert_eq!(format_duration(176 * 60 + 5), "176:05");
    }

    #[test]
    fn test_monthly_total_only_counts_defined_days() {
        let mut total = MonthlyTotal::new();
        total.accumulate(1, &punch(Some("08:00"), Some("12:00")));
        total.accumulate(2, &punch(Some("22:00"), Some("06:00")));
        total.accumulate(3, &punch(Some("13:00"), Some("17:30")));
        total.accumulate(4, &punch(Some("xx"), Some("17:30")));

        assert_eq!(total.minutes(), 240 + 270);
        assert_eq!(total.label(), "08:30");
    }

    #[test]
    fn test_monthly_total_is_order_independent() {
        let punches = [
            punch(Some("07:10"), Some("11:55")),
            punch(Some("08:00"), Some("18:00")),
            punch(Some("09:30"), Some("09:45")),
        ];

        let mut forward = MonthlyTotal::new();
        for (i, p) in punches.iter().enumerate() {
            forward.accumulate(i as u8 + 1, p);
        }
        let mut backward = MonthlyTotal::new();
        for (i, p) in punches.iter().enumerate().rev() {
            backward.accumulate(i as u8 + 1, p);
        }

        assert_eq!(forward, backward);
        assert_eq!(forward.minutes(), 285 + 600 + 15);
    }
}
