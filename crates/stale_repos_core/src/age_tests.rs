//! Tests for AgeThreshold parsing

use super::*;

fn parse(expression: &str) -> TimeDelta {
    AgeThreshold::parse(expression)
        .unwrap_or_else(|e| panic!("'{expression}' should parse: {e}"))
        .as_duration()
}

#[test]
fn test_months_are_thirty_days() {
    assert_eq!(parse("3 months"), TimeDelta::days(90));
}

#[test]
fn test_years_are_365_days() {
    assert_eq!(parse("1 year"), TimeDelta::days(365));
}

#[test]
fn test_weeks_and_days_combine() {
    assert_eq!(parse("2 weeks 3 days"), TimeDelta::days(17));
}

#[test]
fn test_empty_expression_is_zero() {
    assert_eq!(parse(""), TimeDelta::zero());
}

#[test]
fn test_text_without_units_is_zero() {
    assert_eq!(parse("whenever"), TimeDelta::zero());
}

#[test]
fn test_hours_only() {
    let duration = parse("5 hours");
    assert_eq!(duration.num_days(), 0);
    assert_eq!(duration, TimeDelta::hours(5));
}

#[test]
fn test_count_without_whitespace() {
    assert_eq!(parse("10days"), TimeDelta::days(10));
}

#[test]
fn test_all_units() {
    let expected = TimeDelta::days(365 + 2 * 30 + 3 * 7 + 4)
        + TimeDelta::hours(5)
        + TimeDelta::minutes(6)
        + TimeDelta::seconds(7);

    assert_eq!(
        parse("1 year 2 months 3 weeks 4 days 5 hours 6 minutes 7 seconds"),
        expected
    );
}

#[test]
fn test_only_first_occurrence_of_a_unit_counts() {
    assert_eq!(parse("2 days and 5 days"), TimeDelta::days(2));
}

#[test]
fn test_multi_digit_counts() {
    assert_eq!(parse("18 months"), TimeDelta::days(540));
}

#[test]
fn test_unit_without_count_is_rejected() {
    let result = AgeThreshold::parse("day");

    match result {
        Err(Error::InvalidAgeExpression { unit, expression }) => {
            assert_eq!(unit, "day");
            assert_eq!(expression, "day");
        }
        other => panic!("Expected InvalidAgeExpression, got {other:?}"),
    }
}

#[test]
fn test_unit_inside_a_word_without_count_is_rejected() {
    assert!(AgeThreshold::parse("today").is_err());
}

#[test]
fn test_overflowing_count_is_rejected() {
    let result = AgeThreshold::parse("99999999999999999999 years");
    assert!(matches!(
        result,
        Err(Error::InvalidAgeExpression { ref unit, .. }) if unit == "year"
    ));
}

#[test]
fn test_overflowing_day_total_is_rejected() {
    let result = AgeThreshold::parse("9000000000000000 years");
    assert!(matches!(
        result,
        Err(Error::InvalidAgeExpression { ref unit, .. }) if unit == "day"
    ));
}

#[test]
fn test_from_str() {
    let threshold: AgeThreshold = "1 week".parse().expect("should parse");
    assert_eq!(threshold.as_duration(), TimeDelta::days(7));
}

#[test]
fn test_default_is_zero() {
    assert_eq!(AgeThreshold::default().as_duration(), TimeDelta::zero());
}

#[test]
fn test_display() {
    let threshold = AgeThreshold::new(TimeDelta::days(3) + TimeDelta::seconds(3_725));
    assert_eq!(threshold.to_string(), "3 days, 1h 2m 5s");
}

#[test]
fn test_every_unit_keyword_contributes_to_the_duration() {
    for unit in Unit::ALL {
        let expression = format!("1 {}", unit.keyword());
        let threshold = AgeThreshold::parse(&expression).expect("should parse");
        assert!(
            threshold.as_duration() > TimeDelta::zero(),
            "'{expression}' was ignored"
        );
    }
}

#[test]
fn test_unit_counts_record_each_unit() {
    let mut counts = UnitCounts::default();
    for unit in Unit::ALL {
        counts.set(unit, 1);
    }
    assert_eq!(
        counts,
        UnitCounts {
            years: 1,
            months: 1,
            weeks: 1,
            days: 1,
            hours: 1,
            minutes: 1,
            seconds: 1,
        }
    );
}
