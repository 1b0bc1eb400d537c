//! Tests for the line classifier.

use super::*;

// ==================== Test Helpers ====================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 6, 1).unwrap()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn parse(line: &str) -> ParseResult<TaskRecord> {
    classify_line(line, &LineContext::new(7, None, today()))
}

fn parse_in(line: &str, category: &str) -> ParseResult<TaskRecord> {
    classify_line(line, &LineContext::new(7, Some(category), today()))
}

// ==================== Todo Tests ====================

#[test]
fn test_parse_todo() {
    let record = parse("t  2014-06-03 week 1 lab report").unwrap();
    assert_eq!(record.kind(), TaskKind::Todo);
    assert_eq!(record.description(), "week 1 lab report");
    assert_eq!(record.due_date(), Some(ymd(2014, 6, 3)));
    assert_eq!(record.days_away(), Some(2));
    assert_eq!(record.proximity_window(), None);
    assert_eq!(record.next_occurrence(), None);
    assert_eq!(record.source_line(), 7);
    assert_eq!(record.category(), None);
}

#[test]
fn test_parse_todo_overdue() {
    let record = parse("t 2014-05-20 late").unwrap();
    assert_eq!(record.days_away(), Some(-12));
}

#[test]
fn test_parse_todo_uppercase_letter() {
    let record = parse("T 2014-06-01 shouting").unwrap();
    assert_eq!(record.kind(), TaskKind::Todo);
    assert_eq!(record.days_away(), Some(0));
}

#[test]
fn test_parse_todo_keeps_category() {
    let record = parse_in("t 2014-06-13 assignment 1 due", "CS134   ").unwrap();
    assert_eq!(record.category(), Some("CS134   "));
}

#[test]
fn test_parse_todo_missing_description() {
    assert_eq!(
        parse("t 2014-06-03"),
        Err(ParseError::Malformed {
            kind: TaskKind::Todo
        })
    );
    assert_eq!(
        parse("t 2014-06-03    "),
        Err(ParseError::Malformed {
            kind: TaskKind::Todo
        })
    );
}

#[test]
fn test_parse_todo_invalid_date() {
    assert!(matches!(
        parse("t 2024-13-40 bad date"),
        Err(ParseError::InvalidDate(_))
    ));
}

#[test]
fn test_parse_todo_rejects_priority() {
    assert!(matches!(
        parse("t3 2014-06-03 nope"),
        Err(ParseError::Malformed { .. })
    ));
}

// ==================== Sleeping / Appointment Tests ====================

#[test]
fn test_parse_sleeping() {
    let record = parse("s1 2014-06-06 backups tomorrow!").unwrap();
    assert_eq!(record.kind(), TaskKind::Sleeping);
    assert_eq!(record.proximity_window(), Some(1));
    assert_eq!(record.days_away(), Some(5));
    assert_eq!(record.description(), "backups tomorrow!");
}

#[test]
fn test_parse_sleeping_requires_window() {
    assert!(matches!(
        parse("s 2014-06-06 no window"),
        Err(ParseError::Malformed {
            kind: TaskKind::Sleeping
        })
    ));
}

#[test]
fn test_parse_appointment() {
    let record = parse("a2 2014-06-05 12:30 appointment with lecturer").unwrap();
    assert_eq!(record.kind(), TaskKind::Appointment);
    assert_eq!(record.proximity_window(), Some(2));
    assert_eq!(record.days_away(), Some(4));
    assert_eq!(record.description(), "12:30 appointment with lecturer");
}

#[test]
fn test_parse_window_out_of_range() {
    assert_eq!(
        parse("a99999999999 2014-06-05 far too sleepy"),
        Err(ParseError::NumberOutOfRange {
            value: "99999999999".to_string()
        })
    );
}

// ==================== Constant / Wishlist Tests ====================

#[test]
fn test_parse_constant() {
    let record = parse("c2            fix something soon").unwrap();
    assert_eq!(record.kind(), TaskKind::Constant);
    assert_eq!(record.days_away(), Some(2));
    assert_eq!(record.due_date(), None);
    assert_eq!(record.proximity_window(), None);
    assert_eq!(record.description(), "fix something soon");
}

#[test]
fn test_parse_constant_requires_days() {
    assert!(matches!(
        parse("c fix something"),
        Err(ParseError::Malformed {
            kind: TaskKind::Constant
        })
    ));
}

#[test]
fn test_parse_wishlist() {
    let record = parse("w             fix something whenever").unwrap();
    assert_eq!(record.kind(), TaskKind::Wishlist);
    assert_eq!(record.days_away(), None);
    assert_eq!(record.due_date(), None);
    assert_eq!(record.proximity_window(), None);
    assert_eq!(record.description(), "fix something whenever");
}

#[test]
fn test_parse_wishlist_description_may_look_like_date() {
    let record = parse("w 2014-06-03 is just text").unwrap();
    assert_eq!(record.due_date(), None);
    assert_eq!(record.description(), "2014-06-03 is just text");
}

// ==================== Recurring Tests ====================

#[test]
fn test_parse_recurring_from_due_date() {
    let record = parse("r3 2014-06-10 =2w water the plants").unwrap();
    assert_eq!(record.kind(), TaskKind::Recurring);
    assert_eq!(record.proximity_window(), Some(3));
    assert_eq!(record.days_away(), Some(9));
    assert_eq!(record.next_occurrence(), Some(ymd(2014, 6, 24)));
    assert_eq!(
        record.recurrence(),
        Some(Recurrence {
            anchor: RecurrenceAnchor::FromDueDate,
            count: 2,
            unit: RecurrenceUnit::Week,
        })
    );
    assert_eq!(record.description(), "water the plants");
}

#[test]
fn test_parse_recurring_from_today() {
    let record = parse("r5 2014-06-10 +12d haircut").unwrap();
    assert_eq!(record.next_occurrence(), Some(ymd(2014, 6, 13)));
    assert_eq!(
        record.recurrence().map(|r| r.anchor),
        Some(RecurrenceAnchor::FromToday)
    );
}

#[test]
fn test_parse_recurring_month_and_year_unsupported() {
    assert_eq!(
        parse("r5 2016-02-02 +2m Do something every 2 months apart"),
        Err(ParseError::UnsupportedUnit { unit: 'm' })
    );
    assert_eq!(
        parse("r3 2016-02-01 =1y Do something yearly"),
        Err(ParseError::UnsupportedUnit { unit: 'y' })
    );
}

#[test]
fn test_parse_recurring_bad_token() {
    assert!(matches!(
        parse("r3 2016-02-01 2w missing sign"),
        Err(ParseError::Malformed {
            kind: TaskKind::Recurring
        })
    ));
    assert!(matches!(
        parse("r3 2016-02-01 =2q unknown unit"),
        Err(ParseError::Malformed { .. })
    ));
}

#[test]
fn test_parse_recurring_invalid_date() {
    assert!(matches!(
        parse("r3 2016-02-30 =2w no such day"),
        Err(ParseError::InvalidDate(_))
    ));
}

// ==================== Dispatch Tests ====================

#[test]
fn test_unknown_type_letter() {
    assert_eq!(
        parse("x 2014-06-03 what is this"),
        Err(ParseError::Unrecognized { first: 'x' })
    );
    assert_eq!(
        parse(" t 2014-06-03 indented"),
        Err(ParseError::Unrecognized { first: ' ' })
    );
}

#[test]
fn test_empty_line() {
    assert_eq!(parse(""), Err(ParseError::Empty));
}

#[test]
fn test_field_presence_per_kind() {
    let lines = [
        ("t 2014-06-03 a", true, false, true),
        ("s1 2014-06-03 a", true, true, true),
        ("a1 2014-06-03 a", true, true, true),
        ("c1 a", false, false, true),
        ("w a", false, false, false),
        ("r1 2014-06-03 =1d a", true, true, true),
    ];
    for (line, has_date, has_window, has_days) in lines {
        let record = parse(line).unwrap();
        assert_eq!(record.due_date().is_some(), has_date, "{line}");
        assert_eq!(record.proximity_window().is_some(), has_window, "{line}");
        assert_eq!(record.days_away().is_some(), has_days, "{line}");
        assert_eq!(
            record.next_occurrence().is_some(),
            record.kind() == TaskKind::Recurring,
            "{line}"
        );
    }
}

#[test]
fn test_date_span() {
    let line = "r3 2014-06-10 =2w water the plants";
    assert_eq!(date_span(line), Some(3..13));
    assert_eq!(&line[date_span(line).unwrap()], "2014-06-10");
    assert_eq!(date_span("w 2014-06-10 text"), None);
    assert_eq!(date_span("c1 text"), None);
}
