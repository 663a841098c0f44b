use chrono::{NaiveDate, TimeZone, Utc};
use memory_calendar::ics::{self, CalendarMeta, IcsEvent};
use memory_calendar::sample::{sample_events, sample_table};
use memory_calendar::{AssociationTable, DEFAULT_PRODID, DateSpan, Engine};

fn meta() -> CalendarMeta {
    CalendarMeta::new(
        DEFAULT_PRODID,
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    )
}

#[test]
fn two_year_calendar_round_trips() {
    let table: AssociationTable = [
        ("001", vec!["apple", "fruit", "red"]),
        ("101", vec!["diamond; cut", "gem, stone", "back\\slash"]),
    ]
    .into_iter()
    .collect();
    let engine = Engine::new(&table, 2025);
    let span = DateSpan::years_from(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(), 2).unwrap();
    let events = engine.events(&span);
    assert_eq!(events.len(), span.len());

    let text = ics::to_ics_string(&events, &meta());
    for line in text.split("\r\n") {
        assert!(line.len() <= 75, "unfolded line: {line:?}");
    }

    let parsed = ics::read_events(&text).unwrap();
    let expected: Vec<IcsEvent> = events.iter().map(IcsEvent::from).collect();
    assert_eq!(parsed, expected);
}

#[test]
fn carriage_return_in_word_round_trips() {
    let csv = "001,apple,\"red\r\ngreen\",\"blue\rsky\"\n";
    let table = AssociationTable::from_reader(csv.as_bytes()).unwrap();
    let engine = Engine::new(&table, 2025);
    let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let events = engine.events(&DateSpan::new(day, day));

    let parsed = ics::read_events(&ics::to_ics_string(&events, &meta())).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].description, events[0].description());
    assert!(
        parsed[0]
            .description
            .starts_with("Other Possibilities\n=============\nred\ngreen, blue\nsky\n\n")
    );
}

#[test]
fn sample_calendar_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.ics");

    let events = sample_events(&sample_table());
    ics::write_file(&path, &events, &meta()).unwrap();

    let parsed = ics::read_file(&path).unwrap();
    assert_eq!(parsed.len(), 6);
    assert_eq!(parsed[0].summary, "001 apple");
    assert_eq!(parsed[5].date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    assert!(
        parsed[5]
            .description
            .ends_with("SEASON START REVIEW: Season -2: 201 to 230")
    );
}

#[test]
fn write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("out.ics");
    let err = ics::write_file(&path, &[], &meta()).unwrap_err();
    assert!(matches!(err, ics::IcsError::Write { .. }));
}
