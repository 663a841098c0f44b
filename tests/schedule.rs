use chrono::{Datelike, NaiveDate, Weekday};
use memory_calendar::{AssociationTable, DateSpan, DayCode, Engine, ReviewWindow};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn two_years() -> DateSpan {
    DateSpan::new(date(2025, 1, 1), date(2026, 12, 31))
}

#[test]
fn documented_codes() {
    assert_eq!(DayCode::for_date(date(2025, 1, 1), 2025).to_string(), "001");
    assert_eq!(DayCode::for_date(date(2025, 5, 1), 2025).to_string(), "101");
    assert_eq!(DayCode::for_date(date(2026, 1, 1), 2025).to_string(), "401");
}

#[test]
fn prior_days_always_three_oldest_first() {
    let table = AssociationTable::new();
    let engine = Engine::new(&table, 2025);
    for day in two_years().days() {
        let prior = engine.prior_days(day);
        let expected: Vec<DayCode> = [3, 2, 1]
            .iter()
            .map(|&back| engine.code_for(day - chrono::Days::new(back)))
            .collect();
        let got: Vec<DayCode> = prior.iter().map(|e| e.code).collect();
        assert_eq!(got, expected, "{day}");
    }
}

#[test]
fn sunday_and_wednesday_blocks_have_seven_entries() {
    let table = AssociationTable::new();
    let engine = Engine::new(&table, 2025);
    for day in two_years().days() {
        for window in engine.review_windows(day) {
            match window {
                ReviewWindow::Sunday { week } => {
                    assert_eq!(day.weekday(), Weekday::Sun);
                    assert_eq!(week.len(), 7);
                    assert_eq!(week[0].code, engine.code_for(day - chrono::Days::new(7)));
                    assert_eq!(week[6].code, engine.code_for(day - chrono::Days::new(1)));
                }
                ReviewWindow::Wednesday {
                    week_minus_3,
                    week_minus_2,
                } => {
                    assert_eq!(day.weekday(), Weekday::Wed);
                    assert_eq!(week_minus_3.len(), 7);
                    assert_eq!(week_minus_2.len(), 7);
                    assert_eq!(
                        week_minus_3[0].code,
                        engine.code_for(day - chrono::Days::new(21))
                    );
                    assert_eq!(
                        week_minus_3[6].code,
                        engine.code_for(day - chrono::Days::new(15))
                    );
                    assert_eq!(
                        week_minus_2[0].code,
                        engine.code_for(day - chrono::Days::new(14))
                    );
                    assert_eq!(
                        week_minus_2[6].code,
                        engine.code_for(day - chrono::Days::new(8))
                    );
                }
                ReviewWindow::LastFriday { .. } | ReviewWindow::SeasonStart { .. } => {}
            }
        }
    }
}

#[test]
fn last_friday_fires_once_per_month() {
    let table = AssociationTable::new();
    let engine = Engine::new(&table, 2025);
    let mut months = Vec::new();
    for day in two_years().days() {
        let fired = engine
            .review_windows(day)
            .iter()
            .any(|w| matches!(w, ReviewWindow::LastFriday { .. }));
        if fired {
            assert_eq!(day.weekday(), Weekday::Fri, "{day}");
            assert!(day.day() + 7 > memory_calendar::last_of_month(day).day(), "{day}");
            months.push((day.year(), day.month()));
        }
    }
    assert_eq!(months.len(), 24);
    months.dedup();
    assert_eq!(months.len(), 24);
}

#[test]
fn season_start_only_on_quarter_first_days() {
    let table = AssociationTable::new();
    let engine = Engine::new(&table, 2025);
    let fired: Vec<NaiveDate> = two_years()
        .days()
        .filter(|&day| {
            engine
                .review_windows(day)
                .iter()
                .any(|w| matches!(w, ReviewWindow::SeasonStart { .. }))
        })
        .collect();
    assert_eq!(fired.len(), 8);
    for day in fired {
        assert_eq!(day.day(), 1);
        assert!([1, 4, 7, 10].contains(&day.month()));
    }
}

#[test]
fn blocks_follow_fixed_order() {
    // 2025-01-01 is a Wednesday and a season start
    let table = AssociationTable::new();
    let engine = Engine::new(&table, 2025);
    let description = engine.event_for(date(2025, 1, 1)).description().to_owned();
    let wednesday = description.find("\nWEDNESDAY REVIEW: Week -3: ").unwrap();
    let season = description.find("\nSEASON START REVIEW: Season -2: ").unwrap();
    assert!(wednesday < season);
    assert!(description.ends_with("Season -2: -199 to -170"));
}

#[test]
fn every_event_has_three_sections() {
    let table: AssociationTable = [("001", vec!["apple", "fruit"])].into_iter().collect();
    let engine = Engine::new(&table, 2025);
    let events = engine.events(&two_years());
    assert_eq!(events.len(), 730);
    for event in &events {
        let description = event.description();
        let alternates = description.find("Other Possibilities\n=============\n").unwrap();
        let review = description.find("\n\nTo Review\n=======\n").unwrap();
        let logs = description.find("\n\nDay Logs\n======\n").unwrap();
        assert!(alternates < review && review < logs);
        assert!(event.summary().starts_with(&event.code().to_string()));
    }
}

#[test]
fn missing_association_uses_placeholder() {
    let table: AssociationTable = [("001", vec!["apple", "fruit"])].into_iter().collect();
    let engine = Engine::new(&table, 2025);
    let event = engine.event_for(date(2025, 1, 31));
    assert_eq!(event.summary(), "031 No association");
    assert!(
        event
            .description()
            .starts_with("Other Possibilities\n=============\n\n\n")
    );
}
