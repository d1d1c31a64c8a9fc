//! Walk through a small editing session on the classic three-person sample
//!
//! Run with: cargo run --package gridcodec-session --example notebook_session

use chrono::NaiveDate;
use gridcodec_codec::Record;
use gridcodec_session::{GridEvent, GridSession, SessionOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let birthday = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).ok_or("bad sample date");

    let data = vec![
        Record::new()
            .with("name", "Alice")
            .with("age", 30i64)
            .with("hobbies", vec!["reading", "hiking", "coding"])
            .with("birthday", birthday(1993, 1, 15)?)
            .with("scores", vec![85.5, 92.3, 78.8]),
        Record::new()
            .with("name", "Bob")
            .with("age", 25i64)
            .with("hobbies", vec!["swimming", "gaming"])
            .with("birthday", birthday(1998, 4, 22)?)
            .with("scores", vec![88.0, 76.4]),
    ];

    let mut session = GridSession::new(&data, SessionOptions::default())?;
    println!("Columns: {:?}", session.columns());
    for (i, row) in session.rows().iter().enumerate() {
        println!("Row {}: {}", i, serde_json::to_string(row)?);
    }

    let events = [
        GridEvent::CellEdited {
            row: 0,
            column: "birthday".into(),
            value: "1993-02-01".into(),
        },
        GridEvent::CellEdited {
            row: 1,
            column: "birthday".into(),
            value: "someday".into(),
        },
        GridEvent::RowAdded,
        GridEvent::RowRemoved { index: None },
        GridEvent::RowRemoved { index: None },
    ];

    for event in events {
        match session.apply(event.clone()) {
            Ok(outcome) => println!("{:?} -> {:?}", event, outcome),
            Err(e) => println!("{:?} -> refused: {}", event, e),
        }
    }

    println!("\nGrid data updated:");
    println!("{}", serde_json::to_string_pretty(&session.updated_data()?)?);

    Ok(())
}
