//! Flatten then reconstruct must return the original records

use chrono::NaiveDate;
use gridcodec_codec::{
    detect, flatten, reconstruct, CodecOptions, FieldType, FlatRecord, ListStyle, Record, Value,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn people() -> Vec<Record> {
    vec![
        Record::new()
            .with("name", "Alice")
            .with("age", 30i64)
            .with("city", "New York")
            .with("hobbies", vec!["reading", "hiking", "coding"])
            .with("birthday", date(1993, 1, 15))
            .with("scores", vec![85.5, 92.3, 78.8]),
        Record::new()
            .with("name", "Bob")
            .with("age", 25i64)
            .with("city", "San Francisco")
            .with("hobbies", vec!["swimming", "gaming"])
            .with("birthday", date(1998, 4, 22))
            .with("scores", vec![88.0, 76.4]),
        Record::new()
            .with("name", "Charlie")
            .with("age", 35i64)
            .with("city", "Chicago")
            .with("hobbies", vec!["running", "cooking", "travelling", "photography"])
            .with("birthday", date(1989, 11, 30))
            .with("scores", vec![91.2, 89.5, 95.3, 82.4]),
    ]
}

#[test]
fn test_round_trip_comma_space() {
    let records = people();
    let options = CodecOptions::default();
    let schema = detect(&records).unwrap();

    let flat = flatten(&records, &schema, &options).unwrap();
    assert_eq!(flat[0].get(3), Some(&Value::from("reading, hiking, coding")));
    assert_eq!(flat[1].get(4), Some(&Value::from("1998-04-22")));
    assert_eq!(flat[1].get(5), Some(&Value::from("88.0, 76.4")));

    let back = reconstruct(&flat, &schema, &options).unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_round_trip_json_array() {
    let records = people();
    let options = CodecOptions::default().with_list_style(ListStyle::JsonArray);
    let schema = detect(&records).unwrap();

    let flat = flatten(&records, &schema, &options).unwrap();
    assert_eq!(flat[2].get(5), Some(&Value::from("[91.2,89.5,95.3,82.4]")));

    let back = reconstruct(&flat, &schema, &options).unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_round_trip_integer_and_empty_lists() {
    let records = vec![
        Record::new().with("ids", vec![1i64, 2, 3]).with("tags", vec!["a"]),
        Record::new().with("ids", Vec::<i64>::new()).with("tags", Vec::<String>::new()),
    ];
    let options = CodecOptions::default();
    let schema = detect(&records).unwrap();
    assert_eq!(schema.field_type("tags"), Some(FieldType::StringList));

    let flat = flatten(&records, &schema, &options).unwrap();
    let back = reconstruct(&flat, &schema, &options).unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_round_trip_ignores_blank_rows() {
    let records = people();
    let options = CodecOptions::default();
    let schema = detect(&records).unwrap();

    let mut flat = flatten(&records, &schema, &options).unwrap();
    flat.insert(1, FlatRecord::blank(schema.len()));
    flat.push(FlatRecord::blank(schema.len()));

    let back = reconstruct(&flat, &schema, &options).unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_separator_inside_element() {
    let records = vec![Record::new().with("cities", vec!["Washington, D.C.", "Boston"])];
    let schema = detect(&records).unwrap();

    assert!(flatten(&records, &schema, &CodecOptions::default()).is_err());

    let options = CodecOptions::default().with_list_style(ListStyle::JsonArray);
    let flat = flatten(&records, &schema, &options).unwrap();
    assert_eq!(reconstruct(&flat, &schema, &options).unwrap(), records);
}
