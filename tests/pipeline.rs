use flightcodes_tools::ToolError;
use flightcodes_tools::clean::{FillPolicy, RouteCase};
use flightcodes_tools::io::{delimited, render};
use flightcodes_tools::model::{
    AIRLINE_CODE, CellValue, FLIGHT_CODES, FROM, FlightRecord, ROUTE, TO, records_from_table,
};
use flightcodes_tools::pipeline::{self, EMBEDDED_DATASET, PipelineOptions};
use std::fs;
use tempfile::tempdir;

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

#[test]
fn embedded_dataset_is_fully_normalised() {
    let table = pipeline::run(EMBEDDED_DATASET, &PipelineOptions::default())
        .expect("pipeline succeeded");

    assert_eq!(
        table.columns,
        vec!["Airline Code", "DelayTimes", "FlightCodes", "From", "To"]
    );
    assert!(!table.columns.iter().any(|column| column == ROUTE));

    let records = records_from_table(&table).expect("records built");
    let expected = vec![
        ("Air Canada", vec![21, 40], 20015, "WATERLOO", "NEWYORK"),
        ("Air France 12", vec![], 20025, "MONTREAL", "TORONTO"),
        ("Porter Airways", vec![60, 22, 87], 20035, "CALGARY", "OTTAWA"),
        ("12 Air France", vec![78, 66], 20045, "OTTAWA", "VANCOUVER"),
        ("Lufthansa", vec![12, 33], 20055, "LONDON", "MONTREAL"),
    ];
    let expected: Vec<FlightRecord> = expected
        .into_iter()
        .map(|(airline, delays, code, from, to)| FlightRecord {
            airline_code: Some(airline.to_string()),
            delay_times: delays,
            flight_code: code,
            from_location: from.to_string(),
            to_location: to.to_string(),
        })
        .collect();

    assert_eq!(records, expected);
}

#[test]
fn flight_codes_become_integers() {
    let table = pipeline::run(EMBEDDED_DATASET, &PipelineOptions::default())
        .expect("pipeline succeeded");
    let codes = table.column_values(FLIGHT_CODES).expect("column present");
    assert!(codes
        .iter()
        .all(|cell| matches!(cell, CellValue::Integer(_))));
}

#[test]
fn parser_reads_quoted_lufthansa_cell() {
    let table = delimited::read_table_from_str(EMBEDDED_DATASET).expect("parsed");
    assert_eq!(table.height(), 5);
    assert_eq!(table.rows[4][0], text("\".\\.Lufthansa.\\.\""));
    assert_eq!(table.rows[1][2], CellValue::Null);
    assert_eq!(table.rows[0][2], CellValue::Float(20015.0));
}

#[test]
fn malformed_row_is_fatal() {
    let source = "Airline Code;DelayTimes;FlightCodes;To_From\nAir Canada;[1];10;A_B\nBroken;[2]\n";
    let error = delimited::read_table_from_str(source).expect_err("malformed row rejected");
    assert!(matches!(
        error,
        ToolError::MalformedRow {
            line: 3,
            expected: 4,
            found: 2
        }
    ));
}

#[test]
fn empty_input_is_rejected() {
    let error = delimited::read_table_from_str("").expect_err("empty input rejected");
    assert!(matches!(error, ToolError::EmptyInput));
}

#[test]
fn missing_flight_codes_without_anchor_fail() {
    let source = "Airline Code;DelayTimes;FlightCodes;To_From\nA;[];;X_Y\nB;[];;Y_Z\n";
    let error = pipeline::run(source, &PipelineOptions::default()).expect_err("no anchor");
    assert!(matches!(error, ToolError::NoAnchorValues { column } if column == FLIGHT_CODES));
}

#[test]
fn route_without_single_separator_fails() {
    let source = "Airline Code;DelayTimes;FlightCodes;To_From\nA;[];1;X_Y\nB;[];2;Paris\n";
    let error = pipeline::run(source, &PipelineOptions::default()).expect_err("bad route");
    assert!(matches!(error, ToolError::InvalidRoute { row: 1, value } if value == "Paris"));

    let source = "Airline Code;DelayTimes;FlightCodes;To_From\nA;[];1;X_Y_Z\n";
    let error = pipeline::run(source, &PipelineOptions::default()).expect_err("bad route");
    assert!(matches!(error, ToolError::InvalidRoute { row: 0, .. }));

    let source = "Airline Code;DelayTimes;FlightCodes;To_From\nA;[];1;X_Y\nB;[];2;\n";
    let error = pipeline::run(source, &PipelineOptions::default()).expect_err("null route");
    assert!(matches!(error, ToolError::InvalidRoute { row: 1, value } if value == "NaN"));

    let source = "Airline Code;DelayTimes;FlightCodes;To_From\nA;[];1;a_\n";
    let error = pipeline::run(source, &PipelineOptions::default()).expect_err("empty side");
    assert!(matches!(error, ToolError::InvalidRoute { row: 0, value } if value == "a_"));
}

#[test]
fn midpoints_are_filled_between_known_codes() {
    let source = "Airline Code;DelayTimes;FlightCodes;To_From\n\
A;[];20015;a_b\nB;[];;a_b\nC;[];20035;a_b\nD;[];;a_b\nE;[];20055;a_b\n";
    let table = pipeline::run(source, &PipelineOptions::default()).expect("pipeline succeeded");
    let codes = table.column_values(FLIGHT_CODES).expect("column present");
    assert_eq!(
        codes,
        [20015, 20025, 20035, 20045, 20055]
            .into_iter()
            .map(CellValue::Integer)
            .collect::<Vec<_>>()
    );
}

#[test]
fn alternate_policies_follow_options() {
    let options = PipelineOptions {
        fill: FillPolicy::Sequence { step: 10 },
        route_case: RouteCase::Title,
    };
    let table = pipeline::run(EMBEDDED_DATASET, &options).expect("pipeline succeeded");

    assert_eq!(table.rows[1][2], CellValue::Integer(20025));
    assert_eq!(table.rows[3][2], CellValue::Integer(20045));
    assert_eq!(table.column_values(FROM).expect("from")[0], text("Waterloo"));
    assert_eq!(table.column_values(TO).expect("to")[3], text("Vancouver"));
}

#[test]
fn cleaning_is_idempotent_across_runs() {
    let table = pipeline::run(EMBEDDED_DATASET, &PipelineOptions::default())
        .expect("pipeline succeeded");
    let first = table.column_values(AIRLINE_CODE).expect("column present");

    let mut again = table.clone();
    flightcodes_tools::clean::clean_text_column(&mut again, AIRLINE_CODE).expect("cleaned");
    assert_eq!(again.column_values(AIRLINE_CODE).expect("column present"), first);
}

#[test]
fn printer_caps_output_at_ten_rows() {
    let mut source = String::from("Airline Code;DelayTimes;FlightCodes;To_From\n");
    for index in 0..12 {
        source.push_str(&format!("Carrier{index:02};[];{};a_b\n", 100 + index));
    }
    let table = pipeline::run(&source, &PipelineOptions::default()).expect("pipeline succeeded");
    assert_eq!(table.height(), 12);

    let rendered = render::render_table(&table, render::MAX_ROW_LIMIT);
    assert!(rendered.contains("Carrier09"));
    assert!(!rendered.contains("Carrier10"));
    assert!(!rendered.contains("Carrier11"));
    assert!(rendered.contains("Airline Code"));
    assert!(!rendered.contains(ROUTE));

    let oversized = render::render_table(&table, 12);
    assert!(oversized.contains("Carrier09"));
    assert!(!oversized.contains("Carrier10"));

    let json = render::render_json(&table, 12).expect("json rendered");
    let parsed: Vec<FlightRecord> = serde_json::from_str(&json).expect("json parsed");
    assert_eq!(parsed.len(), render::MAX_ROW_LIMIT);
}

#[test]
fn file_input_matches_embedded_input() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("flights.csv");
    fs::write(&path, EMBEDDED_DATASET).expect("input written");

    let from_file = delimited::read_table_from_path(&path).expect("file parsed");
    let from_file =
        pipeline::transform(from_file, &PipelineOptions::default()).expect("transformed");
    let embedded = pipeline::run(EMBEDDED_DATASET, &PipelineOptions::default())
        .expect("pipeline succeeded");
    assert_eq!(from_file, embedded);

    let missing = temp_dir.path().join("absent.csv");
    let error = delimited::read_table_from_path(&missing).expect_err("missing input");
    assert!(matches!(error, ToolError::MissingInput(path) if path == missing));
}

#[test]
fn json_output_lists_records() {
    let table = pipeline::run(EMBEDDED_DATASET, &PipelineOptions::default())
        .expect("pipeline succeeded");
    let json = render::render_json(&table, render::MAX_ROW_LIMIT).expect("json rendered");
    let parsed: Vec<FlightRecord> = serde_json::from_str(&json).expect("json parsed");
    assert_eq!(parsed, records_from_table(&table).expect("records built"));
    assert_eq!(parsed[4].airline_code.as_deref(), Some("Lufthansa"));
}
