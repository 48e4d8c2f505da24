use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_gradepointd");
    let mut child = Command::new(exe)
        .env("GRADEPOINTD_MAX_COURSES", "6")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn gradepointd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn call(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = call(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn error_code(value: &serde_json::Value) -> Option<&str> {
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
}

#[test]
fn grades_methods_compute_and_classify() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let normalized = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "grades.normalize",
        json!({
            "credits": 4,
            "assessments": [
                { "kind": "ISA", "maxRaw": 50, "weightTo": 50, "scoreRaw": 45 },
                { "kind": "ESA", "maxRaw": 50, "weightTo": 50, "scoreRaw": 35 }
            ]
        }),
    );
    let score = normalized["finalScore100"].as_f64().expect("score");
    assert!((score - 80.0).abs() < 1e-9);
    assert_eq!(normalized["partial"], json!(false));

    let classified = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "grades.classify",
        json!({ "score": score }),
    );
    assert_eq!(
        classified,
        json!({ "letterGrade": "A", "gradePoint": 9, "roundedScore": 80 })
    );

    let no_lab = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "grades.normalize",
        json!({
            "credits": 5,
            "assessments": [{ "kind": "ESA", "maxRaw": 100, "weightTo": 100, "scoreRaw": 100 }],
            "lab": { "max": 20 }
        }),
    );
    assert_eq!(no_lab["finalScore100"], json!(80.0));
    assert_eq!(no_lab["conditions"], json!(["missingLabInput"]));

    let bad_tier = call(
        &mut stdin,
        &mut reader,
        "4",
        "grades.normalize",
        json!({ "credits": 3, "assessments": [] }),
    );
    assert_eq!(error_code(&bad_tier), Some("configuration_error"));
    assert_eq!(bad_tier["error"]["details"]["kind"], json!("unsupported_credits"));

    let missing = call(&mut stdin, &mut reader, "5", "grades.classify", json!({}));
    assert_eq!(error_code(&missing), Some("bad_params"));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn grades_evaluate_reports_missing_assessments() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let scheme = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "grades.scheme",
        json!({ "credits": 5 }),
    );
    assert_eq!(scheme["assessments"].as_array().map(|a| a.len()), Some(7));
    assert_eq!(scheme["lab"], json!({ "kind": "LAB", "max": 20.0 }));

    let partial = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "grades.evaluate",
        json!({ "credits": 2, "rawScores": { "ISA1": 30, "ISA2": 30 } }),
    );
    assert_eq!(partial["partial"], json!(true));
    assert_eq!(partial["missing"], json!(["ESA"]));
    assert_eq!(partial["letterGrade"], json!("D"));
    assert_eq!(partial["gradePoint"], json!(6));

    let full = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "grades.evaluate",
        json!({
            "credits": 5,
            "rawScores": {
                "ISA1": 40, "ISA2": 40, "ESA": 100,
                "A1": 10, "A2": 10, "A3": 10, "A4": 10
            },
            "labScore": 10
        }),
    );
    assert_eq!(full["partial"], json!(false));
    assert_eq!(full["credits"], json!(5));
    assert_eq!(full["letterGrade"], json!("S"));
    assert_eq!(full["labPercentage"], json!(50.0));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn gpa_methods_aggregate_and_validate() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let sgpa = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "gpa.semester",
        json!({ "courses": [
            { "credits": 4, "gradePoint": 9 },
            { "credits": 3, "gradePoint": 8 },
            { "credits": 2, "gradePoint": 10 }
        ]}),
    );
    assert_eq!(
        sgpa,
        json!({ "gpa": 8.89, "totalCredits": 9, "courseCount": 3 })
    );

    let cgpa = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "gpa.cumulative",
        json!({ "semesters": [
            { "label": "S1", "courses": [
                { "credits": 1, "gradePoint": 9 },
                { "credits": 2, "gradePoint": 8 }
            ]},
            { "label": "S2", "courses": [{ "credits": 5, "gradePoint": 8 }] }
        ]}),
    );
    assert_eq!(cgpa["gpa"], json!(8.13));
    assert_eq!(cgpa["totalCredits"], json!(8));
    assert_eq!(
        cgpa["semesters"],
        json!([
            { "label": "S1", "gpa": 8.33, "totalCredits": 3 },
            { "label": "S2", "gpa": 8.0, "totalCredits": 5 }
        ])
    );

    let bad_point = call(
        &mut stdin,
        &mut reader,
        "3",
        "gpa.semester",
        json!({ "courses": [
            { "credits": 4, "gradePoint": 9 },
            { "credits": 4, "gradePoint": 12 }
        ]}),
    );
    assert_eq!(error_code(&bad_point), Some("configuration_error"));
    assert_eq!(bad_point["error"]["details"]["index"], json!(1));

    let courses: Vec<serde_json::Value> = (0..7)
        .map(|_| json!({ "credits": 1, "gradePoint": 8 }))
        .collect();
    let too_many = call(
        &mut stdin,
        &mut reader,
        "4",
        "gpa.cumulative",
        json!({ "semesters": [{ "courses": courses }] }),
    );
    assert_eq!(error_code(&too_many), Some("bad_params"));

    drop(stdin);
    let _ = child.wait();
}
