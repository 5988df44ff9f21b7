use ludus::json::to_json;
use ludus::{Error, Record, RuntimeError};
use pretty_assertions::assert_eq;
use serde_json::json;

fn run_json(source: &str) -> serde_json::Value {
    let records = ludus::run(source).expect("script failed");
    serde_json::to_value(&records).expect("records serialize")
}

fn run_err(source: &str) -> Error {
    match ludus::run(source) {
        Ok(records) => panic!("expected an error, got {:?}", records),
        Err(err) => err,
    }
}

fn runtime_kind(err: &Error) -> RuntimeError {
    match err {
        Error::Runtime { source } => source.kind().clone(),
        other => panic!("expected a runtime error, got {}", other),
    }
}

#[test]
fn test_single_object() {
    assert_eq!(
        run_json("obj(\"Player\", 1) { num(score) { 10 } }"),
        json!([{"class": "Player", "id": 1, "score": 10}])
    );
}

#[test]
fn test_field_order_is_declaration_order() {
    let records: Vec<Record> = ludus::run(
        "obj(\"Hero\", \"h1\") { str(name) { \"Ann\" } num(zeal) { 3 } bool(alive) { true } num(armor) { 0.5 } }",
    )
    .unwrap();

    assert_eq!(
        to_json(&records, false).unwrap(),
        r#"[{"class":"Hero","id":"h1","name":"Ann","zeal":3,"alive":true,"armor":0.5}]"#
    );
}

#[test]
fn test_generated_roster() {
    let source = r#"
        // three enemies; the loop only reaches the id
        num(base) { 10 }
        for (i, 3) {
            obj("Enemy", "e" + i) {
                str(kind) { grunt }
                num(hp) { 25 }
                num(armor) { hp / 10 }
                bool(boss) { i == 3 }
            }
        }
        obj("Summary", base) {
            num(count) { 3 }
        }
    "#;

    assert_eq!(
        run_json(source),
        json!([
            {"class": "Enemy", "id": "e1", "kind": "grunt", "hp": 25, "armor": 2, "boss": false},
            {"class": "Enemy", "id": "e2", "kind": "grunt", "hp": 25, "armor": 2, "boss": false},
            {"class": "Enemy", "id": "e3", "kind": "grunt", "hp": 25, "armor": 2, "boss": false},
            {"class": "Summary", "id": 10, "count": 3}
        ])
    );
}

#[test]
fn test_assignment_shadows_outer_binding() {
    assert_eq!(
        run_json("x = 0\nfor (i, 3) { x = x + i }\nobj(\"X\", x) {}"),
        json!([{"class": "X", "id": 0}])
    );
}

#[test]
fn test_large_integers_serialize_as_floats() {
    let records = ludus::run(
        "obj(\"Big\", 1) { num(n) { 10000000000 * 10000000000 } str(s) { 10000000000 * 10000000000 } }",
    )
    .unwrap();

    assert_eq!(
        serde_json::to_value(&records).unwrap(),
        json!([{"class": "Big", "id": 1, "n": 1e20, "s": "100000000000000000000"}])
    );
}

#[test]
fn test_loop_sequences() {
    let ids = |source: &str| -> Vec<serde_json::Value> {
        match run_json(source) {
            serde_json::Value::Array(records) => records.into_iter().map(|r| r["id"].clone()).collect(),
            other => panic!("expected an array, got {}", other),
        }
    };

    assert_eq!(ids("for (i, 3) { obj(\"N\", i) {} }"), vec![json!(1), json!(2), json!(3)]);
    assert_eq!(
        ids("for (i, 5, 1) { obj(\"N\", i) {} }"),
        vec![json!(5), json!(4), json!(3), json!(2), json!(1)]
    );
    assert_eq!(
        ids("for (i, 0, 10, 3) { obj(\"N\", i) {} }"),
        vec![json!(0), json!(3), json!(6), json!(9)]
    );
}

#[test]
fn test_break_and_continue() {
    let source = "
        for (i, 10) {
            if (i % 2 == 0) { continue }
            if (i > 6) { break }
            obj(\"Odd\", i) {}
        }
    ";

    assert_eq!(
        run_json(source),
        json!([
            {"class": "Odd", "id": 1},
            {"class": "Odd", "id": 3},
            {"class": "Odd", "id": 5}
        ])
    );
}

#[test]
fn test_expression_semantics() {
    let source = "
        obj(\"Math\", 0) {
            num(div) { 10 / 3 }
            num(fdiv) { 10 / 4.0 }
            num(rem) { 10 % 3 }
            str(cat) { \"a\" + 1 }
            num(neg) { -\"4\" }
            bool(cmp) { \"10\" > 9 }
            str(bare) { unknown }
            num(conv) { toInt(\"7.9\") + toNum(\"0.5\") }
            str(method) { 42.toStr() + \"!\" }
        }
    ";

    assert_eq!(
        run_json(source),
        json!([{
            "class": "Math",
            "id": 0,
            "div": 3,
            "fdiv": 2.5,
            "rem": 1,
            "cat": "a1",
            "neg": -4,
            "cmp": true,
            "bare": "unknown",
            "conv": 7.5,
            "method": "42!"
        }])
    );
}

#[test]
fn test_declaration_block_result() {
    let source = "
        obj(\"Stats\", 1) {
            num(power) {
                num(strength) { 4 }
                num(bonus) { 2 }
                num(total) { strength * 10 + bonus }
            }
            str(rank) {
                if (power > 40) { str(r) { \"gold\" } } else { str(r) { \"silver\" } }
            }
        }
    ";

    assert_eq!(
        run_json(source),
        json!([{"class": "Stats", "id": 1, "power": 42, "rank": "gold"}])
    );
}

#[test]
fn test_runtime_errors() {
    let cases = vec![
        ("num(x) { 1 / 0 }", RuntimeError::DivisionByZero),
        ("num(x) { 7 % 0 }", RuntimeError::ModuloByZero),
        (
            "num(x) { y + 1 }",
            RuntimeError::UndefinedVariable {
                name: "y".to_owned(),
            },
        ),
        (
            "obj(\"A\", 1) { obj(\"B\", 2) {} }",
            RuntimeError::NestedObject {
                class: "B".to_owned(),
            },
        ),
    ];

    for (source, expected) in cases.into_iter() {
        assert_eq!(runtime_kind(&run_err(source)), expected, "{}", source);
    }
}

#[test]
fn test_error_messages_carry_lines() {
    assert_eq!(
        run_err("obj(\"A\", 1) {}\n\nnum(x) { 1 / 0 }").to_string(),
        "Runtime error (line 3): division by zero"
    );
    assert_eq!(
        run_err("num(x) {\n  1 +\n}").to_string(),
        "Parse error (line 3): expected an expression, found '}'"
    );
}

#[test]
fn test_failed_run_has_no_output() {
    let err = run_err("obj(\"A\", 1) {}\nobj(\"B\", 2) { num(x) { 4 } }\nnum(z) { 1 / 0 }");
    assert_eq!(runtime_kind(&err), RuntimeError::DivisionByZero);
}

#[test]
fn test_pretty_output() {
    let records = ludus::run("obj(\"P\", 1) { num(hp) { 5 } }").unwrap();

    assert_eq!(
        to_json(&records, true).unwrap(),
        "[\n  {\n    \"class\": \"P\",\n    \"id\": 1,\n    \"hp\": 5\n  }\n]"
    );
}
