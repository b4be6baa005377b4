use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_pslit::{
    from_str, parse_value, pslit, serialize, serialize_with_options, to_script_block, to_string,
    to_string_with_options, to_value, Error, PsMap, PsOptions, PsValue, ScriptBlock,
};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u64,
    customer: User,
    items: Vec<Product>,
    note: Option<String>,
    placed: DateTime<Utc>,
}

fn alice() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    }
}

#[test]
fn test_simple_struct() {
    let text = to_string(&alice()).unwrap();
    println!("User literal:\n{}", text);

    assert_eq!(
        text,
        "@{\n        'id'='123'\n        'name'='Alice'\n        'active'=$true\n        'tags'=@('admin', 'developer')\n    }"
    );
    let back: User = from_str(&text).unwrap();
    assert_eq!(back, alice());
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: alice(),
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        note: None,
        placed: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
    };

    let text = to_string(&order).unwrap();
    println!("Order literal:\n{}", text);

    assert!(text.contains("\n        'customer'=@{\n            'id'='123'\n"));
    assert!(text.contains("\n        'note'=$null\n"));

    let back: Order = from_str(&text).unwrap();
    assert_eq!(back, order);
}

#[test]
fn test_entry_order_is_insertion_order() {
    let mut map = PsMap::new();
    for key in ["zeta", "alpha", "mid"] {
        map.insert(key.to_string(), PsValue::from(key));
    }
    let text = serialize_with_options(&PsValue::Hashtable(map), false, PsOptions::new().with_depth(0));
    assert_eq!(
        text.as_str(),
        "@{\n    'zeta'='zeta'\n    'alpha'='alpha'\n    'mid'='mid'\n}"
    );
}

#[test]
fn test_round_trip_strings_booleans_nesting() {
    let value = pslit!({
        "Name": "web01",
        "Enabled": true,
        "Disabled": false,
        "Empty": "",
        "Settings": {
            "Path": "C:\\Temp\\logs",
            "Inner": { "Deep": "yes" }
        }
    });

    let text = serialize(&value, false);
    assert_eq!(parse_value(text.as_str()).unwrap(), value);
}

#[test]
fn test_empty_hashtable() {
    assert_eq!(serialize(&pslit!({}), false).as_str(), "@{\n    }");
    assert_eq!(parse_value("@{\n    }").unwrap(), pslit!({}));
}

#[test]
fn test_quote_escaping_round_trip() {
    let tricky = "it's \u{2018}curly\u{2019} and ''double''";
    let value = pslit!({ "O'Neil": tricky });

    let text = serialize(&value, false);
    assert!(text.as_str().contains(
        "'O''Neil'='it''s \u{2018}\u{2018}curly\u{2019}\u{2019} and ''''double'''''"
    ));
    assert_eq!(parse_value(text.as_str()).unwrap(), value);
}

#[test]
fn test_boolean_rendering() {
    let text = serialize(&pslit!({ "a": true, "b": false }), false);
    assert!(text.as_str().contains("'a'=$true"));
    assert!(text.as_str().contains("'b'=$false"));
    assert!(!text.as_str().contains("'$true'"));
}

#[test]
fn test_non_mapping_input() {
    for value in [
        pslit!(null),
        pslit!("plain"),
        pslit!(42),
        pslit!(["a", "b"]),
        PsValue::ScriptBlock(ScriptBlock::new("$x")),
    ] {
        assert!(serialize(&value, false).is_empty());
        assert!(serialize(&value, true).is_empty());
    }

    assert_eq!(to_string(&vec!["a", "b"]).unwrap(), "");
    assert_eq!(to_string(&Some(3)).unwrap(), "");
}

#[test]
fn test_sibling_calls_have_identical_indentation() {
    let child = pslit!({ "k": "v" });
    let parent = pslit!({ "child": { "k": "v" } });

    let before = serialize(&child, false);
    let _ = serialize(&parent, false);
    let after = serialize(&child, false);

    assert_eq!(before, after);
    assert_eq!(before.as_str(), "@{\n        'k'='v'\n    }");
}

#[test]
fn test_script_block_values_and_wrapping() {
    let mut map = PsMap::new();
    map.insert(
        "Filter".to_string(),
        PsValue::from(ScriptBlock::new(" $_.Status -eq 'Running' ")),
    );
    let value = PsValue::Hashtable(map);

    let text = serialize(&value, false);
    assert!(text
        .as_str()
        .contains("'Filter'={ $_.Status -eq 'Running' }"));
    assert_eq!(parse_value(text.as_str()).unwrap(), value);

    let block = to_script_block(&value).unwrap();
    assert_eq!(block.as_str(), text.as_str());
}

#[test]
fn test_script_block_field_in_struct() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Task {
        name: String,
        action: ScriptBlock,
    }

    let task = Task {
        name: "cleanup".to_string(),
        action: ScriptBlock::new(" Remove-Item $env:TEMP\\* -Recurse "),
    };

    let text = to_string(&task).unwrap();
    assert!(text.contains("'action'={ Remove-Item $env:TEMP\\* -Recurse }"));

    let back: Task = from_str(&text).unwrap();
    assert_eq!(back, task);
}

#[test]
fn test_other_kinds_are_quoted_text() {
    let big: num_bigint::BigInt = "123456789012345678901234567890".parse().unwrap();
    let when = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();

    let mut map = PsMap::new();
    map.insert("count".to_string(), PsValue::from(42));
    map.insert("ratio".to_string(), PsValue::from(0.25));
    map.insert("big".to_string(), PsValue::from(big));
    map.insert("when".to_string(), PsValue::from(when));

    let text = serialize_with_options(&PsValue::Hashtable(map), false, PsOptions::new().with_depth(0));
    assert_eq!(
        text.as_str(),
        "@{\n    'count'='42'\n    'ratio'='0.25'\n    'big'='123456789012345678901234567890'\n    'when'='2024-01-15T10:30:00+00:00'\n}"
    );
}

#[test]
fn test_enums_round_trip() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Startup {
        Manual,
        Delayed(u32),
        Scheduled { hour: u8, minute: u8 },
        Window(u8, u8),
    }

    for startup in [
        Startup::Manual,
        Startup::Delayed(30),
        Startup::Scheduled { hour: 4, minute: 15 },
        Startup::Window(1, 5),
    ] {
        let mut wrapper = BTreeMap::new();
        wrapper.insert("startup", startup);
        let text = to_string(&wrapper).unwrap();
        let back: BTreeMap<String, Startup> = from_str(&text).unwrap();
        assert_eq!(back.get("startup"), wrapper.get("startup"));
    }
}

#[test]
fn test_map_keys() {
    let mut numeric: HashMap<u32, String> = HashMap::new();
    numeric.insert(7, "seven".to_string());
    assert_eq!(
        to_value(&numeric).unwrap(),
        pslit!({ "7": "seven" })
    );

    let mut invalid = BTreeMap::new();
    invalid.insert((1, 2), "pair");
    assert!(to_string(&invalid).is_err());
}

#[test]
fn test_values_from_serde_json() {
    let json = serde_json::json!({
        "enabled": true,
        "name": "svc",
        "ports": [80, 443],
        "limits": { "cpu": "2" }
    });

    let value = to_value(&json).unwrap();
    let text = to_string_with_options(&json, PsOptions::new().with_depth(0)).unwrap();

    assert!(value.is_hashtable());
    assert!(text.contains("'ports'=@('80', '443')"));
    assert!(text.contains("'limits'=@{\n        'cpu'='2'\n    }"));
}

#[test]
fn test_hand_written_literal() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Manifest {
        #[serde(rename = "ModuleVersion")]
        version: String,
        #[serde(rename = "FunctionsToExport")]
        functions: Vec<String>,
        #[serde(rename = "PrivateData")]
        private: HashMap<String, String>,
    }

    let text = r#"
# Module manifest
@{
    ModuleVersion = '1.0.0'
    FunctionsToExport = @(
        'Get-Thing'
        'Set-Thing'
    )
    PrivateData = @{ Owner = "Ops`tTeam"; Tier = "gold" }
}
"#;

    let manifest: Manifest = from_str(text).unwrap();
    assert_eq!(manifest.version, "1.0.0");
    assert_eq!(manifest.functions, vec!["Get-Thing", "Set-Thing"]);
    assert_eq!(manifest.private.get("Owner").map(String::as_str), Some("Ops\tTeam"));
}

#[test]
fn test_error_messages_carry_position() {
    let err = from_str::<User>("@{\n    'id'='1'\n    'name'=Alice\n}").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("line 3"), "{message}");

    let err = parse_value("@{ 'name' = 'unterminated }").unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof { .. }));
}

#[test]
fn test_type_mismatch() {
    let err = from_str::<User>("@{ 'id'=$true; 'name'='x'; 'active'=$true; 'tags'=@() }")
        .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

/// Collects formatted tracing output in memory.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        let bytes = self.0.lock().map(|buf| buf.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if let Ok(mut buf) = self.0.lock() {
            buf.extend_from_slice(data);
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_trace_events_are_emitted() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("serde_pslit=trace"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        assert!(!serialize(&pslit!({ "a": { "b": true } }), false).is_empty());
        assert!(serialize(&pslit!("skip me"), false).is_empty());
        assert!(parse_value("@{ broken").is_err());
    });

    let output = log.contents();
    assert!(output.contains("writing entry"), "{output}");
    assert!(
        output.contains("top-level value is not a hashtable, skipped"),
        "{output}"
    );
    assert!(output.contains("literal parse failed"), "{output}");
}
