//! Verify builders and the formatter against `test-vectors/round_trip.json`.
//!
//! Each case names a form action with its path and body, the request the
//! dispatcher must build, a simulated response, and the exact text the
//! formatter must produce for it.

use fileclient_core::{outcome, Dispatcher, HttpMethod, HttpRequest, HttpResponse, Outcome, ResponseBody};

const BASE_URL: &str = "http://localhost:8000";

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_headers(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn build(d: &Dispatcher, action: &str, path: &str, body: &str) -> HttpRequest {
    match action {
        "get" => d.build_get(path).unwrap(),
        "put" => d.build_put(path, body).unwrap(),
        "post" => d.build_post(body),
        "delete" => d.build_delete(path).unwrap(),
        other => panic!("unknown action: {other}"),
    }
}

#[test]
fn round_trip_test_vectors() {
    let raw = include_str!("../../test-vectors/round_trip.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let d = Dispatcher::new(BASE_URL);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let action = case["action"].as_str().unwrap();
        let path = case["path"].as_str().unwrap();
        let body = case["body"].as_str().unwrap();

        // Verify build
        let expected_req = &case["expected_request"];
        let req = build(&d, action, path, body);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.headers, parse_headers(&expected_req["headers"]), "{name}: headers");
        assert_eq!(req.body.as_deref(), expected_req["body"].as_str(), "{name}: body");

        // Verify rendering
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: parse_headers(&sim["headers"]),
            body: match sim["body"].as_str() {
                Some(text) => ResponseBody::Text(text.to_string()),
                None => ResponseBody::Unreadable {
                    reason: "simulated read failure".to_string(),
                },
            },
        };
        let expected = case["expected_rendering"].as_str().unwrap().to_string();
        let got = outcome(&response);
        match sim["body"].as_str() {
            Some(_) => assert_eq!(got, Outcome::WithBody(expected), "{name}: rendering"),
            None => assert_eq!(got, Outcome::WithoutBody(expected), "{name}: rendering"),
        }
    }
}

#[test]
fn empty_path_vectors_build_nothing() {
    let d = Dispatcher::new(BASE_URL);
    for action in ["get", "put", "delete"] {
        let result = match action {
            "get" => d.build_get(""),
            "put" => d.build_put("", "contenido"),
            _ => d.build_delete(""),
        };
        assert!(result.is_err(), "{action}: empty path must be rejected");
    }
}
