//! Verify URL resolution and header merging against JSON test vectors stored
//! in `test-vectors/`.
//!
//! Vectors drive the public API only (`build_url`, `ApiClient::build_request`)
//! so they double as documentation of the URL shape contract.

use api_routing::{build_url, ApiClient, RequestOptions, RuntimeConfig, UreqTransport};

fn config_from(value: &serde_json::Value) -> RuntimeConfig {
    RuntimeConfig {
        gateway_enabled: value["gateway_enabled"].as_bool().unwrap(),
        gateway_base_url: value["gateway_base_url"].as_str().map(str::to_string),
        ..RuntimeConfig::default()
    }
}

fn pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// URL
// ---------------------------------------------------------------------------

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/url.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let config = config_from(&case["config"]);
        let path = case["path"].as_str().unwrap();
        let expected = case["expected_url"].as_str().unwrap();

        assert_eq!(build_url(&config, path), expected, "{name}: build_url");

        let client = ApiClient::with_transport(config, UreqTransport::default());
        let req = client.build_request(path, RequestOptions::new());
        assert_eq!(req.url, expected, "{name}: build_request");
    }
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

#[test]
fn header_test_vectors() {
    let raw = include_str!("../../test-vectors/headers.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = ApiClient::new(RuntimeConfig::default());
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let options = pairs(&case["caller"])
            .into_iter()
            .fold(RequestOptions::new(), |opts, (k, v)| opts.header(k, v));

        let req = client.build_request("/echo", options);
        assert_eq!(req.headers, pairs(&case["expected"]), "{name}: headers");
    }
}
