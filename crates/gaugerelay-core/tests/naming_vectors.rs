//! Naming vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use gaugerelay_core::naming::{compute_name, MetricName};


#[test]
fn naming_vectors() {
    for v in vector_loader::load("naming.json") {
        let res = serde_json::from_value::<MetricName>(v.metric.clone())
            .map_err(|e| e.to_string())
            .and_then(|m| compute_name(&v.prefix, &m).map_err(|e| e.to_string()));

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            let display = match err.code.as_str() {
                "INVALID_ARGUMENT" => "invalid argument: ",
                other => panic!("unexpected code in vector: {other}"),
            };
            let expected = format!("{display}metric {} must be present", err.field);
            assert!(e.starts_with(&expected), "vector={} err={e}", v.description);
            continue;
        }

        let expect = v.expect.expect("missing expect");
        assert_eq!(res.unwrap(), expect, "vector={}", v.description);
    }
}
