//! NamedMetric: handle identity and the once-computed gauge name.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use gaugerelay_core::naming::MetricName;
use gaugerelay_reporter::{Metric, NamedMetric};

mod support;
use support::{handle, TestMetric};

const PREFIX: &str = "first_dummy_value";
const GROUP: &str = "second_dummy_value";
const NAME: &str = "third_dummy_value";

fn metric(identity: MetricName) -> Arc<dyn Metric> {
    handle(&TestMetric::new(identity, 0.25))
}

#[test]
fn value_is_the_handle_passed_in() {
    let m = metric(MetricName::untagged(NAME, GROUP).unwrap());
    let named = NamedMetric::new(m.clone(), "test").unwrap();
    assert!(Arc::ptr_eq(named.value(), &m));
}

#[test]
fn name_is_computed_once() {
    let named = NamedMetric::new(metric(MetricName::untagged(NAME, GROUP).unwrap()), PREFIX).unwrap();
    let first = named.metric_name();
    let second = named.metric_name();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn name_without_tags() {
    let named = NamedMetric::new(metric(MetricName::untagged(NAME, GROUP).unwrap()), PREFIX).unwrap();
    assert_eq!(named.metric_name(), format!("{PREFIX}.{GROUP}.{NAME}"));
}

#[test]
fn name_with_tags_ordered_by_key() {
    let identity = MetricName::new(
        NAME,
        GROUP,
        [("some_dummy_key", "some_dummy_val"), ("another_dummy_key", "another_dummy_val")],
    )
    .unwrap();
    let named = NamedMetric::new(metric(identity), PREFIX).unwrap();
    assert_eq!(
        named.metric_name(),
        format!("{PREFIX}.another_dummy_val.some_dummy_val.{GROUP}.{NAME}")
    );
}
