//! Metric identity and the deterministic external naming rule.
//!
//! A metric is identified by `(name, group, tags)`. Its external gauge name is
//! `prefix.<tag values ordered by tag key>.group.name`. Tag keys only decide
//! the order; they never appear in the output.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Deserialize;

use crate::error::{GaugeRelayError, Result};

/// Identity of one monitored quantity, as published by the upstream registry.
///
/// `description` is informational and excluded from equality and hashing.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawMetricName")]
pub struct MetricName {
    name: String,
    group: String,
    description: String,
    tags: BTreeMap<String, String>,
}

impl MetricName {
    /// Build an identity. An empty `name` or `group` counts as absent and is
    /// rejected; any other string, whitespace included, is accepted.
    pub fn new<I, K, V>(name: impl Into<String>, group: impl Into<String>, tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let group = group.into();
        require_present("name", &name)?;
        require_present("group", &group)?;

        Ok(Self {
            name,
            group,
            description: String::new(),
            tags: tags.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        })
    }

    /// Identity without tags.
    pub fn untagged(name: impl Into<String>, group: impl Into<String>) -> Result<Self> {
        Self::new(name, group, std::iter::empty::<(String, String)>())
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }
}

impl PartialEq for MetricName {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.group == other.group && self.tags == other.tags
    }
}

impl Eq for MetricName {}

impl Hash for MetricName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.group.hash(state);
        self.tags.hash(state);
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.name)?;
        if !self.tags.is_empty() {
            let tags = self
                .tags
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(",");
            write!(f, "{{{tags}}}")?;
        }
        Ok(())
    }
}

/// Wire shape before validation: every identity field may be missing.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMetricName {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Option<HashMap<String, String>>,
}

impl TryFrom<RawMetricName> for MetricName {
    type Error = GaugeRelayError;

    fn try_from(raw: RawMetricName) -> Result<Self> {
        let name = raw.name.ok_or_else(|| absent("name"))?;
        let group = raw.group.ok_or_else(|| absent("group"))?;
        let tags = raw.tags.ok_or_else(|| absent("tags"))?;
        let metric = MetricName::new(name, group, tags)?;
        Ok(match raw.description {
            Some(d) => metric.with_description(d),
            None => metric,
        })
    }
}

/// Compute the external gauge name for `metric`.
///
/// An empty `prefix` contributes no segment, so the result has no leading dot
/// (`group.name`, not `.group.name`).
pub fn compute_name(prefix: &str, metric: &MetricName) -> Result<String> {
    require_present("name", &metric.name)?;
    require_present("group", &metric.group)?;

    let mut segments: Vec<&str> = Vec::with_capacity(metric.tags.len() + 3);
    if !prefix.is_empty() {
        segments.push(prefix);
    }
    // BTreeMap iterates in ascending key order.
    segments.extend(metric.tags.values().map(String::as_str));
    segments.push(&metric.group);
    segments.push(&metric.name);

    Ok(segments.join("."))
}

fn require_present(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(absent(field));
    }
    Ok(())
}

fn absent(field: &str) -> GaugeRelayError {
    GaugeRelayError::InvalidArgument(format!("metric {field} must be present"))
}
