//! Dataset labels
//!
//! A label names one experimental condition. It is only ever used as a
//! grouping key and is never interpreted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque name of a dataset
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Label(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label(name.to_string())
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Label(name)
    }
}

/// Routing protocols compared by the fixed-flag tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Bgp,
    SsBgp,
    SsBgp2,
}

impl Protocol {
    pub const ALL: [Protocol; 3] = [Protocol::Bgp, Protocol::SsBgp, Protocol::SsBgp2];

    /// Name shown in charts and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Protocol::Bgp => "BGP",
            Protocol::SsBgp => "SSBGP",
            Protocol::SsBgp2 => "SS-BGP2",
        }
    }

    /// Command-line flag that selects the protocol's data directory
    pub fn flag(&self) -> &'static str {
        match self {
            Protocol::Bgp => "bgp",
            Protocol::SsBgp => "ssbgp",
            Protocol::SsBgp2 => "ssbgp2",
        }
    }
}

impl From<Protocol> for Label {
    fn from(protocol: Protocol) -> Self {
        Label::from(protocol.display_name())
    }
}

/// Values grouped by label
///
/// Labels keep the order in which they were first seen and values keep the
/// order in which they were pushed. Lookups are linear: a run only ever
/// deals with a handful of labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ByLabel<T> {
    groups: Vec<(Label, Vec<T>)>,
}

impl<T> Default for ByLabel<T> {
    fn default() -> Self {
        ByLabel { groups: Vec::new() }
    }
}

impl<T> ByLabel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the group of `label`, creating the group if needed
    pub fn push(&mut self, label: &Label, value: T) {
        match self.groups.iter_mut().find(|(l, _)| l == label) {
            Some((_, values)) => values.push(value),
            None => self.groups.push((label.clone(), vec![value])),
        }
    }

    /// Values of `label`; empty when the label is unknown
    pub fn get(&self, label: &Label) -> &[T] {
        self.groups
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    pub fn labels(&self) -> Vec<&Label> {
        self.groups.iter().map(|(label, _)| label).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Label, &[T])> {
        self.groups
            .iter()
            .map(|(label, values)| (label, values.as_slice()))
    }

    /// Every value paired with its label, group by group
    pub fn iter_flat(&self) -> impl Iterator<Item = (&Label, &T)> {
        self.groups
            .iter()
            .flat_map(|(label, values)| values.iter().map(move |value| (label, value)))
    }

    pub fn label_count(&self) -> usize {
        self.groups.len()
    }

    pub fn value_count(&self) -> usize {
        self.groups.iter().map(|(_, values)| values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<T> IntoIterator for ByLabel<T> {
    type Item = (Label, Vec<T>);
    type IntoIter = std::vec::IntoIter<(Label, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_label_keeps_first_seen_order() {
        let mut grouped = ByLabel::new();
        grouped.push(&Label::from("B"), 1);
        grouped.push(&Label::from("A"), 2);
        grouped.push(&Label::from("B"), 3);

        let labels: Vec<&str> = grouped.labels().iter().map(|l| l.as_str()).collect();
        assert_eq!(labels, vec!["B", "A"]);
        assert_eq!(grouped.get(&Label::from("B")), &[1, 3]);
        assert_eq!(grouped.get(&Label::from("A")), &[2]);
        assert_eq!(grouped.label_count(), 2);
        assert_eq!(grouped.value_count(), 3);
    }

    #[test]
    fn test_by_label_unknown_label_is_empty() {
        let grouped: ByLabel<u64> = ByLabel::new();
        assert!(grouped.get(&Label::from("missing")).is_empty());
        assert!(grouped.is_empty());
    }

    #[test]
    fn test_iter_flat_pairs_values_with_labels() {
        let mut grouped = ByLabel::new();
        grouped.push(&Label::from("A"), "a1");
        grouped.push(&Label::from("B"), "b1");
        grouped.push(&Label::from("A"), "a2");

        let pairs: Vec<(String, &str)> = grouped
            .iter_flat()
            .map(|(label, value)| (label.to_string(), *value))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), "a1"),
                ("A".to_string(), "a2"),
                ("B".to_string(), "b1"),
            ]
        );
    }

    #[test]
    fn test_protocol_labels() {
        assert_eq!(Label::from(Protocol::Bgp).as_str(), "BGP");
        assert_eq!(Label::from(Protocol::SsBgp).as_str(), "SSBGP");
        assert_eq!(Label::from(Protocol::SsBgp2).as_str(), "SS-BGP2");
        assert_eq!(Protocol::SsBgp2.flag(), "ssbgp2");
    }
}
