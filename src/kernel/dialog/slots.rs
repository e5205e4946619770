use std::collections::BTreeMap;

use serde::Serialize;

use crate::skill::event::{SlotMap, StatusCode};

/// What the user said for one slot and what it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotValue {
    pub synonym: Option<String>,
    pub resolved: Option<String>,
    /// True only when the first authority reported an exact match.
    pub is_validated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotValues(BTreeMap<String, SlotValue>);

impl SlotValues {
    pub fn get(&self, slot_name: &str) -> Option<&SlotValue> {
        self.0.get(slot_name)
    }

    pub fn resolved(&self, slot_name: &str) -> Option<&str> {
        self.0.get(slot_name).and_then(|v| v.resolved.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SlotValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn unvalidated(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, v)| !v.is_validated)
            .map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Flattens filled slots into name -> {synonym, resolved, is_validated}.
///
/// Keyed by each slot's own `name`. Anything other than an exact match with at
/// least one candidate falls back to the raw synonym, unvalidated.
pub fn slot_values(slots: &SlotMap) -> SlotValues {
    let mut values = BTreeMap::new();

    for slot in slots.values() {
        let exact = slot
            .first_resolution()
            .filter(|r| r.code() == StatusCode::Match)
            .and_then(|r| r.values.first())
            .map(|v| v.value.name.clone());

        let value = match exact {
            Some(resolved) => SlotValue {
                synonym: slot.value.clone(),
                resolved: Some(resolved),
                is_validated: true,
            },
            None => SlotValue {
                synonym: slot.value.clone(),
                resolved: slot.value.clone(),
                is_validated: false,
            },
        };
        values.insert(slot.name.clone(), value);
    }

    SlotValues(values)
}
