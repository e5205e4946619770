use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

fn default_version() -> String {
    "1.0".to_string()
}

/// Inbound request envelope, one per user turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    pub request: Request,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    LaunchRequest(LaunchRequest),
    IntentRequest(IntentRequest),
    SessionEndedRequest(SessionEndedRequest),
    /// Any request type this skill does not route (e.g. display or audio player events).
    #[serde(other)]
    Unknown,
}

impl Request {
    pub fn request_id(&self) -> Option<&str> {
        let id = match self {
            Request::LaunchRequest(r) => &r.request_id,
            Request::IntentRequest(r) => &r.request_id,
            Request::SessionEndedRequest(r) => &r.request_id,
            Request::Unknown => return None,
        };
        if id.is_empty() {
            None
        } else {
            Some(id.as_str())
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Absent when the intent has no dialog model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_state: Option<DialogState>,
    pub intent: Intent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Host-tracked progress of slot collection for the current intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogState {
    #[serde(rename = "STARTED")]
    NotStarted,
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfirmationStatus {
    #[default]
    #[serde(rename = "NONE")]
    Unconfirmed,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "DENIED")]
    Denied,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
    #[serde(default)]
    pub slots: SlotMap,
}

impl Intent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            confirmation_status: ConfirmationStatus::Unconfirmed,
            slots: SlotMap::new(),
        }
    }

    /// Lower-cased raw value of `slot_name`, if the user said anything for it.
    pub fn slot_value(&self, slot_name: &str) -> Option<String> {
        self.slots
            .get(slot_name)
            .and_then(|slot| slot.value.as_deref())
            .filter(|v| !v.is_empty())
            .map(str::to_lowercase)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolutions: Option<Resolutions>,
}

impl Slot {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            confirmation_status: ConfirmationStatus::Unconfirmed,
            resolutions: None,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    /// Only the first authority is consulted; custom slot types have exactly one.
    pub fn first_resolution(&self) -> Option<&AuthorityResolution> {
        self.resolutions
            .as_ref()
            .and_then(|r| r.resolutions_per_authority.first())
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmation_status == ConfirmationStatus::Confirmed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolutions {
    #[serde(default)]
    pub resolutions_per_authority: Vec<AuthorityResolution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityResolution {
    #[serde(default)]
    pub authority: String,
    pub status: ResolutionStatus,
    #[serde(default)]
    pub values: Vec<ResolvedValue>,
}

impl AuthorityResolution {
    pub fn code(&self) -> StatusCode {
        self.status.code
    }

    pub fn candidate_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.value.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionStatus {
    pub code: StatusCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    #[serde(rename = "ER_SUCCESS_MATCH")]
    Match,
    #[serde(rename = "ER_SUCCESS_NO_MATCH")]
    NoMatch,
    #[serde(rename = "ER_ERROR_TIMEOUT")]
    Timeout,
    #[serde(rename = "ER_ERROR_EXCEPTION")]
    Exception,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedValue {
    pub value: CanonicalValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Slots keyed by name, in the order the host declared them.
///
/// The order matters: only the first ambiguous slot is clarified per turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotMap {
    entries: Vec<(String, Slot)>,
}

impl SlotMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Slot> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Slot> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    /// Replaces an existing entry in place, otherwise appends.
    pub fn insert(&mut self, key: String, slot: Slot) {
        match self.get_mut(&key) {
            Some(existing) => *existing = slot,
            None => self.entries.push((key, slot)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn values(&self) -> impl Iterator<Item = &Slot> {
        self.entries.iter().map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Slot> for SlotMap {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut map = SlotMap::new();
        for slot in iter {
            map.insert(slot.name.clone(), slot);
        }
        map
    }
}

impl Serialize for SlotMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, slot) in &self.entries {
            map.serialize_entry(key, slot)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SlotMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SlotMapVisitor;

        impl<'de> Visitor<'de> for SlotMapVisitor {
            type Value = SlotMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of slot name to slot")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SlotMap, A::Error> {
                let mut map = SlotMap::new();
                while let Some((key, slot)) = access.next_entry::<String, Slot>()? {
                    map.insert(key, slot);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(SlotMapVisitor)
    }
}
