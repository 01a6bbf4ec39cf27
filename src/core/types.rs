use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use strum::{EnumString, IntoStaticStr};

/// Transformation verb carried by an action payload
///
/// Unknown verbs are kept verbatim in `Other` so payloads pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    Add,
    Average,
    CleanColumnName,
    Count,
    CountDistinct,
    Diff,
    DropDuplicate,
    ExpandColumn,
    Explode,
    Filter,
    First,
    Group,
    Impute,
    Join,
    Last,
    Limit,
    Max,
    Median,
    Min,
    Remove,
    Reformat,
    Scale,
    Select,
    ShiftDown,
    ShiftUp,
    Sort,
    Sum,
    Union,
    UpdateValue,
    #[strum(disabled)]
    Other(String),
}

impl ActionType {
    pub fn as_str(&self) -> &str {
        match self {
            ActionType::Other(raw) => raw.as_str(),
            known => known.into(),
        }
    }
}

impl From<String> for ActionType {
    fn from(value: String) -> Self {
        ActionType::from_str(&value).unwrap_or(ActionType::Other(value))
    }
}

impl From<ActionType> for String {
    fn from(value: ActionType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an action works across rows or columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

/// A scalar value stored in the payload options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered `key -> scalar` options of a payload
///
/// Insertion order is the display order and survives a JSON round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadOptions(Vec<(String, OptionValue)>);

impl PayloadOptions {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Insert or replace a value; a replaced key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for PayloadOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = PayloadOptions::new();
        for (k, v) in iter {
            options.insert(k, v);
        }
        options
    }
}

impl Serialize for PayloadOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct PayloadOptionsVisitor;

impl<'de> Visitor<'de> for PayloadOptionsVisitor {
    type Value = PayloadOptions;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of option names to scalar values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut options = PayloadOptions::new();
        while let Some((key, value)) = access.next_entry::<String, OptionValue>()? {
            options.insert(key, value);
        }
        Ok(options)
    }
}

impl<'de> Deserialize<'de> for PayloadOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PayloadOptionsVisitor)
    }
}

/// What a suggested action does and which columns it touches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPayload {
    pub action_type: ActionType,
    pub axis: Axis,
    #[serde(rename = "action_arguments", alias = "arguments", default)]
    pub arguments: Vec<String>,
    #[serde(
        rename = "action_code",
        alias = "code",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<String>,
    #[serde(
        rename = "action_options",
        alias = "options",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub options: Option<PayloadOptions>,
    /// Keys this crate does not model (`action_variables`, `outputs`, ...), kept in order
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActionPayload {
    pub fn new(action_type: ActionType, axis: Axis) -> Self {
        Self {
            action_type,
            axis,
            arguments: Vec::new(),
            code: None,
            options: None,
            extra: Map::new(),
        }
    }

    pub fn with_arguments<S: Into<String>>(
        mut self,
        arguments: impl IntoIterator<Item = S>,
    ) -> Self {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_options(mut self, options: PayloadOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Code text, treating an empty script as absent
    pub fn code_text(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }

    /// Options, treating an empty map as absent
    pub fn non_empty_options(&self) -> Option<&PayloadOptions> {
        self.options.as_ref().filter(|o| !o.is_empty())
    }

    /// Shallow merge: every key present in `patch` replaces ours, `null` included
    pub fn merged(&self, patch: &PayloadPatch) -> ActionPayload {
        let mut extra = self.extra.clone();
        for (key, value) in &patch.extra {
            extra.insert(key.clone(), value.clone());
        }
        ActionPayload {
            action_type: patch
                .action_type
                .clone()
                .unwrap_or_else(|| self.action_type.clone()),
            axis: patch.axis.unwrap_or(self.axis),
            arguments: patch
                .arguments
                .clone()
                .unwrap_or_else(|| self.arguments.clone()),
            code: match &patch.code {
                Some(code) => code.clone(),
                None => self.code.clone(),
            },
            options: match &patch.options {
                Some(options) => options.clone(),
                None => self.options.clone(),
            },
            extra,
        }
    }
}

/// Tells a key set to `null` (`Some(None)`) apart from a missing key (`None`)
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial payload handed to save
///
/// Absent keys keep the draft's value. `code` and `options` distinguish an absent key
/// from an explicit `null`, which clears the draft's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ActionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    #[serde(
        rename = "action_arguments",
        alias = "arguments",
        skip_serializing_if = "Option::is_none"
    )]
    pub arguments: Option<Vec<String>>,
    #[serde(
        rename = "action_code",
        alias = "code",
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<Option<String>>,
    #[serde(
        rename = "action_options",
        alias = "options",
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub options: Option<Option<PayloadOptions>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PayloadPatch {
    pub fn is_empty(&self) -> bool {
        self == &PayloadPatch::default()
    }
}

/// A suggested transformation as supplied by the parent list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerAction {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub payload: Arc<ActionPayload>,
}

impl TransformerAction {
    pub fn new(title: impl Into<String>, payload: ActionPayload) -> Self {
        Self {
            title: title.into(),
            message: None,
            payload: Arc::new(payload),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Message text, treating an empty message as absent
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// Body delivered to the save capability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveActionRequest {
    pub action_payload: ActionPayload,
}

/// A dataset column the actions can refer to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

impl Feature {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            column_type: None,
        }
    }
}

/// Ordered features; position is the stable navigation index
pub type FeatureSet = Vec<Feature>;
