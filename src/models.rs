use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============ Submission Input ============

/// A single scalar value supplied for a submission field.
///
/// Values are passed through to the credit record as given: numbers keep
/// their scale, dates render as `YYYY-MM-DD`, text is emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text (names, document numbers, dates already formatted by the caller).
    Text(String),
    /// Monetary amount or count.
    Number(BigDecimal),
    /// Calendar date.
    Date(NaiveDate),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(BigDecimal::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(BigDecimal::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(BigDecimal::from(value))
    }
}

impl From<BigDecimal> for FieldValue {
    fn from(value: BigDecimal) -> Self {
        FieldValue::Number(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl TryFrom<&serde_json::Value> for FieldValue {
    type Error = String;

    /// Converts a JSON scalar. Numbers keep their literal text
    /// (`arbitrary_precision`), so `100.00` stays `100.00`.
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(s) => Ok(FieldValue::Text(s.clone())),
            serde_json::Value::Number(n) => BigDecimal::from_str(&n.to_string())
                .map(FieldValue::Number)
                .map_err(|e| format!("invalid number {}: {}", n, e)),
            serde_json::Value::Bool(b) => Ok(FieldValue::Text(b.to_string())),
            other => Err(format!("expected a scalar value, got {}", other)),
        }
    }
}

/// Caller-supplied field mapping for one submission.
///
/// Keys are unique by construction; ordering carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFields(BTreeMap<String, FieldValue>);

impl SubmissionFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a field, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a field set from a JSON object of scalars.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| "submission fields must be a JSON object".to_string())?;

        let mut fields = Self::new();
        for (key, raw) in object {
            // JSON null means "not supplied"
            if raw.is_null() {
                continue;
            }
            let value = FieldValue::try_from(raw).map_err(|e| format!("{}: {}", key, e))?;
            fields.insert(key.clone(), value);
        }
        Ok(fields)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for SubmissionFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

// ============ Connection Settings ============

/// Authentication data placed in the SOAP header of every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
    pub culture: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .field("culture", &self.culture)
            .finish()
    }
}

/// Target environment of the data pump service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Test,
    Production,
}

impl Environment {
    pub const TEST_URL: &'static str = "http://www-test2.1cb.kz:80/DataPumpService/DataPumpService";
    pub const PRODUCTION_URL: &'static str = "https://secure.1cb.kz/DataPump/DataPumpService.asmx";

    /// Interprets an `environment` setting. Only `production` selects the
    /// production endpoint; anything else, including an absent value, is test.
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            Some("production") => Environment::Production,
            _ => Environment::Test,
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Environment::Test => Self::TEST_URL,
            Environment::Production => Self::PRODUCTION_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Test => f.write_str("test"),
            Environment::Production => f.write_str("production"),
        }
    }
}

// ============ Schema Identifiers ============

/// Numeric classifier reference used in `id`/`typeId`/`roleId`-style attributes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassifierId(String);

impl ClassifierId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClassifierId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("'{}' is not a numeric identifier", s));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<&FieldValue> for ClassifierId {
    type Error = String;

    fn try_from(value: &FieldValue) -> Result<Self, Self::Error> {
        match value {
            FieldValue::Text(s) => s.parse(),
            FieldValue::Number(n) => {
                let whole = n.with_scale(0);
                if &whole != n {
                    return Err(format!("'{}' is not an integer identifier", n));
                }
                whole.to_string().parse()
            }
            FieldValue::Date(d) => Err(format!("date '{}' is not an identifier", d)),
        }
    }
}

impl fmt::Display for ClassifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed identification record kinds carried for an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentificationKind {
    /// Individual identification number.
    Iin,
    /// Identity document (passport, ID card).
    IdentityDocument,
}

impl IdentificationKind {
    pub fn type_id(&self) -> &'static str {
        match self {
            IdentificationKind::Iin => "14",
            IdentificationKind::IdentityDocument => "7",
        }
    }

    pub fn rank(&self) -> &'static str {
        "1"
    }
}

/// Fixed address record kinds carried for an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    Residential,
    Registration,
}

impl AddressKind {
    pub fn type_id(&self) -> &'static str {
        match self {
            AddressKind::Residential => "1",
            AddressKind::Registration => "6",
        }
    }
}

// ============ Submission Outcome ============

/// Fault detail extracted from a SOAP fault node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SoapFault {
    pub code: Option<String>,
    pub message: Option<String>,
}

/// Expected, caller-recoverable failure of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum Failure {
    /// Required keys absent from the field set, in schema order.
    MissingFields(Vec<String>),
    /// Keys whose values are not valid classifier identifiers.
    InvalidFields(Vec<String>),
    /// The service answered with a SOAP fault.
    RequestError(SoapFault),
    /// The service answered without fault but without a result.
    NoData,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::MissingFields(keys) => write!(f, "missing fields: {}", keys.join(", ")),
            Failure::InvalidFields(keys) => write!(f, "invalid fields: {}", keys.join(", ")),
            Failure::RequestError(fault) => write!(
                f,
                "request error: {} {}",
                fault.code.as_deref().unwrap_or("-"),
                fault.message.as_deref().unwrap_or("")
            ),
            Failure::NoData => f.write_str("no data"),
        }
    }
}

/// Tagged result of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success { payload: String },
    Failure { failure: Failure },
}

impl Outcome {
    pub fn success(payload: impl Into<String>) -> Self {
        Outcome::Success {
            payload: payload.into(),
        }
    }

    pub fn failure(failure: Failure) -> Self {
        Outcome::Failure { failure }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// The failure, if this outcome is one.
    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Failure { failure } => Some(failure),
            Outcome::Success { .. } => None,
        }
    }
}
