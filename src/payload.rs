//! Response envelopes of the portal backend.
//!
//! Every endpoint answers `{ success, message?, data }`. List fields that come back as anything
//! other than an array read as empty rather than failing the whole response.

use crate::attendance::RawAttendance;
use crate::batch::raw::Batch;
use crate::subject::raw::Subject;
use crate::payment::raw::Payment;
use anyhow::{Result, bail};
use log::warn;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// The `data` shape of one endpoint.
pub trait Payload: DeserializeOwned + Default {
    /// Shown when the backend reports failure without a message
    const FAILURE: &'static str;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Payload"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: Payload> Envelope<T> {
    pub fn new(data: T) -> Self {
        Envelope {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// The payload of a successful response, or the backend's message as the error.
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| T::FAILURE.to_string());
            warn!("Backend reported failure: {}", message);
            bail!(message);
        }
        Ok(self.data.unwrap_or_default())
    }
}

/// Reads every envelope in a document, several may be concatenated.
pub fn parse_envelopes<T: Payload>(doc: &str) -> Result<Vec<Envelope<T>>> {
    let envelopes = serde_json::Deserializer::from_str(doc)
        .into_iter::<Envelope<T>>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(envelopes)
}

/// Deserializes a list, treating a non-list value as empty. Items that aren't records read as
/// an empty record, so every item still counts.
pub fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Null => Vec::new(),
        other => {
            warn!("Expected a list, got {}", other);
            Vec::new()
        }
    };
    Ok(items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item.clone()).unwrap_or_else(|err| {
                warn!("Malformed record {} read as empty: {}", item, err);
                T::default()
            })
        })
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentData {
    #[serde(default, deserialize_with = "lenient_list")]
    pub payments: Vec<Payment>,
}

impl Payload for PaymentData {
    const FAILURE: &'static str = "Failed to fetch payment details";
}

/// Batches of one course, the backend spells pursuing as `persuing`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchData {
    #[serde(default, deserialize_with = "lenient_list")]
    pub persuing: Vec<Batch>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub completed: Vec<Batch>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub pending: Vec<Subject>,
}

impl Payload for BatchData {
    const FAILURE: &'static str = "No batches found";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectData {
    #[serde(
        rename = "persuingSubjects",
        default,
        deserialize_with = "lenient_list"
    )]
    pub persuing_subjects: Vec<Subject>,
    #[serde(
        rename = "completedSubjects",
        default,
        deserialize_with = "lenient_list"
    )]
    pub completed_subjects: Vec<Subject>,
    #[serde(
        rename = "pendingSubjects",
        default,
        deserialize_with = "lenient_list"
    )]
    pub pending_subjects: Vec<Subject>,
}

impl Payload for SubjectData {
    const FAILURE: &'static str = "Error fetching data";
}

/// Attendance rows of one batch, `data` is the list itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceData(#[serde(deserialize_with = "lenient_list")] pub Vec<RawAttendance>);

impl Payload for AttendanceData {
    const FAILURE: &'static str = "No attendance found";
}
