use crate::raw::Scalar;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Raw subject entry deserialized from the course or batch payload
#[skip_serializing_none]
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
pub struct Subject {
    pub subject: Option<Scalar>,
    pub subjectname: Option<Scalar>,
    /// Set when this subject is taught as part of a combined subject
    #[serde(rename = "originalCombinedSubject")]
    pub original_combined_subject: Option<Scalar>,
}
