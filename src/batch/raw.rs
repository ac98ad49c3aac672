use crate::raw::Scalar;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Raw batch row deserialized from the batch details payload.
/// Several fields come under more than one name depending on the backend query.
#[skip_serializing_none]
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
pub struct Batch {
    pub subject: Option<Scalar>,
    pub batchno: Option<Scalar>,
    pub batchname: Option<Scalar>,
    pub faculty_display_name: Option<Scalar>,
    pub faculty_name: Option<Scalar>,
    pub facultyid: Option<Scalar>, // an email address
    pub faculty: Option<Scalar>,
    pub startdate: Option<Scalar>,
    pub date: Option<Scalar>,
    #[serde(rename = "ExceptedEnddate")]
    pub expected_end_date: Option<Scalar>,
    pub endate: Option<Scalar>,
    pub batch_time: Option<Scalar>,
}
