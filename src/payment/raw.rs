use crate::raw::Scalar;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Raw payment row deserialized from the fee details payload
#[skip_serializing_none]
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
pub struct Payment {
    #[serde(rename = "Dates")]
    pub dates: Option<Scalar>,
    #[serde(rename = "Paid")]
    pub paid: Option<Scalar>,
    #[serde(rename = "courseFees")]
    pub course_fees: Option<Scalar>,
    #[serde(rename = "Receipt")]
    pub receipt: Option<Scalar>,
    pub course: Option<Scalar>,
    #[serde(rename = "Balance")]
    pub balance: Option<Scalar>, // as reported by the backend, not used for the ledger
}
