pub mod attendance;
pub mod batch;
pub mod course_grouper;
pub mod date;
pub mod documents;
pub mod enrolment;
pub mod fee_ledger;
pub mod money;
pub mod payload;
pub mod payment;
pub mod raw;
pub mod subject;

use anyhow::{Context, Error, Result};
use attendance::{AttendanceRecord, AttendanceSheet};
use course_grouper::CourseGrouping;
use fee_ledger::FeeLedger;
use futures::stream::{self, Stream, TryStreamExt};
use log::debug;
use payload::{
    AttendanceData, BatchData, Envelope, Payload, PaymentData, SubjectData, parse_envelopes,
};
use payment::PaymentRecord;
use std::borrow::ToOwned;
use subject::SubjectList;

/// Payloads already fetched from the portal backend, read from a file, a dir of files, or stdin.
pub struct Portal {
    path: Option<String>,
}

impl Portal {
    pub fn new(path: Option<&str>) -> Self {
        Portal {
            path: path.map(ToOwned::to_owned),
        }
    }

    /// Every envelope in the payloads, documents in the order they are read
    pub fn envelopes<T: Payload>(&self) -> impl Stream<Item = Result<Envelope<T>>> + use<T> {
        documents::documents(self.path.clone())
            .map_err(Error::new) // map to anyhow::Error from here on
            .and_then(|doc: String| async move {
                let envelopes = parse_envelopes::<T>(&doc)
                    .with_context(|| format!("Failed to deserialize payload:\n{}", doc))?;
                debug!("Read {} envelope(s)", envelopes.len());
                anyhow::Ok(stream::iter(envelopes.into_iter().map(anyhow::Ok)))
            })
            .try_flatten()
    }

    /// Payloads of every successful envelope, failing on the first unsuccessful one
    async fn payloads<T: Payload>(&self) -> Result<Vec<T>> {
        self.envelopes::<T>()
            .and_then(|envelope| async move { envelope.into_data() })
            .try_collect()
            .await
    }

    pub async fn fee_ledger(&self) -> Result<FeeLedger> {
        let records = self
            .payloads::<PaymentData>()
            .await?
            .into_iter()
            .flat_map(|data| data.payments)
            .map(PaymentRecord::from)
            .collect();
        Ok(FeeLedger::calculate(records))
    }

    pub async fn course_grouping(&self) -> Result<CourseGrouping> {
        let merged = self.payloads::<BatchData>().await?.into_iter().fold(
            BatchData::default(),
            |mut merged, mut data| {
                merged.persuing.append(&mut data.persuing);
                merged.completed.append(&mut data.completed);
                merged.pending.append(&mut data.pending);
                merged
            },
        );
        CourseGrouping::from_payload(Envelope::new(merged))
    }

    pub async fn subject_list(&self) -> Result<SubjectList> {
        let merged = self.payloads::<SubjectData>().await?.into_iter().fold(
            SubjectData::default(),
            |mut merged, mut data| {
                merged.persuing_subjects.append(&mut data.persuing_subjects);
                merged.completed_subjects.append(&mut data.completed_subjects);
                merged.pending_subjects.append(&mut data.pending_subjects);
                merged
            },
        );
        SubjectList::from_payload(Envelope::new(merged))
    }

    pub async fn attendance_sheet(&self) -> Result<AttendanceSheet> {
        let records = self
            .payloads::<AttendanceData>()
            .await?
            .into_iter()
            .flat_map(|AttendanceData(rows)| rows)
            .map(AttendanceRecord::from)
            .collect();
        Ok(AttendanceSheet::new(records))
    }
}
