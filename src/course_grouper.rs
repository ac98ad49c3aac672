use crate::batch::{BatchRecord, BatchStatus, raw};
use crate::payload::{BatchData, Envelope};
use crate::subject::{SubjectRecord, SubjectStatus};
use anyhow::Result;
use log::debug;
use std::fmt;
use std::ops::Deref;

/// Batches bucketed by subject, buckets in the order their subject was first seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectBuckets(Vec<(String, Vec<BatchRecord>)>);

impl SubjectBuckets {
    /// Appends to the batch's subject bucket, creating it at the end if new.
    fn push(&mut self, batch: BatchRecord) {
        match self.0.iter_mut().find(|(subject, _)| *subject == batch.subject) {
            Some((_, batches)) => batches.push(batch),
            None => self.0.push((batch.subject.clone(), vec![batch])),
        }
    }

    pub fn get(&self, subject: &str) -> Option<&[BatchRecord]> {
        self.0
            .iter()
            .find(|(name, _)| name == subject)
            .map(|(_, batches)| batches.as_slice())
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(subject, _)| subject.as_str())
    }

    pub fn batch_count(&self) -> usize {
        self.0.iter().map(|(_, batches)| batches.len()).sum()
    }
}

impl Deref for SubjectBuckets {
    type Target = Vec<(String, Vec<BatchRecord>)>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounts {
    pub pursuing: usize,
    pub completed: usize,
    pub pending: usize,
    pub subjects: usize,
}

/// A student's batches for one course, organised by subject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseGrouping {
    pursuing: Vec<BatchRecord>,
    completed: Vec<BatchRecord>,
    pending: Vec<SubjectRecord>,
    subjects_in_order: Vec<String>,
    pursuing_by_subject: SubjectBuckets,
    completed_by_subject: SubjectBuckets,
}

impl CourseGrouping {
    pub fn group(
        pursuing: Vec<raw::Batch>,
        completed: Vec<raw::Batch>,
        pending: Vec<SubjectRecord>,
    ) -> Self {
        let mut subjects_in_order = Vec::new();
        let (pursuing, pursuing_by_subject) =
            bucket(pursuing, BatchStatus::Pursuing, &mut subjects_in_order);
        let (completed, completed_by_subject) =
            bucket(completed, BatchStatus::Completed, &mut subjects_in_order);
        debug!(
            "Grouped {} pursuing and {} completed batches under {} subject(s)",
            pursuing.len(),
            completed.len(),
            subjects_in_order.len()
        );
        CourseGrouping {
            pursuing,
            completed,
            pending,
            subjects_in_order,
            pursuing_by_subject,
            completed_by_subject,
        }
    }

    pub fn from_payload(envelope: Envelope<BatchData>) -> Result<Self> {
        let BatchData {
            persuing,
            completed,
            pending,
        } = envelope.into_data()?;
        let pending = pending
            .into_iter()
            .map(|subject| SubjectRecord::from_raw(subject, SubjectStatus::Pending))
            .collect();
        Ok(Self::group(persuing, completed, pending))
    }

    pub fn subjects_in_order(&self) -> &[String] {
        &self.subjects_in_order
    }

    pub fn pursuing_by_subject(&self) -> &SubjectBuckets {
        &self.pursuing_by_subject
    }

    pub fn completed_by_subject(&self) -> &SubjectBuckets {
        &self.completed_by_subject
    }

    pub fn by_subject(&self, status: BatchStatus) -> &SubjectBuckets {
        match status {
            BatchStatus::Pursuing => &self.pursuing_by_subject,
            BatchStatus::Completed => &self.completed_by_subject,
        }
    }

    pub fn pursuing(&self) -> &[BatchRecord] {
        &self.pursuing
    }

    pub fn completed(&self) -> &[BatchRecord] {
        &self.completed
    }

    pub fn pending(&self) -> &[SubjectRecord] {
        &self.pending
    }

    pub fn counts(&self) -> BatchCounts {
        BatchCounts {
            pursuing: self.pursuing.len(),
            completed: self.completed.len(),
            pending: self.pending.len(),
            subjects: self.subjects_in_order.len(),
        }
    }

    /// Writes one status tab: every known subject that has batches under that status.
    pub fn write_status(&self, f: &mut impl fmt::Write, status: BatchStatus) -> fmt::Result {
        let buckets = self.by_subject(status);
        if buckets.is_empty() {
            return writeln!(f, "No {} batches found.", status.to_string().to_lowercase());
        }
        writeln!(f, "{}", status)?;
        for subject in &self.subjects_in_order {
            if let Some(batches) = buckets.get(subject) {
                writeln!(f, "  {} ({})", subject, batches.len())?;
                for batch in batches {
                    writeln!(f, "    {}", batch.to_row_string())?;
                }
            }
        }
        Ok(())
    }
}

fn bucket(
    raw_batches: Vec<raw::Batch>,
    status: BatchStatus,
    subjects_in_order: &mut Vec<String>,
) -> (Vec<BatchRecord>, SubjectBuckets) {
    let mut buckets = SubjectBuckets::default();
    let batches: Vec<BatchRecord> = raw_batches
        .into_iter()
        .map(|raw_batch| BatchRecord::from_raw(raw_batch, status))
        .collect();
    for batch in &batches {
        if !subjects_in_order.contains(&batch.subject) {
            subjects_in_order.push(batch.subject.clone());
        }
        buckets.push(batch.clone());
    }
    (batches, buckets)
}

impl fmt::Display for CourseGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_status(f, BatchStatus::Pursuing)?;
        self.write_status(f, BatchStatus::Completed)?;
        if self.pending.is_empty() {
            writeln!(f, "No pending subjects found.")?;
        } else {
            writeln!(f, "Pending ({})", self.pending.len())?;
            for subject in &self.pending {
                writeln!(f, "  {}", subject.subject_name)?;
            }
        }
        Ok(())
    }
}
