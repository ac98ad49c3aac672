pub mod raw;

use crate::payload::{Envelope, SubjectData};
use crate::raw::present;
use anyhow::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectStatus {
    Pursuing,
    Completed,
    Pending,
}

impl fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubjectStatus::Pursuing => "Pursuing",
            SubjectStatus::Completed => "Completed",
            SubjectStatus::Pending => "Pending",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRecord {
    pub subject_name: String,
    pub status: SubjectStatus,
    pub combined_source_name: Option<String>,
}

impl SubjectRecord {
    pub fn from_raw(raw_subject: raw::Subject, status: SubjectStatus) -> Self {
        let raw::Subject {
            subject,
            subjectname,
            original_combined_subject,
        } = raw_subject;
        SubjectRecord {
            subject_name: present(&subject)
                .or_else(|| present(&subjectname))
                .unwrap_or_default(),
            status,
            combined_source_name: present(&original_combined_subject),
        }
    }

    pub fn is_combined(&self) -> bool {
        self.combined_source_name.is_some()
    }
}

impl fmt::Display for SubjectRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:32} | {:9}", self.subject_name, self.status)?;
        if let Some(source) = &self.combined_source_name {
            write!(f, " | part of {}", source)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectCounts {
    pub total: usize,
    pub pursuing: usize,
    pub completed: usize,
    pub pending: usize,
    pub combined: usize,
}

/// Every subject of a course in one list: pursuing, then completed, then pending.
/// A subject may show up once per status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectList(Vec<SubjectRecord>);

impl SubjectList {
    pub fn merge(
        pursuing: Vec<raw::Subject>,
        completed: Vec<raw::Subject>,
        pending: Vec<raw::Subject>,
    ) -> Self {
        let tagged = |subjects: Vec<raw::Subject>, status| {
            subjects
                .into_iter()
                .map(move |subject| SubjectRecord::from_raw(subject, status))
        };
        SubjectList(
            tagged(pursuing, SubjectStatus::Pursuing)
                .chain(tagged(completed, SubjectStatus::Completed))
                .chain(tagged(pending, SubjectStatus::Pending))
                .collect(),
        )
    }

    pub fn from_payload(envelope: Envelope<SubjectData>) -> Result<Self> {
        let SubjectData {
            persuing_subjects,
            completed_subjects,
            pending_subjects,
        } = envelope.into_data()?;
        Ok(Self::merge(
            persuing_subjects,
            completed_subjects,
            pending_subjects,
        ))
    }

    pub fn subjects(&self) -> &[SubjectRecord] {
        &self.0
    }

    pub fn counts(&self) -> SubjectCounts {
        self.0.iter().fold(
            SubjectCounts {
                total: self.0.len(),
                ..Default::default()
            },
            |mut counts, subject| {
                match subject.status {
                    SubjectStatus::Pursuing => counts.pursuing += 1,
                    SubjectStatus::Completed => counts.completed += 1,
                    SubjectStatus::Pending => counts.pending += 1,
                };
                if subject.is_combined() {
                    counts.combined += 1;
                }
                counts
            },
        )
    }
}

impl fmt::Display for SubjectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for subject in &self.0 {
            writeln!(f, "{}", subject)?;
        }
        let SubjectCounts {
            total,
            pursuing,
            completed,
            pending,
            combined,
        } = self.counts();
        writeln!(
            f,
            "{total} subject(s): {pursuing} pursuing, {completed} completed, {pending} pending, {combined} combined"
        )
    }
}
