pub mod raw;

use crate::date::display_date;
use crate::raw::{non_blank, present};
use std::fmt;

pub const GENERAL_SUBJECT: &str = "General";
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Pursuing,
    Completed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::Pursuing => f.pad("Pursuing"),
            BatchStatus::Completed => f.pad("Completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    pub subject: String,
    pub batch_identifier: String,
    pub faculty_name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub schedule_time: String,
    pub status: BatchStatus,
}

impl BatchRecord {
    /// Resolves the aliased raw fields, first match wins:
    ///
    /// * batch: `batchno`, `batchname`
    /// * faculty: `faculty_display_name`, `faculty_name`, the name part of `facultyid`, `faculty`
    /// * start: `startdate`, `date`
    /// * end: `ExceptedEnddate`, `endate`
    pub fn from_raw(raw_batch: raw::Batch, status: BatchStatus) -> Self {
        let raw::Batch {
            subject,
            batchno,
            batchname,
            faculty_display_name,
            faculty_name,
            facultyid,
            faculty,
            startdate,
            date,
            expected_end_date,
            endate,
            batch_time,
        } = raw_batch;

        let faculty_name = [
            non_blank(&faculty_display_name),
            non_blank(&faculty_name),
            present(&facultyid).map(|id| id.split('@').next().unwrap_or_default().to_string()),
            present(&faculty),
        ]
        .into_iter()
        .flatten()
        .next()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        BatchRecord {
            subject: present(&subject).unwrap_or_else(|| GENERAL_SUBJECT.to_string()),
            batch_identifier: present(&batchno)
                .or_else(|| present(&batchname))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            faculty_name,
            start_date: present(&startdate).or_else(|| present(&date)),
            end_date: present(&expected_end_date).or_else(|| present(&endate)),
            schedule_time: present(&batch_time).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status,
        }
    }

    pub fn to_row_string(&self) -> String {
        format!(
            "{:12} | {:24} | {:10} | {:10} | {}",
            self.batch_identifier,
            self.faculty_name,
            display_date(self.start_date.as_deref()),
            display_date(self.end_date.as_deref()),
            self.schedule_time
        )
    }
}

#[cfg(test)]
mod batch_tests {
    use super::*;
    use anyhow::Result;

    fn batch(json: &str) -> Result<BatchRecord> {
        let raw_batch: raw::Batch = serde_json::from_str(json)?;
        Ok(BatchRecord::from_raw(raw_batch, BatchStatus::Pursuing))
    }

    #[test]
    fn faculty_priority() -> Result<()> {
        let record = batch(
            r#"{"faculty_display_name":"Asha Rao","faculty_name":"asha","facultyid":"asha.r@example.com"}"#,
        )?;
        assert_eq!(record.faculty_name, "Asha Rao");

        let record = batch(r#"{"faculty_display_name":"  ","faculty_name":"Vikram","faculty":"V"}"#)?;
        assert_eq!(record.faculty_name, "Vikram", "Blank display name skipped");

        let record = batch(r#"{"faculty_name":"","facultyid":"neha.k@example.com","faculty":"Neha"}"#)?;
        assert_eq!(record.faculty_name, "neha.k");

        let record = batch(r#"{"faculty":"Imran"}"#)?;
        assert_eq!(record.faculty_name, "Imran");

        let record = batch(r#"{}"#)?;
        assert_eq!(record.faculty_name, "N/A");
        Ok(())
    }

    #[test]
    fn aliased_fields() -> Result<()> {
        let record = batch(
            r#"{"subject":"Math","batchname":"Morning A","date":"2024-06-01","endate":"2024-09-01"}"#,
        )?;
        assert_eq!(record.subject, "Math");
        assert_eq!(record.batch_identifier, "Morning A");
        assert_eq!(record.start_date.as_deref(), Some("2024-06-01"));
        assert_eq!(record.end_date.as_deref(), Some("2024-09-01"));
        assert_eq!(record.schedule_time, "N/A");

        let record = batch(
            r#"{"subject":"","batchno":112,"batchname":"ignored","startdate":"2024-06-03","ExceptedEnddate":"2024-08-30","batch_time":"10:00 - 11:00"}"#,
        )?;
        assert_eq!(record.subject, GENERAL_SUBJECT);
        assert_eq!(record.batch_identifier, "112");
        assert_eq!(record.start_date.as_deref(), Some("2024-06-03"));
        assert_eq!(record.end_date.as_deref(), Some("2024-08-30"));
        assert_eq!(
            record.to_row_string(),
            "112          | N/A                      | 03/06/2024 | 30/08/2024 | 10:00 - 11:00"
        );
        Ok(())
    }
}
