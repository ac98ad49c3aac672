use crate::date::display_date;
use crate::payload::{AttendanceData, Envelope};
use crate::raw::{Scalar, present};
use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt;

/// Raw attendance row, the backend spells the status field `attendence`
#[skip_serializing_none]
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
pub struct RawAttendance {
    pub date: Option<Scalar>,
    #[serde(rename = "attendence")]
    pub attendance: Option<Scalar>,
    pub topic: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
    NoBatchToday,
    Unrecognized(String),
}

impl AttendanceStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "present" => AttendanceStatus::Present,
            "absent" => AttendanceStatus::Absent,
            "no batch today" => AttendanceStatus::NoBatchToday,
            _ => AttendanceStatus::Unrecognized(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub date: Option<String>,
    pub status: AttendanceStatus,
    /// The status as sent, `Unknown` when missing
    pub label: String,
    pub topic: Option<String>,
}

impl From<RawAttendance> for AttendanceRecord {
    fn from(raw: RawAttendance) -> Self {
        let value = present(&raw.attendance);
        AttendanceRecord {
            date: present(&raw.date),
            status: AttendanceStatus::parse(value.as_deref().unwrap_or_default()),
            label: value.unwrap_or_else(|| "Unknown".to_string()),
            topic: present(&raw.topic),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceTally {
    pub present: usize,
    pub absent: usize,
    pub no_batch: usize,
    pub unrecognized: usize,
    pub total: usize,
}

impl AttendanceTally {
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        records
            .into_iter()
            .fold(AttendanceTally::default(), |mut tally, record| {
                match &record.status {
                    AttendanceStatus::Present => tally.present += 1,
                    AttendanceStatus::Absent => tally.absent += 1,
                    AttendanceStatus::NoBatchToday => tally.no_batch += 1,
                    AttendanceStatus::Unrecognized(value) => {
                        debug!("Unrecognized attendance value {:?}", value);
                        tally.unrecognized += 1
                    }
                };
                tally.total += 1;
                tally
            })
    }
}

/// Attendance of one batch with its counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceSheet {
    records: Vec<AttendanceRecord>,
    tally: AttendanceTally,
}

impl AttendanceSheet {
    pub fn new(records: Vec<AttendanceRecord>) -> Self {
        let tally = AttendanceTally::tally(&records);
        AttendanceSheet { records, tally }
    }

    pub fn from_payload(envelope: Envelope<AttendanceData>) -> Result<Self> {
        let AttendanceData(rows) = envelope.into_data()?;
        Ok(Self::new(rows.into_iter().map(AttendanceRecord::from).collect()))
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn tally(&self) -> AttendanceTally {
        self.tally
    }
}

impl fmt::Display for AttendanceSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(
                f,
                "{:10} | {:14} | {}",
                display_date(record.date.as_deref()),
                record.label,
                record.topic.as_deref().unwrap_or("-")
            )?;
        }
        let AttendanceTally {
            present,
            absent,
            no_batch,
            unrecognized,
            total,
        } = self.tally;
        writeln!(
            f,
            "Present {present} | Absent {absent} | No Batch {no_batch} | Other {unrecognized} | Total {total}"
        )
    }
}
