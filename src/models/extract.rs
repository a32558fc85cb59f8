//! Snapshot aggregates: a timestamped batch of records for export.

use super::message::{datetime_format, MessageRecord};
use super::usage::UsageRecord;
use chrono::Utc;
use serde::Serialize;

/// A full, timestamped export of message records.
///
/// Created fresh for every export and never merged with a prior extract;
/// `count` always equals `records.len()` and record order is the provider
/// response order.
#[derive(Debug, Clone, Serialize)]
pub struct MessageExtract {
    pub extract_date: String,
    pub count: usize,
    pub records: Vec<MessageRecord>,
}

impl MessageExtract {
    /// Wrap a batch of records with its count and extraction timestamp.
    pub fn new(records: Vec<MessageRecord>) -> Self {
        Self {
            extract_date: Utc::now().format(datetime_format::FORMAT).to_string(),
            count: records.len(),
            records,
        }
    }
}

/// A full, timestamped export of account usage records.
#[derive(Debug, Clone, Serialize)]
pub struct UsageExtract {
    pub extract_date: String,
    pub count: usize,
    pub records: Vec<UsageRecord>,
}

impl UsageExtract {
    /// Wrap a batch of usage records with its count and extraction timestamp.
    pub fn new(records: Vec<UsageRecord>) -> Self {
        Self {
            extract_date: Utc::now().format(datetime_format::FORMAT).to_string(),
            count: records.len(),
            records,
        }
    }
}
