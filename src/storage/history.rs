//! Recent-files list and stored analysis reports.

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};
use serde::Serialize;

use super::Database;
use crate::constants::history;
use crate::report::AnalysisReport;
use crate::types::{Result, log_filter_error};

/// One entry of the recent-files list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFile {
    pub file_key: String,
    pub file_name: Option<String>,
    pub thumbnail_url: Option<String>,
    pub archetype: String,
    pub total_layers: usize,
    pub last_accessed: DateTime<Utc>,
}

/// Rows removed by a clean operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub recent_files: usize,
    pub analyses: usize,
}

pub struct HistoryStore<'a> {
    db: &'a Database,
    max_entries: usize,
}

impl<'a> HistoryStore<'a> {
    pub fn new(db: &'a Database, max_entries: usize) -> Self {
        Self { db, max_entries }
    }

    /// Store a report and move its file to the front of the recent list.
    ///
    /// Only the newest reports of a file are kept. Files pushed past
    /// `max_entries` are evicted together with their stored reports; reports
    /// of files no longer on the list (after `clean`) are left alone.
    /// Returns the id of the stored analysis.
    pub fn record(&self, report: &AnalysisReport) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let report_json = serde_json::to_string(report)?;
        let now = Utc::now().to_rfc3339();
        let max_entries = self.max_entries as i64;

        let file = &report.file;
        let archetype = &report.personality.primary_archetype;
        let total_layers = report.stats.total_layers as i64;

        self.db.transaction(|conn| {
            conn.execute(
                "INSERT INTO analyses (id, file_key, archetype, report_json, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, file.file_key, archetype, report_json, now],
            )?;

            conn.execute(
                r#"
                INSERT INTO recent_files
                    (file_key, file_name, thumbnail_url, archetype, total_layers, access_seq, last_accessed)
                VALUES (?1, ?2, ?3, ?4, ?5,
                        (SELECT COALESCE(MAX(access_seq), 0) + 1 FROM recent_files), ?6)
                ON CONFLICT(file_key) DO UPDATE SET
                    file_name = excluded.file_name,
                    thumbnail_url = excluded.thumbnail_url,
                    archetype = excluded.archetype,
                    total_layers = excluded.total_layers,
                    access_seq = excluded.access_seq,
                    last_accessed = excluded.last_accessed
                "#,
                params![
                    file.file_key,
                    file.file_name,
                    file.thumbnail_url,
                    archetype,
                    total_layers,
                    now
                ],
            )?;

            // Older reports of this file beyond the per-file cap
            conn.execute(
                "DELETE FROM analyses WHERE file_key = ?1 AND rowid NOT IN
                    (SELECT rowid FROM analyses WHERE file_key = ?1
                     ORDER BY rowid DESC LIMIT ?2)",
                params![file.file_key, history::REPORTS_PER_FILE as i64],
            )?;

            let evicted: Vec<String> = {
                let mut stmt = conn.prepare(
                    "SELECT file_key FROM recent_files
                     ORDER BY access_seq DESC LIMIT -1 OFFSET ?1",
                )?;
                stmt.query_map(params![max_entries], |row| row.get(0))?
                    .collect::<rusqlite::Result<_>>()?
            };
            for key in &evicted {
                conn.execute("DELETE FROM recent_files WHERE file_key = ?1", params![key])?;
                conn.execute("DELETE FROM analyses WHERE file_key = ?1", params![key])?;
            }
            if !evicted.is_empty() {
                tracing::debug!(evicted = evicted.len(), "Trimmed recent files");
            }

            Ok(())
        })?;

        Ok(id)
    }

    /// Recent files, newest first
    pub fn recent(&self, limit: usize) -> Result<Vec<RecentFile>> {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(
            "SELECT file_key, file_name, thumbnail_url, archetype, total_layers, last_accessed
             FROM recent_files ORDER BY access_seq DESC LIMIT ?1",
        )?;

        let files = stmt
            .query_map(params![limit as i64], Self::map_recent_row)?
            .filter_map(|r| log_filter_error(r, "reading recent file"))
            .collect();
        Ok(files)
    }

    /// Most recent stored report for a file
    pub fn latest_report(&self, file_key: &str) -> Result<Option<AnalysisReport>> {
        let conn = self.db.connection()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT report_json FROM analyses WHERE file_key = ?1
                 ORDER BY rowid DESC LIMIT 1",
                params![file_key],
                |row| row.get(0),
            )
            .optional()?;

        json.map(|j| AnalysisReport::from_json(&j)).transpose()
    }

    pub fn analysis_count(&self) -> Result<usize> {
        let conn = self.db.connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Clear the recent list; with `all`, stored reports too
    pub fn clean(&self, all: bool) -> Result<CleanSummary> {
        self.db.transaction(|conn| {
            let recent_files = conn.execute("DELETE FROM recent_files", [])?;
            let analyses = if all {
                conn.execute("DELETE FROM analyses", [])?
            } else {
                0
            };
            Ok(CleanSummary {
                recent_files,
                analyses,
            })
        })
    }

    fn map_recent_row(row: &Row<'_>) -> rusqlite::Result<RecentFile> {
        let last_accessed: String = row.get(5)?;
        let last_accessed = DateTime::parse_from_rfc3339(&last_accessed)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
            })?;
        let total_layers: i64 = row.get(4)?;

        Ok(RecentFile {
            file_key: row.get(0)?,
            file_name: row.get(1)?,
            thumbnail_url: row.get(2)?,
            archetype: row.get(3)?,
            total_layers: total_layers.max(0) as usize,
            last_accessed,
        })
    }
}
