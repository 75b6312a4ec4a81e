pub mod table;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::{storage::task_storage::TaskStorage, utils::time::date_to_report_title};

/// A single tracking session that happened on the reported day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub project: String,
    pub task: String,
    pub description: String,
    pub minutes: u32,
}

impl ReportRow {
    pub fn hours(&self) -> String {
        format_hours(u64::from(self.minutes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub date: NaiveDate,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn title(&self) -> String {
        date_to_report_title(self.date)
    }

    pub fn total_minutes(&self) -> u64 {
        self.rows.iter().map(|v| u64::from(v.minutes)).sum()
    }

    pub fn total_hours(&self) -> String {
        format_hours(self.total_minutes())
    }
}

/// Minutes shown as hours with two decimals, e.g. 90 -> "1.50".
pub fn format_hours(minutes: u64) -> String {
    format!("{:.2}", minutes as f64 / 60.)
}

/// Collects every record started on `date` across all projects and tasks. Projects and tasks
/// come in name order, records of a task in the order they were saved.
pub fn build_report(storage: &impl TaskStorage, date: NaiveDate) -> Result<Report> {
    let mut rows = vec![];
    for project in storage.list_projects()? {
        for task in storage.list_tasks(&project)? {
            let records = storage
                .load_records(&project, &task)
                .with_context(|| format!("Failed to read task {task} of project {project}"))?;
            let before = rows.len();
            rows.extend(
                records
                    .into_iter()
                    .filter(|v| v.date.date() == date)
                    .map(|v| ReportRow {
                        project: project.clone(),
                        task: task.clone(),
                        description: v.description,
                        minutes: v.duration,
                    }),
            );
            debug!("{project}/{task} has {} records on {date}", rows.len() - before);
        }
    }
    Ok(Report { date, rows })
}
