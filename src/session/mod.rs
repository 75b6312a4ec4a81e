//! Interactive tracking of a single task: pick a project and a task, run the timer until it's
//! stopped, ask for a description and save the result.

pub mod editor;
pub mod shutdown;
pub mod timer;

use std::{future::Future, time::Duration};

use anyhow::{Context, Result};
use editor::TextEditor;
use timer::{run_timer, REFRESH_INTERVAL};
use tracing::info;

use crate::{
    storage::{entities::TaskRecordEntity, names::validate_name, task_storage::TaskStorage},
    terminal::Terminal,
    utils::{clock::Clock, elapsed::ElapsedTime},
};

/// Result of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedTask {
    pub project: String,
    pub task: String,
    pub record: TaskRecordEntity,
}

pub struct TrackingSession<S: TaskStorage> {
    storage: S,
    terminal: Box<dyn Terminal>,
    editor: Box<dyn TextEditor>,
    clock: Box<dyn Clock>,
    refresh: Duration,
}

impl<S: TaskStorage> TrackingSession<S> {
    pub fn new(
        storage: S,
        terminal: Box<dyn Terminal>,
        editor: Box<dyn TextEditor>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            terminal,
            editor,
            clock,
            refresh: REFRESH_INTERVAL,
        }
    }

    /// Runs the whole session. `stop` ends the timer, every other failure ends the session
    /// before anything is written.
    pub async fn run(mut self, stop: impl Future<Output = Result<()>>) -> Result<TrackedTask> {
        let project = self.select_project()?;
        let task = self.select_task(&project)?;
        info!("Tracking task {task} of project {project}");

        let record = self.track(&project, &task, stop).await?;

        self.storage
            .append_and_save(&project, &task, record.clone())
            .with_context(|| format!("Failed to save task {task} of project {project}"))?;
        info!(
            "Saved {} minutes for task {task} of project {project}",
            record.duration
        );
        self.terminal
            .note(&format!("Task: `{task}` for Project {project} saved"))?;

        Ok(TrackedTask {
            project,
            task,
            record,
        })
    }

    fn select_project(&mut self) -> Result<String> {
        self.terminal.note("Available Projects")?;
        for project in self.storage.list_projects()? {
            self.terminal.list_item(&project)?;
        }
        let answer = self.terminal.prompt("Project Name: ")?;
        let project = validate_name(&answer)?.to_string();
        self.storage.ensure_project(&project)?;
        Ok(project)
    }

    fn select_task(&mut self, project: &str) -> Result<String> {
        self.terminal.note("Available Tasks")?;
        for task in self.storage.list_tasks(project)? {
            self.terminal.list_item(&task)?;
        }
        let answer = self.terminal.prompt("Task Name: ")?;
        Ok(validate_name(&answer)?.to_string())
    }

    async fn track(
        &mut self,
        project: &str,
        task: &str,
        stop: impl Future<Output = Result<()>>,
    ) -> Result<TaskRecordEntity> {
        let start = self.clock.time();
        self.terminal
            .note(&format!("Task: `{task}` for Project {project} started"))?;

        let end = run_timer(&*self.clock, &mut *self.terminal, start, self.refresh, stop).await?;
        let elapsed = ElapsedTime::between(&start, &end);
        self.terminal.redraw(&elapsed.to_string())?;
        self.terminal.finish_line()?;
        info!("Task {task} stopped after {elapsed}");

        let description = self.editor.edit_text("")?;
        Ok(TaskRecordEntity::new(
            start.naive_local(),
            elapsed.persisted_minutes(),
            description.trim_end(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::{
        session::{
            editor::MockTextEditor,
            timer::tests::{test_start, TestClock},
            TrackingSession,
        },
        storage::{
            entities::TaskRecordEntity,
            task_storage::{TaskStorage, TaskStorageImpl},
        },
        terminal::MockTerminal,
        utils::logging::TEST_LOGGING,
    };

    /// Terminal answering the two prompts and recording everything else it's asked to show.
    fn scripted_terminal(
        project: &'static str,
        task: &'static str,
        shown: Arc<Mutex<Vec<String>>>,
    ) -> MockTerminal {
        let mut terminal = MockTerminal::new();
        let notes = shown.clone();
        terminal.expect_note().returning(move |text| {
            notes.lock().unwrap().push(format!("note {text}"));
            Ok(())
        });
        let items = shown.clone();
        terminal.expect_list_item().returning(move |text| {
            items.lock().unwrap().push(format!("item {text}"));
            Ok(())
        });
        let frames = shown.clone();
        terminal.expect_redraw().returning(move |text| {
            frames.lock().unwrap().push(format!("redraw {text}"));
            Ok(())
        });
        terminal.expect_finish_line().returning(|| Ok(()));
        terminal
            .expect_prompt()
            .withf(|label| label == "Project Name: ")
            .times(1)
            .returning(move |_| Ok(project.to_string()));
        terminal
            .expect_prompt()
            .withf(|label| label == "Task Name: ")
            .times(1)
            .returning(move |_| Ok(task.to_string()));
        terminal
    }

    fn stop_after(seconds: u64) -> impl std::future::Future<Output = Result<()>> {
        async move {
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_saves_record() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let storage = TaskStorageImpl::new(dir.path().to_owned())?;
        storage.ensure_project("hobby")?;
        storage.ensure_project("work")?;
        storage.append_and_save(
            "work",
            "email",
            TaskRecordEntity::new(test_start().naive_local(), 10, "earlier"),
        )?;

        let shown = Arc::new(Mutex::new(vec![]));
        let mut editor = MockTextEditor::new();
        editor
            .expect_edit_text()
            .withf(|initial| initial.is_empty())
            .times(1)
            .returning(|_| Ok("fixed the build\n\n".into()));

        let session = TrackingSession::new(
            TaskStorageImpl::new(dir.path().to_owned())?,
            Box::new(scripted_terminal(" work ", "email", shown.clone())),
            Box::new(editor),
            Box::new(TestClock::starting_at(test_start())),
        );
        let tracked = session.run(stop_after(125)).await?;

        let expected = TaskRecordEntity::new(test_start().naive_local(), 2, "fixed the build");
        assert_eq!(tracked.project, "work");
        assert_eq!(tracked.task, "email");
        assert_eq!(tracked.record, expected);
        assert_eq!(storage.load_records("work", "email")?.last(), Some(&expected));
        assert_eq!(storage.load_records("work", "email")?.len(), 2);

        let shown = shown.lock().unwrap();
        assert_eq!(
            shown[..6],
            [
                "note Available Projects",
                "item hobby",
                "item work",
                "note Available Tasks",
                "item email",
                "note Task: `email` for Project work started",
            ]
        );
        assert_eq!(shown[6], "redraw 0:00");
        assert_eq!(shown[shown.len() - 2], "redraw 2:05");
        assert_eq!(shown[shown.len() - 1], "note Task: `email` for Project work saved");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_project_and_task() -> Result<()> {
        let dir = tempdir()?;
        let shown = Arc::new(Mutex::new(vec![]));
        let mut editor = MockTextEditor::new();
        editor.expect_edit_text().returning(|_| Ok(String::new()));

        let session = TrackingSession::new(
            TaskStorageImpl::new(dir.path().join("tasks"))?,
            Box::new(scripted_terminal("side project", "setup", shown.clone())),
            Box::new(editor),
            Box::new(TestClock::starting_at(test_start())),
        );
        let tracked = session.run(stop_after(0)).await?;

        assert_eq!(tracked.record.duration, 0);
        assert_eq!(tracked.record.description, "");
        let saved = fs::read_to_string(dir.path().join("tasks/side project/setup.json"))?;
        let saved: Vec<TaskRecordEntity> = serde_json::from_str(&saved)?;
        assert_eq!(saved, vec![tracked.record]);
        assert_eq!(
            saved[0].date.date(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsafe_project_name_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("tasks");
        let mut terminal = MockTerminal::new();
        terminal.expect_note().returning(|_| Ok(()));
        terminal.expect_list_item().returning(|_| Ok(()));
        terminal
            .expect_prompt()
            .returning(|_| Ok("../outside".to_string()));

        let session = TrackingSession::new(
            TaskStorageImpl::new(root.clone())?,
            Box::new(terminal),
            Box::new(MockTextEditor::new()),
            Box::new(TestClock::starting_at(test_start())),
        );
        let result = session.run(stop_after(60)).await;

        assert!(result.is_err());
        assert!(!dir.path().join("outside").exists());
        assert_eq!(fs::read_dir(&root)?.count(), 0);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_editor_failure_saves_nothing() -> Result<()> {
        let dir = tempdir()?;
        let shown = Arc::new(Mutex::new(vec![]));
        let mut editor = MockTextEditor::new();
        editor.expect_edit_text().returning(|_| {
            Err(crate::session::editor::EditorError::Launch {
                editor: "vim".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });

        let session = TrackingSession::new(
            TaskStorageImpl::new(dir.path().to_owned())?,
            Box::new(scripted_terminal("work", "email", shown.clone())),
            Box::new(editor),
            Box::new(TestClock::starting_at(test_start())),
        );
        let result = session.run(stop_after(90)).await;

        assert!(result.is_err());
        let storage = TaskStorageImpl::new(dir.path().to_owned())?;
        assert!(storage.load_records("work", "email")?.is_empty());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_stop_signal_ends_session() -> Result<()> {
        let dir = tempdir()?;
        let shown = Arc::new(Mutex::new(vec![]));

        let session = TrackingSession::new(
            TaskStorageImpl::new(dir.path().to_owned())?,
            Box::new(scripted_terminal("work", "email", shown.clone())),
            Box::new(MockTextEditor::new()),
            Box::new(TestClock::starting_at(test_start())),
        );
        let result = session
            .run(async { Err(anyhow!("Failed to listen for Ctrl-C")) })
            .await;

        assert!(result.is_err());
        assert!(!dir.path().join("work").join("email.json").exists());
        Ok(())
    }
}
