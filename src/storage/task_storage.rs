use std::{
    fs::{self, DirEntry},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::{
    entities::TaskRecordEntity,
    error::{StorageError, StorageResult},
    names::path_component,
};

/// Extension of task files inside a project directory.
const TASK_EXTENSION: &str = "json";

/// Interface for abstracting storage of task records.
pub trait TaskStorage {
    /// Names of all known projects, sorted.
    fn list_projects(&self) -> StorageResult<Vec<String>>;

    /// Names of all tasks of a project, sorted. A project that doesn't exist yet has no tasks.
    fn list_tasks(&self, project: &str) -> StorageResult<Vec<String>>;

    /// Creates the project if it's missing. Existing tasks are left alone.
    fn ensure_project(&self, project: &str) -> StorageResult<()>;

    /// Every record of a task in the order they were added. Unknown tasks have no records.
    fn load_records(&self, project: &str, task: &str) -> StorageResult<Vec<TaskRecordEntity>>;

    /// Adds a record to the end of a task and writes the whole task back. The project has to
    /// exist.
    fn append_and_save(
        &self,
        project: &str,
        task: &str,
        record: TaskRecordEntity,
    ) -> StorageResult<()>;
}

/// The main realization of [TaskStorage]. Projects are directories under `tasks_root`, tasks
/// are `<task>.json` files inside them.
pub struct TaskStorageImpl {
    tasks_root: PathBuf,
}

impl TaskStorageImpl {
    pub fn new(tasks_root: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&tasks_root).map_err(StorageError::file_system(&tasks_root))?;

        Ok(Self { tasks_root })
    }

    fn project_path(&self, project: &str) -> StorageResult<PathBuf> {
        Ok(self.tasks_root.join(path_component(project)?))
    }

    fn task_path(&self, project: &str, task: &str) -> StorageResult<PathBuf> {
        let task = path_component(task)?;
        Ok(self
            .project_path(project)?
            .join(format!("{task}.{TASK_EXTENSION}")))
    }

    /// Lists names produced by `select` for every visible entry of `dir`, sorted.
    fn list_entries(
        dir: &Path,
        select: impl Fn(&DirEntry, &str) -> StorageResult<Option<String>>,
    ) -> StorageResult<Vec<String>> {
        let mut names = vec![];
        for entry in fs::read_dir(dir).map_err(StorageError::file_system(dir))? {
            let entry = entry.map_err(StorageError::file_system(dir))?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                warn!("Skipping entry with a non UTF-8 name {:?}", entry.path());
                continue;
            };
            if file_name.starts_with('.') {
                continue;
            }
            if let Some(name) = select(&entry, file_name)? {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

impl TaskStorage for TaskStorageImpl {
    fn list_projects(&self) -> StorageResult<Vec<String>> {
        Self::list_entries(&self.tasks_root, |entry, name| {
            let file_type = entry
                .file_type()
                .map_err(StorageError::file_system(entry.path()))?;
            if file_type.is_dir() {
                Ok(Some(name.to_string()))
            } else {
                debug!("Skipping {:?}, projects are directories", entry.path());
                Ok(None)
            }
        })
    }

    fn list_tasks(&self, project: &str) -> StorageResult<Vec<String>> {
        let project_path = self.project_path(project)?;
        if !project_path.is_dir() {
            return Ok(vec![]);
        }
        Self::list_entries(&project_path, |entry, _| {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(StorageError::file_system(&path))?;
            let is_task = file_type.is_file()
                && path.extension().is_some_and(|v| v == TASK_EXTENSION);
            if !is_task {
                debug!("Skipping {path:?}, it's not a task file");
                return Ok(None);
            }
            Ok(path
                .file_stem()
                .and_then(|v| v.to_str())
                .map(str::to_string))
        })
    }

    fn ensure_project(&self, project: &str) -> StorageResult<()> {
        let project_path = self.project_path(project)?;
        debug!("Ensuring project directory {project_path:?}");
        fs::create_dir_all(&project_path).map_err(StorageError::file_system(&project_path))
    }

    fn load_records(&self, project: &str, task: &str) -> StorageResult<Vec<TaskRecordEntity>> {
        let path = self.task_path(project, task)?;
        debug!("Loading records from {path:?}");
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(source) => return Err(StorageError::FileSystem { path, source }),
        };
        serde_json::from_str(&content).map_err(|source| StorageError::Parse { path, source })
    }

    fn append_and_save(
        &self,
        project: &str,
        task: &str,
        record: TaskRecordEntity,
    ) -> StorageResult<()> {
        let path = self.task_path(project, task)?;
        let mut records = self.load_records(project, task)?;
        records.push(record);

        let buffer = serde_json::to_vec(&records).map_err(|source| StorageError::Parse {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, buffer).map_err(StorageError::file_system(&path))?;
        debug!("Saved {} records into {path:?}", records.len());
        Ok(())
    }
}
