use std::path::{Component, Path};

use super::error::{StorageError, StorageResult};

/// Checks a project or task name typed by the user and returns it trimmed. Names become
/// directory and file names, so anything that could escape the tasks directory or hide itself
/// is refused.
pub fn validate_name(name: &str) -> StorageResult<&str> {
    let trimmed = name.trim();
    let reason = if trimmed.is_empty() {
        Some("it is empty")
    } else if trimmed.starts_with('.') {
        Some("names starting with '.' are reserved")
    } else if trimmed.contains(['/', '\\']) {
        Some("it contains a path separator")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StorageError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => path_component(trimmed),
    }
}

/// Accepts a name as is, as long as it stays a single entry inside its parent directory. Used
/// for every name that reaches the disk, including ones listed from it, which may carry
/// whitespace or characters users can no longer type.
pub fn path_component(name: &str) -> StorageResult<&str> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(v)), None) if v == name
    );

    if name.contains('\0') {
        Err(StorageError::InvalidName {
            name: name.to_string(),
            reason: "it contains a NUL character",
        })
    } else if !single {
        Err(StorageError::InvalidName {
            name: name.to_string(),
            reason: "it isn't a single directory entry",
        })
    } else {
        Ok(name)
    }
}
