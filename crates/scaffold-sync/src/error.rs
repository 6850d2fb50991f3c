//
// error.rs
//
// Error types for the update pipeline, the class reader and the patch applier
//

use std::fmt;
use std::path::PathBuf;

/// Fatal failures of [`crate::update`]. No edits are produced when one occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// No top-level function whose name starts with the setup prefix.
    SetupNotFound { path: PathBuf, prefix: String },
    /// The setup function never constructs the class-under-test.
    InstantiationNotFound {
        path: PathBuf,
        setup: String,
        class_name: String,
    },
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateError::SetupNotFound { path, prefix } => write!(
                f,
                "{}: there is no `{}*` function in the source file, cannot update it",
                path.display(),
                prefix
            ),
            UpdateError::InstantiationNotFound {
                path,
                setup,
                class_name,
            } => write!(
                f,
                "{}: `{}` never calls `new {}(...)`, cannot update it",
                path.display(),
                setup,
                class_name
            ),
        }
    }
}

impl std::error::Error for UpdateError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassReadError {
    /// `class_name` is `None` when any class would have done.
    ClassNotFound {
        path: PathBuf,
        class_name: Option<String>,
    },
}

impl fmt::Display for ClassReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassReadError::ClassNotFound {
                path,
                class_name: Some(name),
            } => write!(f, "{}: class `{}` not found", path.display(), name),
            ClassReadError::ClassNotFound {
                path,
                class_name: None,
            } => write!(f, "{}: no class declaration found", path.display()),
        }
    }
}

impl std::error::Error for ClassReadError {}

/// Reasons [`crate::patch::apply_edits`] refuses an edit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    OutOfBounds { start: usize, end: usize, len: usize },
    Overlapping { first: usize, second: usize },
    /// The text at the edit's range is not what the edit claims to remove.
    Mismatch { start: usize, expected: String, found: String },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::OutOfBounds { start, end, len } => write!(
                f,
                "edit {}..{} is outside of the {} byte document",
                start, end, len
            ),
            PatchError::Overlapping { first, second } => write!(
                f,
                "edits starting at {} and {} overlap",
                first, second
            ),
            PatchError::Mismatch {
                start,
                expected,
                found,
            } => write!(
                f,
                "edit at {} expected to remove {:?} but found {:?}",
                start, expected, found
            ),
        }
    }
}

impl std::error::Error for PatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_not_found_message() {
        let err = UpdateError::SetupNotFound {
            path: PathBuf::from("to-update.spec.ts"),
            prefix: "setup".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "to-update.spec.ts: there is no `setup*` function in the source file, cannot update it"
        );
    }

    #[test]
    fn test_instantiation_not_found_message() {
        let err = UpdateError::InstantiationNotFound {
            path: PathBuf::from("a.spec.ts"),
            setup: "setup".to_string(),
            class_name: "Widget".to_string(),
        };
        assert!(err.to_string().contains("new Widget(...)"));
    }

    #[test]
    fn test_class_not_found_messages() {
        let named = ClassReadError::ClassNotFound {
            path: PathBuf::from("a.ts"),
            class_name: Some("Widget".to_string()),
        };
        let any = ClassReadError::ClassNotFound {
            path: PathBuf::from("a.ts"),
            class_name: None,
        };
        assert_eq!(named.to_string(), "a.ts: class `Widget` not found");
        assert_eq!(any.to_string(), "a.ts: no class declaration found");
    }

    #[test]
    fn test_errors_work_with_anyhow() {
        let err: anyhow::Error = PatchError::Overlapping { first: 1, second: 3 }.into();
        assert_eq!(err.to_string(), "edits starting at 1 and 3 overlap");
    }
}
