//! Static checks for Linvis scripts
//!
//! The validator walks a script without executing it and keeps track of which
//! structure is active and what kind it has, so it can point out statements
//! that would fail before anything runs.

use std::collections::HashMap;

use crate::parser::{Command, Script, StructureCommand, StructureKind};
use crate::workspace::MAIN_STRUCTURE;

/// Problem found while validating a script
#[derive(Debug, Clone)]
pub struct ScriptValidationError {
    /// 1-based statement number
    pub statement: Option<usize>,
    pub message: String,
    pub severity: ValidationSeverity,
}

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for ScriptValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            ValidationSeverity::Error => "ERROR",
            ValidationSeverity::Warning => "WARNING",
        };
        if let Some(statement) = self.statement {
            write!(f, "{} (statement {}): {}", prefix, statement, self.message)
        } else {
            write!(f, "{}: {}", prefix, self.message)
        }
    }
}

/// Validation options
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Kind of the `main` structure the script starts on
    pub main_kind: StructureKind,
    /// Report unknown structure names as errors instead of warnings
    pub strict_names: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            main_kind: StructureKind::Array,
            strict_names: false,
        }
    }
}

/// Structures known at some point of the script
struct Tracker {
    kinds: HashMap<String, StructureKind>,
    /// `None` once the active structure can no longer be determined
    active: Option<String>,
}

impl Tracker {
    fn new(main_kind: StructureKind) -> Self {
        let mut kinds = HashMap::new();
        kinds.insert(MAIN_STRUCTURE.to_string(), main_kind);
        Self {
            kinds,
            active: Some(MAIN_STRUCTURE.to_string()),
        }
    }

    fn active_kind(&self) -> Option<(&str, StructureKind)> {
        let name = self.active.as_deref()?;
        self.kinds.get(name).map(|kind| (name, *kind))
    }
}

/// Validate a script against the kinds of the structures it touches
pub fn validate_script(script: &Script, options: &ValidationOptions) -> Vec<ScriptValidationError> {
    let mut errors = Vec::new();
    let mut tracker = Tracker::new(options.main_kind);

    for (i, cmd) in script.statements.iter().enumerate() {
        validate_command(cmd, options, &mut tracker, &mut errors, i + 1);
    }

    errors
}

fn validate_command(
    cmd: &Command,
    options: &ValidationOptions,
    tracker: &mut Tracker,
    errors: &mut Vec<ScriptValidationError>,
    statement: usize,
) {
    let unknown_severity = if options.strict_names {
        ValidationSeverity::Error
    } else {
        ValidationSeverity::Warning
    };

    match cmd {
        Command::Structure(StructureCommand::Create(create)) => {
            if tracker.kinds.contains_key(&create.name) {
                errors.push(ScriptValidationError {
                    statement: Some(statement),
                    message: format!("Structure '{}' already exists", create.name),
                    severity: ValidationSeverity::Error,
                });
                return;
            }
            tracker.kinds.insert(create.name.clone(), create.kind);
            tracker.active = Some(create.name.clone());
        }

        Command::Structure(StructureCommand::Use(name)) => {
            if tracker.kinds.contains_key(name) {
                tracker.active = Some(name.clone());
            } else {
                errors.push(ScriptValidationError {
                    statement: Some(statement),
                    message: format!("USE of unknown structure '{}'", name),
                    severity: unknown_severity,
                });
                tracker.active = None;
            }
        }

        Command::Structure(StructureCommand::Drop(name)) => {
            if name == MAIN_STRUCTURE {
                errors.push(ScriptValidationError {
                    statement: Some(statement),
                    message: "The main structure cannot be dropped".to_string(),
                    severity: ValidationSeverity::Error,
                });
            } else if tracker.kinds.remove(name).is_none() {
                errors.push(ScriptValidationError {
                    statement: Some(statement),
                    message: format!("DROP of unknown structure '{}'", name),
                    severity: unknown_severity,
                });
            } else if tracker.active.as_deref() == Some(name.as_str()) {
                tracker.active = Some(MAIN_STRUCTURE.to_string());
            }
        }

        Command::Operation(op) => {
            if let Some((name, kind)) = tracker.active_kind() {
                if !op.supported_by(kind) {
                    errors.push(ScriptValidationError {
                        statement: Some(statement),
                        message: format!(
                            "{} is not supported by {} '{}'",
                            op.keyword(),
                            kind,
                            name
                        ),
                        severity: ValidationSeverity::Error,
                    });
                }
            }
        }

        // EXPLAIN never runs its statement; LIST and SHOW HISTORY always succeed
        Command::Structure(StructureCommand::List) | Command::ShowHistory | Command::Explain(_) => {}
    }
}

/// Check if a script has any validation errors (not just warnings)
pub fn has_errors(errors: &[ScriptValidationError]) -> bool {
    errors
        .iter()
        .any(|e| e.severity == ValidationSeverity::Error)
}

/// Check if a script has any validation warnings
pub fn has_warnings(errors: &[ScriptValidationError]) -> bool {
    errors
        .iter()
        .any(|e| e.severity == ValidationSeverity::Warning)
}
