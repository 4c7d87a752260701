//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::audit::audit_with;
use crate::cli::help::command_name;
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_audit_json, format_audit_text, format_list_json, format_list_text,
    format_migrations_json, format_migrations_text, format_normalized_json,
    format_normalized_text, format_resolved_json, format_resolved_text, format_validation_json,
    format_validation_text,
};
use crate::compat;
use crate::config::{ConfigLoader, GateConfig};
use crate::error::ProfileError;
use crate::migration::{resolve_profiles_dir_with_legacy_fallback, ProfilesDirResolution, StdFs};
use crate::profile::ProfileKind;
use crate::resolver::{parse_yaml, read_profile_file, ProfileResolver};
use crate::validation::{ProfileValidator, ValidationCode, ValidationResult};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a command printed and whether its verdict was positive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub output: String,
    pub ok: bool,
}

impl CommandOutcome {
    fn accepted(output: String) -> Self {
        Self { output, ok: true }
    }

    fn verdict(output: String, ok: bool) -> Self {
        Self { output, ok }
    }
}

/// Runtime context for CLI execution: configuration, active profiles root, and validator.
/// Building it runs the legacy profiles-directory migration.
pub struct RunContext {
    config: GateConfig,
    profiles: ProfilesDirResolution,
    validator: ProfileValidator,
    format: OutputFormat,
    color: bool,
}

impl RunContext {
    /// Create run context from workspace root, optional config file, and optional
    /// profiles-root override.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        profiles_dir: Option<PathBuf>,
    ) -> Result<Self, ProfileError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        config.validate().map_err(|errors| {
            ProfileError::ConfigError(
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

        let (configured_dir, legacy_dir) = config.profiles.resolve_paths(&workspace_root)?;
        let profiles_dir = profiles_dir.unwrap_or(configured_dir);
        let profiles = resolve_profiles_dir_with_legacy_fallback(&profiles_dir, &legacy_dir, &StdFs)?;
        debug!(
            active_dir = %profiles.active_dir.display(),
            used_legacy_fallback = profiles.used_legacy_fallback,
            "Profiles directory resolved"
        );

        let resolver = if config.profiles.index_cache {
            ProfileResolver::with_index(&profiles.active_dir)?
        } else {
            ProfileResolver::new(&profiles.active_dir)?
        };

        Ok(Self {
            config,
            profiles,
            validator: ProfileValidator::new(resolver),
            format: OutputFormat::Text,
            color: std::io::stdout().is_terminal(),
        })
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn profiles_dir(&self) -> &Path {
        &self.profiles.active_dir
    }

    pub fn profiles(&self) -> &ProfilesDirResolution {
        &self.profiles
    }

    fn resolver(&self) -> &ProfileResolver {
        self.validator.resolver()
    }

    fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutcome, ProfileError> {
        let outcome = self.execute_inner(command)?;
        info!(
            command = command_name(command),
            ok = outcome.ok,
            "Command completed"
        );
        Ok(outcome)
    }

    fn execute_inner(&self, command: &Commands) -> Result<CommandOutcome, ProfileError> {
        match command {
            Commands::Validate { kind, file } => self.handle_validate(*kind, file),
            Commands::Check { pipeline } => self.handle_check(pipeline),
            Commands::Resolve { kind, reference } => self.handle_resolve(*kind, reference),
            Commands::List { kind } => self.handle_list(*kind),
            Commands::Normalize { kind, file } => self.handle_normalize(*kind, file),
            Commands::Audit => self.handle_audit(),
            Commands::Migrations => Ok(CommandOutcome::accepted(if self.json() {
                format_migrations_json()
            } else {
                format_migrations_text()
            })),
        }
    }

    fn handle_validate(&self, kind: ProfileKind, file: &Path) -> Result<CommandOutcome, ProfileError> {
        let content = std::fs::read_to_string(file)?;
        let result = match parse_yaml(file, &content) {
            Ok(value) => self.validator.validate(kind, &value),
            Err(e) => {
                debug!(file = %file.display(), error = %e, "Profile file failed to parse");
                ValidationResult::failure(ValidationCode::InvalidYaml)
            }
        };
        let subject = format!("{}:{}", kind, file.display());
        Ok(self.render_verdict(&subject, result))
    }

    fn handle_check(&self, pipeline: &str) -> Result<CommandOutcome, ProfileError> {
        let result = self.validator.validate_pipeline_run(pipeline);
        let subject = format!("pipeline:{}", pipeline);
        Ok(self.render_verdict(&subject, result))
    }

    fn handle_resolve(&self, kind: ProfileKind, reference: &str) -> Result<CommandOutcome, ProfileError> {
        let path = self
            .resolver()
            .resolve(kind, reference)
            .ok_or_else(|| ProfileError::NotFound {
                kind,
                reference: reference.to_string(),
            })?;
        let output = if self.json() {
            format_resolved_json(kind, reference, &path)
        } else {
            format_resolved_text(&path)
        };
        Ok(CommandOutcome::accepted(output))
    }

    fn handle_list(&self, kind: ProfileKind) -> Result<CommandOutcome, ProfileError> {
        let profiles = self.resolver().list(kind);
        let output = if self.json() {
            format_list_json(kind, &profiles)
        } else {
            format_list_text(kind, &profiles)
        };
        Ok(CommandOutcome::accepted(output))
    }

    fn handle_normalize(&self, kind: ProfileKind, file: &Path) -> Result<CommandOutcome, ProfileError> {
        let mut data = read_profile_file(file)?;
        let changed = compat::normalize(kind, &mut data);
        let output = if self.json() {
            format_normalized_json(&data, changed)
        } else {
            format_normalized_text(&data)
        };
        Ok(CommandOutcome::accepted(output))
    }

    fn handle_audit(&self) -> Result<CommandOutcome, ProfileError> {
        let report = audit_with(&self.validator);
        let output = if self.json() {
            format_audit_json(&report)
        } else {
            format_audit_text(&report, self.color)
        };
        Ok(CommandOutcome::verdict(output, report.ok()))
    }

    fn render_verdict(&self, subject: &str, result: ValidationResult) -> CommandOutcome {
        let output = if self.json() {
            format_validation_json(&result)
        } else {
            format_validation_text(subject, &result, self.color)
        };
        CommandOutcome::verdict(output, result.ok)
    }
}
