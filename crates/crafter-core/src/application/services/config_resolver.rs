//! Three-tier configuration resolution.
//!
//! Precedence, strict: explicit field values > optional on-disk key/value
//! file > interactive prompts. Prompting only happens when the process is
//! attached to a terminal (decided by the injected [`InteractivityProbe`])
//! and no config file was loaded; otherwise missing required fields fail
//! validation before any filesystem mutation.

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{InteractivityProbe, Prompter},
    },
    domain::{
        DEFAULT_VERSION, DomainError, FoundryInputs, FoundryOverrides, ScaffoldConfig,
        SkeletonOverrides, parse_bool_token, parse_properties,
    },
    error::CrafterResult,
};

// Recognized config-file keys. Anything else in the file is ignored.
const KEY_PACKAGE: &str = "archetype.package";
const KEY_URL: &str = "database.url";
const KEY_DRIVER: &str = "database.driver";
const KEY_USERNAME: &str = "database.username";
const KEY_PASSWORD: &str = "database.password";
const KEY_TABLES: &str = "database.tables";
const KEY_OVERWRITE: &str = "tables.overwrite";

/// Resolves and validates per-phase configuration.
pub struct ConfigResolver {
    probe: Box<dyn InteractivityProbe>,
    prompter: Box<dyn Prompter>,
}

impl ConfigResolver {
    pub fn new(probe: Box<dyn InteractivityProbe>, prompter: Box<dyn Prompter>) -> Self {
        Self { probe, prompter }
    }

    // ── Skeleton phase ────────────────────────────────────────────────────

    /// Resolve the skeleton configuration.
    ///
    /// Fast path: when every field (optional ones included) is already
    /// explicit, no prompting happens even on a terminal.
    #[instrument(skip_all)]
    pub fn resolve_skeleton(&mut self, explicit: SkeletonOverrides) -> CrafterResult<ScaffoldConfig> {
        let explicit = explicit.normalized();

        if explicit.is_complete() || !self.probe.is_interactive() {
            return validate_skeleton(explicit);
        }

        let group_id = self.non_blank_input("Group ID [required]: ", explicit.group_id)?;
        let project_name = self.non_blank_input("Artifact ID [required]: ", explicit.project_name)?;
        let version = self.optional_input(
            "Version [optional, default 1.0.0]: ",
            explicit.version,
            DEFAULT_VERSION,
        )?;
        let base_package = self.non_blank_input("Base Package [required]: ", explicit.base_package)?;
        let description = self.optional_input("Description [optional]: ", explicit.description, "")?;

        Ok(ScaffoldConfig {
            group_id,
            project_name,
            version,
            base_package,
            description,
        })
    }

    // ── Foundry phase ─────────────────────────────────────────────────────

    /// Resolve the foundry inputs.
    ///
    /// A supplied `config_file` must exist and be a regular file; its values
    /// fill only fields the explicit tier left blank, and loading it forces
    /// strict validation even on a terminal. Project identity is attached
    /// later by the orchestrator via [`FoundryInputs::for_project`].
    #[instrument(skip_all)]
    pub fn resolve_foundry(
        &mut self,
        explicit: FoundryOverrides,
        config_file: Option<&Path>,
    ) -> CrafterResult<FoundryInputs> {
        let mut explicit = explicit.normalized();

        let file_loaded = match config_file {
            Some(path) => {
                merge_config_file(&mut explicit, path)?;
                true
            }
            None => false,
        };

        if file_loaded || !self.probe.is_interactive() || explicit.is_complete() {
            return validate_foundry(explicit);
        }

        let base_package = self.non_blank_input("Base Package [required]: ", explicit.base_package)?;
        let url = self.non_blank_input("Database URL [required]: ", explicit.url)?;
        let driver = self.non_blank_input("Driver Class [required]: ", explicit.driver)?;
        let username = self.non_blank_input("Username [required]: ", explicit.username)?;
        let password = self.optional_input("Password [optional]: ", explicit.password, "")?;
        let tables = self.non_blank_input("Table Names [required]: ", explicit.tables)?;
        let overwrite = self.boolean_input(
            "Overwrite existing files? (y/N, default N): ",
            explicit.overwrite,
            false,
        )?;

        Ok(FoundryInputs {
            project_name: String::new(),
            step_in: false,
            base_package,
            url,
            driver,
            username,
            password: Some(password).filter(|p| !p.is_empty()),
            tables,
            overwrite,
        })
    }

    // ── Prompt helpers ────────────────────────────────────────────────────

    /// Keep prompting until a non-blank value arrives. An already-present
    /// value short-circuits without touching the terminal.
    fn non_blank_input(&mut self, prompt: &str, current: Option<String>) -> CrafterResult<String> {
        if let Some(value) = current {
            return Ok(value);
        }
        loop {
            let input = self.prompter.read_line(prompt)?;
            let input = input.trim();
            if !input.is_empty() {
                return Ok(input.to_string());
            }
        }
    }

    /// Prompt once; blank means "use the default".
    fn optional_input(
        &mut self,
        prompt: &str,
        current: Option<String>,
        default: &str,
    ) -> CrafterResult<String> {
        if let Some(value) = current {
            return Ok(value);
        }
        let input = self.prompter.read_line(prompt)?;
        let input = input.trim();
        Ok(if input.is_empty() {
            default.to_string()
        } else {
            input.to_string()
        })
    }

    /// Prompt for a boolean. Blank yields the default; an unrecognized token
    /// re-prompts instead of defaulting or failing, so the loop only
    /// terminates on a recognized token or blank input.
    fn boolean_input(
        &mut self,
        prompt: &str,
        current: Option<bool>,
        default: bool,
    ) -> CrafterResult<bool> {
        if let Some(value) = current {
            return Ok(value);
        }
        loop {
            let input = self.prompter.read_line(prompt)?;
            let input = input.trim();
            if input.is_empty() {
                return Ok(default);
            }
            if let Some(value) = parse_bool_token(input) {
                return Ok(value);
            }
        }
    }
}

// ── Validation (non-interactive path) ─────────────────────────────────────────

fn require(value: Option<String>, field: &'static str) -> CrafterResult<String> {
    value.ok_or_else(|| DomainError::MissingRequiredField { field }.into())
}

fn validate_skeleton(explicit: SkeletonOverrides) -> CrafterResult<ScaffoldConfig> {
    Ok(ScaffoldConfig {
        group_id: require(explicit.group_id, "groupId")?,
        project_name: require(explicit.project_name, "projectName")?,
        version: explicit.version.unwrap_or_else(|| DEFAULT_VERSION.into()),
        base_package: require(explicit.base_package, "basePackage")?,
        description: explicit.description.unwrap_or_default(),
    })
}

fn validate_foundry(explicit: FoundryOverrides) -> CrafterResult<FoundryInputs> {
    Ok(FoundryInputs {
        project_name: String::new(),
        step_in: false,
        base_package: require(explicit.base_package, "basePackage")?,
        url: require(explicit.url, "url")?,
        driver: require(explicit.driver, "driver")?,
        username: require(explicit.username, "username")?,
        // Some data sources require no password.
        password: explicit.password,
        tables: require(explicit.tables, "tables")?,
        overwrite: explicit.overwrite.unwrap_or(false),
    })
}

// ── Config-file tier ──────────────────────────────────────────────────────────

/// Load the key/value file at `path` and fill every recognized field the
/// explicit tier left blank. Explicit always wins over the file.
fn merge_config_file(explicit: &mut FoundryOverrides, path: &Path) -> CrafterResult<()> {
    if !path.is_file() {
        return Err(ApplicationError::ConfigFile {
            path: path.to_path_buf(),
            cause: "not found or not a regular file".into(),
        }
        .into());
    }

    info!(path = %path.display(), "Loading config file");

    let text = std::fs::read_to_string(path).map_err(|e| ApplicationError::ConfigFile {
        path: path.to_path_buf(),
        cause: e.to_string(),
    })?;
    let props = parse_properties(&text);

    let fill = |slot: &mut Option<String>, key: &str| {
        if slot.is_none() {
            *slot = props.get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        }
    };

    fill(&mut explicit.base_package, KEY_PACKAGE);
    fill(&mut explicit.url, KEY_URL);
    fill(&mut explicit.driver, KEY_DRIVER);
    fill(&mut explicit.username, KEY_USERNAME);
    fill(&mut explicit.password, KEY_PASSWORD);
    fill(&mut explicit.tables, KEY_TABLES);

    if explicit.overwrite.is_none() {
        // File values are forgiving: the truthy set parses to true and
        // anything else, including typos, to false.
        explicit.overwrite = props
            .get(KEY_OVERWRITE)
            .map(|v| parse_bool_token(v) == Some(true));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::Write as _;
    use std::rc::Rc;

    use crate::domain::error::DomainError;
    use crate::error::CrafterError;

    struct FixedProbe(bool);

    impl InteractivityProbe for FixedProbe {
        fn is_interactive(&self) -> bool {
            self.0
        }
    }

    /// Prompter fed from a fixed script, recording every prompt it shows.
    struct ScriptedPrompter {
        responses: VecDeque<String>,
        shown: Rc<RefCell<Vec<String>>>,
    }

    impl ScriptedPrompter {
        fn new(responses: &[&str]) -> (Self, Rc<RefCell<Vec<String>>>) {
            let shown = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    responses: responses.iter().map(|s| s.to_string()).collect(),
                    shown: Rc::clone(&shown),
                },
                shown,
            )
        }
    }

    impl Prompter for ScriptedPrompter {
        fn read_line(&mut self, prompt: &str) -> CrafterResult<String> {
            self.shown.borrow_mut().push(prompt.to_string());
            self.responses.pop_front().ok_or_else(|| {
                ApplicationError::PromptFailed {
                    reason: "script exhausted".into(),
                }
                .into()
            })
        }
    }

    fn resolver(interactive: bool, responses: &[&str]) -> (ConfigResolver, Rc<RefCell<Vec<String>>>) {
        let (prompter, shown) = ScriptedPrompter::new(responses);
        (
            ConfigResolver::new(Box::new(FixedProbe(interactive)), Box::new(prompter)),
            shown,
        )
    }

    fn skeleton_full() -> SkeletonOverrides {
        SkeletonOverrides {
            group_id: Some("com.example".into()),
            project_name: Some("demo".into()),
            version: Some("2.0.0".into()),
            base_package: Some("com.example.demo".into()),
            description: Some("a demo".into()),
        }
    }

    fn foundry_full() -> FoundryOverrides {
        FoundryOverrides {
            base_package: Some("com.example.demo".into()),
            url: Some("jdbc:mysql://localhost:3306/test".into()),
            driver: Some("com.mysql.cj.jdbc.Driver".into()),
            username: Some("root".into()),
            password: Some("secret".into()),
            tables: Some("orders,users".into()),
            overwrite: Some(true),
        }
    }

    fn assert_missing(result: CrafterResult<impl std::fmt::Debug>, field: &str) {
        match result {
            Err(CrafterError::Domain(DomainError::MissingRequiredField { field: f })) => {
                assert_eq!(f, field)
            }
            other => panic!("expected MissingRequiredField({field}), got {other:?}"),
        }
    }

    // ── skeleton: non-interactive ─────────────────────────────────────────

    #[test]
    fn non_interactive_requires_each_skeleton_field() {
        for (field, strip) in [
            ("groupId", 0usize),
            ("projectName", 1),
            ("basePackage", 2),
        ] {
            let mut overrides = skeleton_full();
            match strip {
                0 => overrides.group_id = None,
                1 => overrides.project_name = None,
                _ => overrides.base_package = None,
            }
            let (mut r, _) = resolver(false, &[]);
            assert_missing(r.resolve_skeleton(overrides), field);
        }
    }

    #[test]
    fn blank_after_trim_counts_as_absent() {
        let mut overrides = skeleton_full();
        overrides.group_id = Some("   ".into());
        let (mut r, _) = resolver(false, &[]);
        assert_missing(r.resolve_skeleton(overrides), "groupId");
    }

    #[test]
    fn optional_skeleton_fields_default() {
        let mut overrides = skeleton_full();
        overrides.version = None;
        overrides.description = None;
        let (mut r, _) = resolver(false, &[]);
        let config = r.resolve_skeleton(overrides).unwrap();
        assert_eq!(config.version, DEFAULT_VERSION);
        assert_eq!(config.description, "");
    }

    // ── skeleton: interactive ─────────────────────────────────────────────

    #[test]
    fn complete_overrides_skip_prompting_even_interactively() {
        let (mut r, shown) = resolver(true, &[]);
        let config = r.resolve_skeleton(skeleton_full()).unwrap();
        assert_eq!(config.project_name, "demo");
        assert!(shown.borrow().is_empty(), "no prompt expected");
    }

    #[test]
    fn required_prompts_repeat_until_non_blank() {
        let overrides = SkeletonOverrides {
            group_id: None,
            project_name: Some("demo".into()),
            version: Some("1.0.0".into()),
            base_package: Some("a.b".into()),
            description: Some("d".into()),
        };
        let (mut r, shown) = resolver(true, &["", "   ", "com.acme"]);
        let config = r.resolve_skeleton(overrides).unwrap();
        assert_eq!(config.group_id, "com.acme");
        assert_eq!(shown.borrow().len(), 3);
    }

    #[test]
    fn optional_prompts_accept_blank_as_default() {
        let overrides = SkeletonOverrides {
            group_id: Some("com.acme".into()),
            project_name: Some("demo".into()),
            version: None,
            base_package: Some("a.b".into()),
            description: None,
        };
        // one blank answer for version, one for description
        let (mut r, shown) = resolver(true, &["", ""]);
        let config = r.resolve_skeleton(overrides).unwrap();
        assert_eq!(config.version, DEFAULT_VERSION);
        assert_eq!(config.description, "");
        assert_eq!(shown.borrow().len(), 2);
    }

    // ── foundry: precedence and validation ────────────────────────────────

    fn write_config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn explicit_beats_config_file() {
        let file = write_config_file(
            "archetype.package=from.file\n\
             database.url=jdbc:file\n\
             database.driver=file.Driver\n\
             database.username=fileuser\n\
             database.password=filepass\n\
             database.tables=file_table\n\
             tables.overwrite=true\n",
        );
        let (mut r, _) = resolver(true, &[]);
        let inputs = r
            .resolve_foundry(foundry_full(), Some(file.path()))
            .unwrap();
        assert_eq!(inputs.base_package, "com.example.demo");
        assert_eq!(inputs.url, "jdbc:mysql://localhost:3306/test");
        assert_eq!(inputs.username, "root");
        assert_eq!(inputs.password.as_deref(), Some("secret"));
        assert!(inputs.overwrite);
    }

    #[test]
    fn file_fills_blank_fields_only() {
        let file = write_config_file(
            "database.driver=file.Driver\n\
             database.tables=file_table\n\
             ignored.key=whatever\n",
        );
        let mut overrides = foundry_full();
        overrides.driver = None;
        overrides.tables = Some(" explicit_table ".into());
        let (mut r, _) = resolver(false, &[]);
        let inputs = r.resolve_foundry(overrides, Some(file.path())).unwrap();
        assert_eq!(inputs.driver, "file.Driver");
        assert_eq!(inputs.tables, "explicit_table");
    }

    #[test]
    fn loaded_file_forces_validation_even_on_a_terminal() {
        let file = write_config_file("database.url=jdbc:file\n");
        let (mut r, shown) = resolver(true, &[]);
        let result = r.resolve_foundry(FoundryOverrides::default(), Some(file.path()));
        assert_missing(result, "basePackage");
        assert!(shown.borrow().is_empty());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let (mut r, _) = resolver(false, &[]);
        let result = r.resolve_foundry(
            foundry_full(),
            Some(Path::new("/definitely/not/here.properties")),
        );
        assert!(matches!(
            result,
            Err(CrafterError::Application(ApplicationError::ConfigFile { .. }))
        ));
    }

    #[test]
    fn non_interactive_requires_each_foundry_field() {
        for field in ["basePackage", "url", "driver", "username", "tables"] {
            let mut overrides = foundry_full();
            match field {
                "basePackage" => overrides.base_package = None,
                "url" => overrides.url = None,
                "driver" => overrides.driver = None,
                "username" => overrides.username = None,
                _ => overrides.tables = None,
            }
            let (mut r, _) = resolver(false, &[]);
            assert_missing(r.resolve_foundry(overrides, None), field);
        }
    }

    #[test]
    fn password_is_optional_everywhere() {
        let mut overrides = foundry_full();
        overrides.password = None;
        let (mut r, _) = resolver(false, &[]);
        let inputs = r.resolve_foundry(overrides, None).unwrap();
        assert_eq!(inputs.password, None);
    }

    #[test]
    fn overwrite_defaults_to_false() {
        let mut overrides = foundry_full();
        overrides.overwrite = None;
        let (mut r, _) = resolver(false, &[]);
        assert!(!r.resolve_foundry(overrides, None).unwrap().overwrite);
    }

    #[test]
    fn file_overwrite_parses_truthy_set_and_nothing_else() {
        for (value, expected) in [("yes", true), ("TRUE", true), ("1", true), ("banana", false)] {
            let file = write_config_file(&format!("tables.overwrite={value}\n"));
            let mut overrides = foundry_full();
            overrides.overwrite = None;
            let (mut r, _) = resolver(false, &[]);
            let inputs = r.resolve_foundry(overrides, Some(file.path())).unwrap();
            assert_eq!(inputs.overwrite, expected, "value {value:?}");
        }
    }

    // ── foundry: interactive ──────────────────────────────────────────────

    #[test]
    fn interactive_prompts_fill_missing_foundry_fields() {
        let overrides = FoundryOverrides {
            base_package: Some("a.b".into()),
            url: Some("jdbc:mysql://h/db".into()),
            driver: Some("d.Driver".into()),
            username: None,
            password: None,
            tables: None,
            overwrite: None,
        };
        // username, password (blank), tables, overwrite: bad token then "y"
        let (mut r, _) = resolver(true, &["root", "", "orders", "maybe", "y"]);
        let inputs = r.resolve_foundry(overrides, None).unwrap();
        assert_eq!(inputs.username, "root");
        assert_eq!(inputs.password, None);
        assert_eq!(inputs.tables, "orders");
        assert!(inputs.overwrite);
    }

    #[test]
    fn boolean_prompt_blank_uses_phase_default() {
        let mut overrides = foundry_full();
        overrides.overwrite = None;
        let (mut r, _) = resolver(true, &[""]);
        assert!(!r.resolve_foundry(overrides, None).unwrap().overwrite);
    }

    #[test]
    fn complete_foundry_overrides_skip_prompting() {
        let (mut r, shown) = resolver(true, &[]);
        let inputs = r.resolve_foundry(foundry_full(), None).unwrap();
        assert_eq!(inputs.tables, "orders,users");
        assert!(shown.borrow().is_empty());
    }
}
