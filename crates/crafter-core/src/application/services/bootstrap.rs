//! Bootstrap orchestrator - top-level sequencing of the two phases.
//!
//! `plan` decides which phases run and resolves their configuration;
//! `execute` performs them, skeleton first. The split lets the CLI display
//! the resolved execution plan (and implement `--dry-run`) between the two.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FoundryEngine, TemplateSource},
        services::{ConfigResolver, ScaffoldWalker},
    },
    domain::{FoundryInputs, FoundryOverrides, PROJECT_DESCRIPTOR, ScaffoldConfig, SkeletonOverrides},
    error::CrafterResult,
};

/// Explicit phase selector. Absent means "run both".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Skeleton,
    Foundry,
}

/// Everything the caller supplies for one bootstrap run.
#[derive(Debug, Clone, Default)]
pub struct BootstrapRequest {
    pub phase: Option<Phase>,
    pub skeleton: SkeletonOverrides,
    pub foundry: FoundryOverrides,
    pub config_file: Option<PathBuf>,
}

impl BootstrapRequest {
    fn runs_skeleton(&self) -> bool {
        self.phase != Some(Phase::Foundry)
    }

    fn runs_foundry(&self) -> bool {
        self.phase != Some(Phase::Skeleton)
    }
}

/// Fully resolved execution plan: a phase is present iff it will run.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub skeleton: Option<ScaffoldConfig>,
    pub foundry: Option<FoundryInputs>,
}

/// Sequences config resolution, skeleton generation, and the foundry
/// handoff. Any phase failure propagates with its original cause intact;
/// nothing is retried.
pub struct BootstrapOrchestrator {
    resolver: ConfigResolver,
    walker: ScaffoldWalker,
    source: Box<dyn TemplateSource>,
    foundry: Option<Box<dyn FoundryEngine>>,
    base_dir: PathBuf,
}

impl BootstrapOrchestrator {
    /// `base_dir` is the working directory the output tree is rooted in and
    /// where the project descriptor is looked up for foundry-only runs.
    pub fn new(
        resolver: ConfigResolver,
        walker: ScaffoldWalker,
        source: Box<dyn TemplateSource>,
        foundry: Option<Box<dyn FoundryEngine>>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resolver,
            walker,
            source,
            foundry,
            base_dir: base_dir.into(),
        }
    }

    /// Decide the phases and resolve their configuration.
    ///
    /// All validation happens here, before any filesystem mutation: a plan
    /// that resolves successfully leaves no partial output if never
    /// executed.
    #[instrument(skip_all)]
    pub fn plan(&mut self, request: BootstrapRequest) -> CrafterResult<ExecutionPlan> {
        let run_skeleton = request.runs_skeleton();
        let mut run_foundry = request.runs_foundry();

        // Generating into an existing project only makes sense from its root.
        if request.phase == Some(Phase::Foundry)
            && !self.base_dir.join(PROJECT_DESCRIPTOR).is_file()
        {
            return Err(ApplicationError::NoProjectDescriptor {
                descriptor: PROJECT_DESCRIPTOR,
            }
            .into());
        }

        if run_foundry && self.foundry.is_none() {
            if request.phase == Some(Phase::Foundry) {
                return Err(ApplicationError::FoundryUnavailable.into());
            }
            warn!("Foundry engine not available, skipping foundry phase");
            run_foundry = false;
        }

        info!(skeleton = run_skeleton, foundry = run_foundry, "Execution plan");

        let skeleton = if run_skeleton {
            Some(self.resolver.resolve_skeleton(request.skeleton)?)
        } else {
            None
        };

        let foundry = if run_foundry {
            let inputs = self
                .resolver
                .resolve_foundry(request.foundry, request.config_file.as_deref())?;
            let inputs = match &skeleton {
                Some(config) => inputs.for_project(&config.project_name, false),
                None => inputs.for_project(working_dir_name(&self.base_dir), true),
            };
            Some(inputs)
        } else {
            None
        };

        Ok(ExecutionPlan { skeleton, foundry })
    }

    /// Run the planned phases: skeleton first, then the foundry handoff.
    #[instrument(skip_all)]
    pub fn execute(&self, plan: &ExecutionPlan) -> CrafterResult<()> {
        if let Some(config) = &plan.skeleton {
            info!(project = %config.project_name, "Starting skeleton generation");
            let output_root = self.base_dir.join(&config.project_name);
            // The tree handle owns any mounted archive; dropping it at the
            // end of this scope closes the archive even when the walk fails.
            let tree = self.source.open()?;
            self.walker.walk(tree.as_ref(), config, &output_root)?;
            info!("Skeleton generation completed");
        }

        if let Some(inputs) = &plan.foundry {
            let engine = self
                .foundry
                .as_ref()
                .ok_or(ApplicationError::FoundryUnavailable)?;
            info!(tables = %inputs.tables, "Starting foundry generation");
            engine.generate(inputs)?;
            info!("Foundry generation completed");
        }

        Ok(())
    }
}

/// Foundry-only runs inherit the project name from the directory they are
/// executed in.
fn working_dir_name(base_dir: &Path) -> String {
    base_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use crate::application::ports::{
        Filesystem, InteractivityProbe, MockFoundryEngine, Prompter, TemplateRenderer,
        TemplateTree, TreeEntry,
    };
    use crate::error::CrafterError;

    // ── Test doubles ──────────────────────────────────────────────────────

    struct NonInteractive;

    impl InteractivityProbe for NonInteractive {
        fn is_interactive(&self) -> bool {
            false
        }
    }

    struct NoPrompts;

    impl Prompter for NoPrompts {
        fn read_line(&mut self, _prompt: &str) -> CrafterResult<String> {
            panic!("prompting not expected in this test")
        }
    }

    struct PassThroughRenderer;

    impl TemplateRenderer for PassThroughRenderer {
        fn render(&self, template: &str, _: &BTreeMap<String, String>) -> CrafterResult<String> {
            Ok(template.to_string())
        }
    }

    #[derive(Default)]
    struct RecordingFilesystem {
        writes: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl Filesystem for RecordingFilesystem {
        fn create_dir_all(&self, _: &Path) -> CrafterResult<()> {
            Ok(())
        }
        fn write_file(&self, path: &Path, _: &[u8]) -> CrafterResult<()> {
            self.writes.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
        fn exists(&self, _: &Path) -> bool {
            false
        }
    }

    struct StaticTree(Vec<TreeEntry>);

    impl TemplateTree for StaticTree {
        fn entries(&self) -> CrafterResult<Vec<TreeEntry>> {
            Ok(self.0.clone())
        }
        fn read(&self, _: &str) -> CrafterResult<Vec<u8>> {
            Ok(b"content".to_vec())
        }
    }

    struct StaticSource {
        entries: Vec<TreeEntry>,
        opened: Rc<RefCell<usize>>,
    }

    impl TemplateSource for StaticSource {
        fn open(&self) -> CrafterResult<Box<dyn TemplateTree>> {
            *self.opened.borrow_mut() += 1;
            Ok(Box::new(StaticTree(self.entries.clone())))
        }
    }

    fn orchestrator(
        base_dir: &Path,
        foundry: Option<Box<dyn FoundryEngine>>,
    ) -> (BootstrapOrchestrator, Arc<Mutex<Vec<PathBuf>>>, Rc<RefCell<usize>>) {
        let resolver = ConfigResolver::new(Box::new(NonInteractive), Box::new(NoPrompts));
        let fs = RecordingFilesystem::default();
        let writes = Arc::clone(&fs.writes);
        let walker = ScaffoldWalker::new(Box::new(PassThroughRenderer), Box::new(fs));
        let opened = Rc::new(RefCell::new(0));
        let source = StaticSource {
            entries: vec![TreeEntry {
                relative_path: "pom.xml.ftl".into(),
                is_dir: false,
            }],
            opened: Rc::clone(&opened),
        };
        (
            BootstrapOrchestrator::new(resolver, walker, Box::new(source), foundry, base_dir),
            writes,
            opened,
        )
    }

    fn skeleton_overrides() -> SkeletonOverrides {
        SkeletonOverrides {
            group_id: Some("com.example".into()),
            project_name: Some("demo".into()),
            version: None,
            base_package: Some("com.example.demo".into()),
            description: None,
        }
    }

    fn foundry_overrides() -> FoundryOverrides {
        FoundryOverrides {
            base_package: Some("com.example.demo".into()),
            url: Some("jdbc:mysql://localhost/db".into()),
            driver: Some("d.Driver".into()),
            username: Some("root".into()),
            password: None,
            tables: Some("orders".into()),
            overwrite: Some(false),
        }
    }

    // ── plan ──────────────────────────────────────────────────────────────

    #[test]
    fn default_runs_both_phases() {
        let dir = tempfile::tempdir().unwrap();
        let engine = MockFoundryEngine::new();
        let (mut orch, _, _) = orchestrator(dir.path(), Some(Box::new(engine)));
        let plan = orch
            .plan(BootstrapRequest {
                phase: None,
                skeleton: skeleton_overrides(),
                foundry: foundry_overrides(),
                config_file: None,
            })
            .unwrap();
        assert!(plan.skeleton.is_some());
        assert!(plan.foundry.is_some());
    }

    #[test]
    fn skeleton_selector_excludes_foundry() {
        let dir = tempfile::tempdir().unwrap();
        let (mut orch, _, _) = orchestrator(dir.path(), None);
        let plan = orch
            .plan(BootstrapRequest {
                phase: Some(Phase::Skeleton),
                skeleton: skeleton_overrides(),
                ..Default::default()
            })
            .unwrap();
        assert!(plan.skeleton.is_some());
        assert!(plan.foundry.is_none());
    }

    #[test]
    fn foundry_only_requires_project_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let engine = MockFoundryEngine::new();
        let (mut orch, _, _) = orchestrator(dir.path(), Some(Box::new(engine)));
        let result = orch.plan(BootstrapRequest {
            phase: Some(Phase::Foundry),
            foundry: foundry_overrides(),
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(CrafterError::Application(
                ApplicationError::NoProjectDescriptor { .. }
            ))
        ));
    }

    #[test]
    fn foundry_only_inherits_directory_name_and_steps_in() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_DESCRIPTOR), "<project/>").unwrap();
        let engine = MockFoundryEngine::new();
        let (mut orch, _, _) = orchestrator(dir.path(), Some(Box::new(engine)));
        let plan = orch
            .plan(BootstrapRequest {
                phase: Some(Phase::Foundry),
                foundry: foundry_overrides(),
                ..Default::default()
            })
            .unwrap();
        let inputs = plan.foundry.unwrap();
        assert!(inputs.step_in);
        assert_eq!(
            inputs.project_name,
            dir.path().file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn both_phases_share_the_skeleton_project_name() {
        let dir = tempfile::tempdir().unwrap();
        let engine = MockFoundryEngine::new();
        let (mut orch, _, _) = orchestrator(dir.path(), Some(Box::new(engine)));
        let plan = orch
            .plan(BootstrapRequest {
                phase: None,
                skeleton: skeleton_overrides(),
                foundry: foundry_overrides(),
                config_file: None,
            })
            .unwrap();
        let inputs = plan.foundry.unwrap();
        assert_eq!(inputs.project_name, "demo");
        assert!(!inputs.step_in);
    }

    #[test]
    fn missing_engine_skips_implicit_foundry_but_fails_explicit() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_DESCRIPTOR), "<project/>").unwrap();

        let (mut orch, _, _) = orchestrator(dir.path(), None);
        let plan = orch
            .plan(BootstrapRequest {
                phase: None,
                skeleton: skeleton_overrides(),
                foundry: foundry_overrides(),
                config_file: None,
            })
            .unwrap();
        assert!(plan.foundry.is_none(), "implicit foundry silently skipped");

        let (mut orch, _, _) = orchestrator(dir.path(), None);
        let result = orch.plan(BootstrapRequest {
            phase: Some(Phase::Foundry),
            foundry: foundry_overrides(),
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(CrafterError::Application(ApplicationError::FoundryUnavailable))
        ));
    }

    // ── execute ───────────────────────────────────────────────────────────

    #[test]
    fn execute_walks_skeleton_then_hands_off_to_foundry() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = MockFoundryEngine::new();
        engine
            .expect_generate()
            .withf(|inputs| inputs.project_name == "demo" && inputs.tables == "orders")
            .times(1)
            .returning(|_| Ok(()));

        let (mut orch, writes, opened) = orchestrator(dir.path(), Some(Box::new(engine)));
        let plan = orch
            .plan(BootstrapRequest {
                phase: None,
                skeleton: skeleton_overrides(),
                foundry: foundry_overrides(),
                config_file: None,
            })
            .unwrap();
        orch.execute(&plan).unwrap();

        assert_eq!(*opened.borrow(), 1, "template root opened once");
        let writes = writes.lock().unwrap();
        assert_eq!(writes.as_slice(), [dir.path().join("demo/pom.xml")]);
    }

    #[test]
    fn foundry_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = MockFoundryEngine::new();
        engine.expect_generate().returning(|_| {
            Err(ApplicationError::FoundryFailed {
                reason: "connection refused".into(),
            }
            .into())
        });

        let (mut orch, _, _) = orchestrator(dir.path(), Some(Box::new(engine)));
        let plan = orch
            .plan(BootstrapRequest {
                phase: None,
                skeleton: skeleton_overrides(),
                foundry: foundry_overrides(),
                config_file: None,
            })
            .unwrap();
        let err = orch.execute(&plan).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
