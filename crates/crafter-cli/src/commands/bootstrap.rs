//! Implementation of the bootstrap run.
//!
//! Responsibility: translate CLI arguments into a `BootstrapRequest`, wire
//! the adapters into the orchestrator, display the execution plan, and run
//! it. No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crafter_adapters::{
    ForgeCommand, LocalFilesystem, SimpleRenderer, StdinProbe, TemplateOrigin, TtyPrompter,
};
use crafter_core::{
    application::{
        BootstrapOrchestrator, BootstrapRequest, ConfigResolver, ExecutionPlan, ScaffoldWalker,
        ports::FoundryEngine,
    },
    domain::{ARCHETYPE_ROOT, FoundryOverrides, SkeletonOverrides},
};

use crate::{
    cli::Cli,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the bootstrap.
///
/// Sequence:
/// 1. Locate and classify the template root
/// 2. Convert CLI args to a `BootstrapRequest`
/// 3. Resolve the execution plan (may prompt interactively)
/// 4. Display the plan; early-exit if `--dry-run`
/// 5. Run the planned phases
#[instrument(skip_all)]
pub fn execute(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let Cli {
        phase,
        bootstrap: args,
        global: _,
    } = cli;

    // 1. Template root
    let template_root = locate_template_root(args.template_root.as_deref(), &config);
    let origin = TemplateOrigin::detect(&template_root)?;
    debug!(root = %template_root.display(), origin = ?origin, "Template root resolved");

    let base_dir = std::env::current_dir()?;

    // 2. Request
    let request = BootstrapRequest {
        phase: phase.map(Into::into),
        skeleton: SkeletonOverrides {
            group_id: args.group_id,
            project_name: args.artifact_id,
            version: args.project_version,
            base_package: args.package.clone(),
            description: args.description,
        },
        foundry: FoundryOverrides {
            base_package: args.package,
            url: args.url,
            driver: args.driver,
            username: args.username,
            password: args.password,
            tables: args.tables,
            overwrite: args.overwrite,
        },
        config_file: args.config_file,
    };

    // 3. Wire adapters and resolve the plan
    let resolver = ConfigResolver::new(Box::new(StdinProbe), Box::new(TtyPrompter));
    let walker = ScaffoldWalker::new(
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    let foundry = ForgeCommand::discover().map(|e| Box::new(e) as Box<dyn FoundryEngine>);
    // An explicit `foundry` phase without an engine fails in plan(); the
    // implicit combined run degrades to skeleton-only, so tell the user.
    if foundry.is_none() && phase.is_none() {
        output.warning("Foundry generator not found on PATH, skipping the foundry phase")?;
    }
    let mut orchestrator = BootstrapOrchestrator::new(
        resolver,
        walker,
        Box::new(origin),
        foundry,
        base_dir.clone(),
    );

    let plan = orchestrator.plan(request)?;

    // 4. Display the plan
    show_plan(&plan, &base_dir, &output)?;

    if args.dry_run {
        output.info("Dry run: nothing was generated")?;
        return Ok(());
    }

    // 5. Run
    info!("Bootstrap started");
    orchestrator.execute(&plan)?;
    info!("Bootstrap completed");

    output.banner()?;
    output.success("Bootstrap completed")?;

    if let Some(skeleton) = &plan.skeleton {
        if !output.is_quiet() {
            output.print("")?;
            output.print("Next steps:")?;
            output.print(&format!("  cd {}", skeleton.project_name))?;
        }
    }

    Ok(())
}

// ── Template root location ────────────────────────────────────────────────────

/// Pick the template root: flag/env > app config > conventional locations.
///
/// The fallback is the conventional name in the working directory even when
/// nothing exists there; origin detection then reports it as not found.
fn locate_template_root(flag: Option<&Path>, config: &AppConfig) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Some(path) = &config.templates.local_path {
        return path.clone();
    }
    default_candidates()
        .into_iter()
        .find(|c| c.exists())
        .unwrap_or_else(|| PathBuf::from(ARCHETYPE_ROOT))
}

/// Conventional locations, in precedence order: working directory first,
/// then next to the installed binary.
fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![
        PathBuf::from(ARCHETYPE_ROOT),
        PathBuf::from(format!("{ARCHETYPE_ROOT}.zip")),
    ];
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join(ARCHETYPE_ROOT));
            candidates.push(dir.join(format!("{ARCHETYPE_ROOT}.zip")));
        }
    }
    candidates
}

// ── Plan display ──────────────────────────────────────────────────────────────

fn show_plan(plan: &ExecutionPlan, base_dir: &Path, out: &OutputManager) -> CliResult<()> {
    out.banner()?;
    out.header("Execution plan")?;

    if let Some(skeleton) = &plan.skeleton {
        out.print("")?;
        out.header("Skeleton")?;
        out.kv("Group ID", &skeleton.group_id)?;
        out.kv("Artifact ID", &skeleton.project_name)?;
        out.kv("Version", &skeleton.version)?;
        out.kv("Base Package", &skeleton.base_package)?;
        out.kv("Description", &skeleton.description)?;
        out.kv(
            "Output",
            &base_dir.join(&skeleton.project_name).display().to_string(),
        )?;
    }

    if let Some(foundry) = &plan.foundry {
        out.print("")?;
        out.header("Foundry")?;
        out.kv("Project", &foundry.project_name)?;
        out.kv("Base Package", &foundry.base_package)?;
        out.kv("URL", &foundry.url)?;
        out.kv("Driver", &foundry.driver)?;
        out.kv("Username", &foundry.username)?;
        out.kv("Tables", &foundry.tables)?;
        out.kv("Overwrite", if foundry.overwrite { "yes" } else { "no" })?;
    }

    out.banner()?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_app_config() {
        let config = AppConfig {
            templates: crate::config::TemplateConfig {
                local_path: Some(PathBuf::from("/opt/templates")),
            },
            ..Default::default()
        };
        let root = locate_template_root(Some(Path::new("/from/flag")), &config);
        assert_eq!(root, PathBuf::from("/from/flag"));
    }

    #[test]
    fn app_config_beats_conventional_locations() {
        let config = AppConfig {
            templates: crate::config::TemplateConfig {
                local_path: Some(PathBuf::from("/opt/templates")),
            },
            ..Default::default()
        };
        let root = locate_template_root(None, &config);
        assert_eq!(root, PathBuf::from("/opt/templates"));
    }

    #[test]
    fn fallback_is_the_conventional_name() {
        // With no flag, no config, and (almost certainly) no ./archetype in
        // the test working directory, the conventional name comes back so
        // origin detection can report it as missing.
        let root = locate_template_root(None, &AppConfig::default());
        assert!(root.to_string_lossy().contains(ARCHETYPE_ROOT));
    }
}
