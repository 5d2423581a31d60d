//! Subprocess bridge to the external foundry generator.

use std::env;
use std::path::PathBuf;
use std::process::Command;

use crafter_core::{
    application::{ApplicationError, ports::FoundryEngine},
    domain::FoundryInputs,
    error::CrafterResult,
};
use tracing::{debug, info};

/// Executable name looked up on PATH when no explicit program is given.
pub const DEFAULT_FORGE_BIN: &str = "crafter-forge";

/// Foundry engine that shells out to the external generator binary.
///
/// The generator owns everything database-side: connecting, introspecting
/// tables, emitting code. This bridge only maps resolved inputs to its
/// command line and treats a non-zero exit as fatal.
pub struct ForgeCommand {
    program: PathBuf,
}

impl ForgeCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Engine bound to the default binary if it is on PATH, `None` otherwise.
    pub fn discover() -> Option<Self> {
        let path = env::var_os("PATH")?;
        for dir in env::split_paths(&path) {
            let candidate = dir.join(forge_file_name());
            if candidate.is_file() {
                debug!(program = %candidate.display(), "Found foundry generator");
                return Some(Self::new(candidate));
            }
        }
        None
    }
}

impl FoundryEngine for ForgeCommand {
    fn generate(&self, inputs: &FoundryInputs) -> CrafterResult<()> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("generate")
            .arg("--project")
            .arg(&inputs.project_name)
            .arg("--package")
            .arg(&inputs.base_package)
            .arg("--url")
            .arg(&inputs.url)
            .arg("--driver")
            .arg(&inputs.driver)
            .arg("--username")
            .arg(&inputs.username)
            .arg("--tables")
            .arg(&inputs.tables);
        if inputs.step_in {
            cmd.arg("--step-in");
        }
        if inputs.overwrite {
            cmd.arg("--overwrite");
        }
        // Credentials stay off the argument list
        if let Some(password) = &inputs.password {
            cmd.env("CRAFTER_FORGE_PASSWORD", password);
        }

        debug!(program = %self.program.display(), "Invoking foundry generator");
        let status = cmd.status().map_err(|e| ApplicationError::FoundryFailed {
            reason: format!("failed to launch {}: {e}", self.program.display()),
        })?;

        if !status.success() {
            return Err(ApplicationError::FoundryFailed {
                reason: format!("{} exited with {status}", self.program.display()),
            }
            .into());
        }

        info!("Foundry generation finished");
        Ok(())
    }
}

fn forge_file_name() -> String {
    if cfg!(windows) {
        format!("{DEFAULT_FORGE_BIN}.exe")
    } else {
        DEFAULT_FORGE_BIN.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_fails_with_launch_error() {
        let engine = ForgeCommand::new("/nonexistent/crafter-forge");
        let inputs = FoundryInputs {
            project_name: "demo".into(),
            step_in: false,
            base_package: "com.example".into(),
            url: "jdbc:mysql://localhost/db".into(),
            driver: "d.Driver".into(),
            username: "root".into(),
            password: None,
            tables: "orders".into(),
            overwrite: false,
        };
        let err = engine.generate(&inputs).unwrap_err();
        assert!(err.to_string().contains("foundry generation failed"));
    }

    #[cfg(unix)]
    #[test]
    fn successful_exit_is_ok() {
        let engine = ForgeCommand::new("/bin/true");
        let inputs = FoundryInputs {
            project_name: "demo".into(),
            step_in: true,
            base_package: "com.example".into(),
            url: "jdbc:mysql://localhost/db".into(),
            driver: "d.Driver".into(),
            username: "root".into(),
            password: Some("secret".into()),
            tables: "orders,users".into(),
            overwrite: true,
        };
        engine.generate(&inputs).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_foundry_failure() {
        let engine = ForgeCommand::new("/bin/false");
        let inputs = FoundryInputs {
            project_name: "demo".into(),
            step_in: false,
            base_package: "com.example".into(),
            url: "jdbc:mysql://localhost/db".into(),
            driver: "d.Driver".into(),
            username: "root".into(),
            password: None,
            tables: "orders".into(),
            overwrite: false,
        };
        assert!(engine.generate(&inputs).is_err());
    }
}
