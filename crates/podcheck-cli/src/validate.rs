//! # Validate Command
//!
//! Loads one manifest, validates it, and writes the diagnostics.
//!
//! Input problems are reported in the same `<file> <message>` shape as
//! validation errors: `cannot read file` when the file cannot be read and
//! `invalid yaml format` when it does not parse. The detailed cause is only
//! logged.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use podcheck_core::load_file;
use podcheck_schema::{validate_pod, ValidationProfile};

/// Rule set selectable on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProfileArg {
    /// cpu must be an integer.
    #[default]
    Permissive,
    /// cpu must be a positive integer.
    Strict,
}

impl From<ProfileArg> for ValidationProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Permissive => ValidationProfile::permissive(),
            ProfileArg::Strict => ValidationProfile::strict(),
        }
    }
}

/// Arguments for validating a manifest.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the Pod manifest.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Validation rule set.
    #[arg(long, value_enum, default_value_t = ProfileArg::Permissive)]
    pub profile: ProfileArg,
}

/// Validate the manifest named by `args`, writing diagnostics to `out`.
///
/// Returns exit code: 0 when the manifest is valid, 1 when it cannot be
/// loaded or has validation errors.
///
/// # Errors
///
/// Only fails when writing to `out` fails.
pub fn run_validate<W: Write>(args: &ValidateArgs, out: &mut W) -> Result<u8> {
    let file = args.path.display().to_string();

    let documents = match load_file(&args.path) {
        Ok(documents) => documents,
        Err(e) => {
            tracing::debug!(file = %file, error = %e, "failed to load manifest");
            let message = if e.is_parse_error() {
                "invalid yaml format"
            } else {
                "cannot read file"
            };
            writeln!(out, "{file} {message}").context("failed to write diagnostics")?;
            return Ok(1);
        }
    };

    let errors = validate_pod(&file, &documents, args.profile.into());
    for error in errors.errors() {
        writeln!(out, "{error}").context("failed to write diagnostics")?;
    }

    tracing::info!(
        file = %file,
        profile = ?args.profile,
        errors = errors.len(),
        "validation complete"
    );

    if errors.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const VALID: &str = "\
apiVersion: v1
kind: Pod
metadata:
  name: web
spec:
  containers:
    - name: web
      image: registry.bigbrother.io/web:1.0
      resources:
        requests:
          cpu: 0
";

    fn run(path: &Path, profile: ProfileArg) -> (u8, String) {
        let args = ValidateArgs {
            path: path.to_path_buf(),
            profile,
        };
        let mut out = Vec::new();
        let code = run_validate(&args, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn valid_manifest_exits_zero_silently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pod.yaml");
        std::fs::write(&path, VALID).unwrap();
        let (code, out) = run(&path, ProfileArg::Permissive);
        assert_eq!(code, 0);
        assert!(out.is_empty(), "unexpected output: {out}");
    }

    #[test]
    fn strict_profile_flags_zero_cpu() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pod.yaml");
        std::fs::write(&path, VALID).unwrap();
        let (code, out) = run(&path, ProfileArg::Strict);
        assert_eq!(code, 1);
        assert_eq!(out, format!("{}:11 cpu value out of range\n", path.display()));
    }

    #[test]
    fn errors_are_written_one_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pod.yaml");
        std::fs::write(&path, "apiVersion: v2\n").unwrap();
        let (code, out) = run(&path, ProfileArg::Permissive);
        assert_eq!(code, 1);
        let file = path.display().to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                format!("{file}:1 apiVersion has unsupported value 'v2'"),
                format!("{file} kind is required"),
                format!("{file} metadata is required"),
                format!("{file} spec is required"),
            ]
        );
    }

    #[test]
    fn missing_file_cannot_be_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let (code, out) = run(&path, ProfileArg::Permissive);
        assert_eq!(code, 1);
        assert_eq!(out, format!("{} cannot read file\n", path.display()));
    }

    #[test]
    fn unparseable_file_is_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "kind: [Pod\n").unwrap();
        let (code, out) = run(&path, ProfileArg::Permissive);
        assert_eq!(code, 1);
        assert_eq!(out, format!("{} invalid yaml format\n", path.display()));
    }

    #[test]
    fn profile_arg_maps_to_profile() {
        assert_eq!(
            ValidationProfile::from(ProfileArg::Permissive),
            ValidationProfile::permissive()
        );
        assert_eq!(
            ValidationProfile::from(ProfileArg::Strict),
            ValidationProfile::strict()
        );
    }
}
