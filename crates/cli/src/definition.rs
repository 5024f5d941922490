use anyhow::{Context, Result, bail};
use argspec::{Arity, ArgumentDef, OptionDef, ParserDefinition, ValueType};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DEFINITION_NAME: &str = "argspec.json";

pub fn load_definition(path: &Path) -> Result<ParserDefinition> {
    if !path.exists() {
        bail!("definition not found: {}", path.display());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read definition: {}", path.display()))?;
    let definition: ParserDefinition = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse definition JSON: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        options = definition.options.len(),
        arguments = definition.arguments.len(),
        "loaded definition"
    );
    Ok(definition)
}

/// A small definition exercising every kind of declaration.
pub fn sample_definition(program: &str) -> ParserDefinition {
    ParserDefinition {
        program: Some(program.to_string()),
        description: "Sample program generated by argspec init.".to_string(),
        help_flags: vec!["-h".to_string(), "--help".to_string()],
        options: vec![
            OptionDef {
                flags: vec!["-v".to_string(), "--verbose".to_string()],
                name: "verbose".to_string(),
                value_type: ValueType::Boolean,
                arity: Arity::SWITCH,
                description: "print more output".to_string(),
            },
            OptionDef {
                flags: vec!["-n".to_string()],
                name: "count".to_string(),
                value_type: ValueType::Integer,
                arity: Arity::ONE,
                description: "how many times to repeat".to_string(),
            },
        ],
        arguments: vec![ArgumentDef {
            name: "arg1".to_string(),
            value_type: ValueType::Integer,
            arity: Arity::ONE,
            description: "an integer argument".to_string(),
        }],
    }
}

/// Write `definition` to `dest` through a temporary file.
pub fn write_definition(
    dest: &Path,
    definition: &ParserDefinition,
    overwrite: bool,
) -> Result<PathBuf> {
    if dest.exists() && !overwrite {
        bail!("{} already exists (use --force to overwrite)", dest.display());
    }

    let bytes = serde_json::to_vec_pretty(definition).context("failed to serialize definition")?;
    let mut out = String::from_utf8(bytes).context("definition is not valid UTF-8")?;
    out.push('\n');

    let tmp = dest.with_extension("tmp");
    fs::write(&tmp, out.as_bytes()).with_context(|| format!("failed to write {}", tmp.display()))?;
    if overwrite && dest.exists() {
        fs::remove_file(dest).with_context(|| format!("failed to remove {}", dest.display()))?;
    }
    fs::rename(&tmp, dest)
        .with_context(|| format!("failed to move {} into place", dest.display()))?;
    Ok(dest.to_path_buf())
}

/// Program name for a fresh definition: the file stem of `dest`, falling
/// back to the current directory name.
pub fn guess_program_name(dest: &Path) -> Option<String> {
    let stem = dest.file_stem().and_then(|s| s.to_str());
    let direct = stem.filter(|s| !s.is_empty() && *s != "argspec");
    if let Some(name) = direct {
        return Some(name.to_string());
    }

    let cwd = std::env::current_dir().ok()?;
    cwd.file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .map(|s| s.to_string())
}
