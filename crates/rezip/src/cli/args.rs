use std::fs::{self, File, Metadata};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

use crate::cli::app::App;

/// Owner read permission (0400).
#[cfg(unix)]
const READ_PERMISSION_BIT: u32 = 1 << 8;

/// Owner write permission (0200).
#[cfg(unix)]
const WRITE_PERMISSION_BIT: u32 = 1 << 7;

/// Checked paths handed to the repackaging core.
#[derive(Clone, Debug)]
pub struct Config {
    pub input:    PathBuf,
    pub output:   PathBuf,
    pub validate: bool,
    pub registry: Option<PathBuf>,
}

impl TryFrom<&App> for Config {
    type Error = anyhow::Error;

    fn try_from(app: &App) -> Result<Self, Self::Error> {
        check_input_file(&app.input)?;
        check_output_directory(&app.output)?;
        check_distinct_paths(&app.input, &app.output)?;

        Ok(Config {
            input:    app.input.clone(),
            output:   app.output.clone(),
            validate: app.validate,
            registry: app.registry.clone(),
        })
    }
}

/// Input must exist, be a readable regular file and parse as a ZIP.
pub fn check_input_file(input: &Path) -> anyhow::Result<()> {
    let metadata = match fs::metadata(input) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            bail!("input zip file does not exist: {}", input.display())
        }
        Err(e) => return Err(e).context("cannot access input zip file due to system error"),
    };

    if metadata.is_dir() {
        bail!("input is a directory, not a zip file: {}", input.display());
    }

    if !owner_can_read(&metadata) {
        bail!(
            "input zip file is not readable (no read permission): {}",
            input.display()
        );
    }

    let file = File::open(input).context("cannot open input zip file")?;
    zip::ZipArchive::new(BufReader::new(file)).context("file is not a valid zip")?;

    Ok(())
}

/// The output's parent directory must exist and be writable.
pub fn check_output_directory(output: &Path) -> anyhow::Result<()> {
    let directory = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let metadata = match fs::metadata(directory) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            bail!("output directory does not exist: {}", directory.display())
        }
        Err(e) => return Err(e).context("cannot access output directory due to system error"),
    };

    if !metadata.is_dir() {
        bail!("output directory is not a directory: {}", directory.display());
    }

    if !owner_can_write(&metadata) {
        bail!("output directory is not writable: {}", directory.display());
    }

    Ok(())
}

/// Reading and writing the same file would corrupt it and leave nothing to validate against.
pub fn check_distinct_paths(input: &Path, output: &Path) -> anyhow::Result<()> {
    let absolute_input =
        std::path::absolute(input).context("failed to resolve absolute input path")?;
    let absolute_output =
        std::path::absolute(output).context("failed to resolve absolute output path")?;

    let same = absolute_input == absolute_output
        || matches!(
            (fs::canonicalize(input), fs::canonicalize(output)),
            (Ok(a), Ok(b)) if a == b
        );

    if same {
        bail!(
            "input and output cannot be the same file: both resolve to {}",
            absolute_input.display()
        );
    }

    Ok(())
}

#[cfg(unix)]
fn owner_can_read(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & READ_PERMISSION_BIT != 0
}

#[cfg(not(unix))]
fn owner_can_read(_metadata: &Metadata) -> bool { true }

#[cfg(unix)]
fn owner_can_write(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & WRITE_PERMISSION_BIT != 0
}

#[cfg(not(unix))]
fn owner_can_write(metadata: &Metadata) -> bool { !metadata.permissions().readonly() }
