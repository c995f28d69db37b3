//! Conversion Bridge - External PDF Rendering
//!
//! Rendering is delegated to a headless LibreOffice process treated as a
//! black box with a command-line contract. The engine is probed per call
//! (a one-off startup cost), invoked with a bounded timeout, and its output
//! file reconciled with the caller's requested path: LibreOffice always names
//! the output after the *source* document's stem.

use log::{debug, info};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use thiserror::Error;
use wait_timeout::ChildExt;

/// Engine binary names probed in order. `soffice` is the standard name;
/// some Linux distributions only install a `libreoffice` wrapper.
pub const ENGINE_CANDIDATES: &[&str] = &["soffice", "libreoffice"];

/// Hard ceiling on one conversion. Expiry is fatal, never retried.
pub const CONVERT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Document not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Conversion engine not found (tried soffice, libreoffice)")]
    EngineNotFound,

    #[error("PDF conversion failed: {0}")]
    ConversionFailed(String),

    #[error("PDF conversion timed out after {}s", CONVERT_TIMEOUT.as_secs())]
    Timeout,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one engine invocation.
#[derive(Debug, Clone)]
pub struct ExitInfo {
    pub success: bool,
    pub diagnostic: String,
}

/// Port to the external rendering engine, kept small so tests can substitute
/// a fake without spawning real processes.
pub trait RenderEngine {
    /// Resolve the engine executable, or fail with `EngineNotFound`.
    fn discover(&self) -> Result<PathBuf, ConvertError>;

    /// Render `input` into `outdir`, blocking up to the fixed timeout.
    fn invoke(&self, engine: &Path, input: &Path, outdir: &Path) -> Result<ExitInfo, ConvertError>;
}

/// The real engine: headless LibreOffice.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibreOffice;

impl RenderEngine for LibreOffice {
    fn discover(&self) -> Result<PathBuf, ConvertError> {
        for name in ENGINE_CANDIDATES {
            if let Ok(path) = which::which(name) {
                debug!("conversion engine resolved: {}", path.display());
                return Ok(path);
            }
        }
        Err(ConvertError::EngineNotFound)
    }

    fn invoke(&self, engine: &Path, input: &Path, outdir: &Path) -> Result<ExitInfo, ConvertError> {
        let mut child = Command::new(engine)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(outdir)
            .arg(input)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let status = match child.wait_timeout(CONVERT_TIMEOUT)? {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ConvertError::Timeout);
            }
        };

        let mut diagnostic = String::new();
        if let Some(mut stderr) = child.stderr.take() {
            let _ = stderr.read_to_string(&mut diagnostic);
        }
        if diagnostic.trim().is_empty() {
            if let Some(mut stdout) = child.stdout.take() {
                let _ = stdout.read_to_string(&mut diagnostic);
            }
        }

        Ok(ExitInfo {
            success: status.success(),
            diagnostic: diagnostic.trim().to_string(),
        })
    }
}

/// Drives one conversion: discover, invoke, reconcile. Conversion is attempted
/// exactly once; every failure is fatal to the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter<E = LibreOffice> {
    engine: E,
}

impl<E: RenderEngine> Converter<E> {
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Render `source` to PDF at `target`, creating parent directories.
    ///
    /// The engine writes `<outdir>/<source stem>.pdf`; when that differs from
    /// `target` the produced file is moved into place, so the intermediate
    /// name never survives a successful conversion.
    pub fn convert_to_pdf(&self, source: &Path, target: &Path) -> Result<(), ConvertError> {
        if !source.exists() {
            return Err(ConvertError::SourceNotFound(source.to_path_buf()));
        }

        let outdir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&outdir)?;

        let engine = self.engine.discover()?;
        let info = self.engine.invoke(&engine, source, &outdir)?;
        if !info.success {
            return Err(ConvertError::ConversionFailed(info.diagnostic));
        }

        let stem = source
            .file_stem()
            .ok_or_else(|| ConvertError::SourceNotFound(source.to_path_buf()))?;
        let produced = outdir.join(Path::new(stem).with_extension("pdf"));

        if !produced.exists() {
            return Err(ConvertError::ConversionFailed(
                "engine reported success but produced no output file".to_string(),
            ));
        }
        // The produced file sits in the target's own directory, so the file
        // name is the only component that can differ.
        if produced.file_name() != target.file_name() {
            fs::rename(&produced, target)?;
        }

        info!("PDF generated: {}", target.display());
        Ok(())
    }
}
