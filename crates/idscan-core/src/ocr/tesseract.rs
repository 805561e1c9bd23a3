//! Tesseract OCR through its command-line interface.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::{debug, info};

use super::{detect_image_format, OcrProvider};
use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Runs `tesseract stdin stdout` with the image piped on stdin.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: String,
    psm: u8,
}

impl TesseractCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            psm: 3,
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.binary_path.clone()).with_psm(config.psm)
    }

    /// Set the page segmentation mode.
    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = psm;
        self
    }

    /// First line of `tesseract --version`.
    pub fn version(&self) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(OcrError::Engine(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        // Older releases print the version on stderr.
        let text = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };

        Ok(String::from_utf8_lossy(&text)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    fn spawn_error(&self, err: std::io::Error) -> OcrError {
        if err.kind() == ErrorKind::NotFound {
            OcrError::Unavailable(format!("{} not found", self.binary))
        } else {
            OcrError::Io(err)
        }
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::from_config(&OcrConfig::default())
    }
}

impl OcrProvider for TesseractCli {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &[u8], language: &str) -> Result<String, OcrError> {
        let format = detect_image_format(image)?;
        if language.trim().is_empty() {
            return Err(OcrError::Engine("no language given".to_string()));
        }

        let start = Instant::now();
        debug!(
            "Running {} on {} bytes of {:?} (lang {}, psm {})",
            self.binary,
            image.len(),
            format,
            language,
            self.psm
        );

        let mut child = Command::new(&self.binary)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .arg("--psm")
            .arg(self.psm.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| OcrError::Engine("stdin not captured".to_string()))?;

        // Feed stdin from a separate thread so a full stdout pipe cannot stall us.
        let output = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(image));
            let output = child.wait_with_output();
            match writer.join() {
                Ok(Err(e)) if e.kind() != ErrorKind::BrokenPipe => Err(e),
                _ => output,
            }
        })?;

        if !output.status.success() {
            return Err(OcrError::Engine(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let text =
            String::from_utf8(output.stdout).map_err(|e| OcrError::InvalidOutput(e.to_string()))?;

        info!(
            "Tesseract recognized {} chars in {} ms",
            text.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}
