//! Output generation for the command-line tool
//!
//! Turns the tool's options into request lists, runs one or two generation
//! sessions, writes each buffer to its own file and produces the
//! `openssl s_client` command line that replays them. The TLS client itself
//! is never run from here.

use crate::h2::{generate_early_data, generate_session, Error, H2Request, Result};
use bytes::Bytes;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix of the file sent as TLS early data
pub const EARLY_DATA_SUFFIX: &str = "_early_data";

/// Suffix of the file sent after the handshake in early-data mode
pub const AFTER_EARLY_DATA_SUFFIX: &str = "_more_after_early_data";

/// Options for one tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Address the printed command connects to (port 443)
    pub ip: String,
    /// `:authority` for every request
    pub host: String,
    /// `:path` for every request
    pub url: String,
    /// `:method` for every request
    pub method: String,
    /// `:scheme` for every request
    pub scheme: String,
    /// Extra headers added to every request
    pub headers: Vec<(String, String)>,
    /// Number of identical requests per session
    pub repeat: usize,
    /// Omit the connection preface and SETTINGS frame (normal mode only)
    pub no_preface: bool,
    /// Produce an early-data session and a follow-up session
    pub early_data: bool,
    /// `:path` used in the early-data session instead of `url`
    pub early_data_url: Option<String>,
    /// Output file name, or base name in early-data mode
    pub output: String,
}

impl GenerateOptions {
    /// Options with the tool's defaults for everything but the target address
    pub fn new(ip: impl Into<String>) -> Self {
        GenerateOptions {
            ip: ip.into(),
            host: "www.google.com".to_string(),
            url: "/teapot".to_string(),
            method: "GET".to_string(),
            scheme: crate::h2::DEFAULT_SCHEME.to_string(),
            headers: Vec::new(),
            repeat: 1,
            no_preface: false,
            early_data: false,
            early_data_url: None,
            output: "h2_request".to_string(),
        }
    }

    fn requests(&self, path: &str) -> Result<Vec<H2Request>> {
        let request = H2Request::builder()
            .host(self.host.as_str())
            .path(path)
            .method(self.method.as_str())
            .scheme(self.scheme.as_str())
            .headers(self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str())))
            .build()?;
        Ok(vec![request; self.repeat])
    }

    /// Encode every output buffer without touching the filesystem
    pub fn plan(&self) -> Result<Generation> {
        if self.repeat == 0 {
            return Err(Error::InvalidInput("repeat must be at least 1".to_string()));
        }
        if self.output.is_empty() {
            return Err(Error::InvalidInput("empty output name".to_string()));
        }

        if self.early_data {
            let early_url = self.early_data_url.as_deref().unwrap_or(&self.url);
            let sessions = generate_early_data(&self.requests(early_url)?, &self.requests(&self.url)?)?;

            let early_name = format!("{}{}", self.output, EARLY_DATA_SUFFIX);
            let after_name = format!("{}{}", self.output, AFTER_EARLY_DATA_SUFFIX);
            let command = format!(
                "openssl s_client -connect {}:443 -sess_in session.pem -tls1_3 -alpn h2 \
                 -keylogfile sslkeylog.log -early_data {} -ign_eof < {}",
                self.ip, early_name, after_name
            );

            Ok(Generation {
                outputs: vec![
                    OutputFile::new(early_name, sessions.early_data),
                    OutputFile::new(after_name, sessions.after_early_data),
                ],
                command,
            })
        } else {
            let data = generate_session(&self.requests(&self.url)?, !self.no_preface)?;
            let command = format!(
                "openssl s_client -connect {}:443 -sess_out session.pem -tls1_3 -alpn h2 \
                 -keylogfile sslkeylog.log -ign_eof < {}",
                self.ip, self.output
            );

            Ok(Generation {
                outputs: vec![OutputFile::new(self.output.clone(), data)],
                command,
            })
        }
    }
}

/// One generated buffer and the file name it is written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// File name, relative to the output directory
    pub name: String,
    /// Encoded frames
    pub data: Bytes,
}

impl OutputFile {
    fn new(name: String, data: Bytes) -> Self {
        OutputFile { name, data }
    }
}

/// Result of planning a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Buffers in the order they are sent
    pub outputs: Vec<OutputFile>,
    /// Command line that replays the outputs with `openssl s_client`
    pub command: String,
}

impl Generation {
    /// Write every output under `dir`, returning the written paths
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.outputs.len());
        for output in &self.outputs {
            let path = dir.join(&output.name);
            fs::write(&path, &output.data)?;
            tracing::info!(path = %path.display(), bytes = output.data.len(), "wrote output");
            written.push(path);
        }
        Ok(written)
    }
}
