//! Pandoc converter: shells out to the `pandoc` executable.
//!
//! Markup is piped on stdin; the command line is
//!
//! ```text
//! pandoc -f latex -o <output> --standalone --katex=<url>
//!        --metadata title=<title> --metadata date=<date>
//!        [--include-in-header <css>] [--lua-filter <filter>]
//!        [--include-before-body <nav-top>] [--include-after-body <nav-bottom>]
//! ```

use super::backend::{ConvertError, ConvertParams, Converter};
use crate::config::{MarkupConfig, PandocConfig};
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, error};

/// Converter backed by the `pandoc` command-line tool.
pub struct PandocConverter {
    binary: String,
    input_format: String,
    katex_url: String,
}

impl PandocConverter {
    pub fn new(pandoc: &PandocConfig, markup: &MarkupConfig) -> Self {
        Self {
            binary: pandoc.binary.clone(),
            input_format: markup.input_format.clone(),
            katex_url: pandoc.katex_url.clone(),
        }
    }

    /// Arguments for one conversion, in the order pandoc receives them.
    pub fn args(&self, params: &ConvertParams) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            self.input_format.clone().into(),
            "-o".into(),
            params.output.clone().into(),
            "--standalone".into(),
            format!("--katex={}", self.katex_url).into(),
            "--metadata".into(),
            format!("title={}", params.title).into(),
            "--metadata".into(),
            format!("date={}", params.date).into(),
        ];

        let includes = [
            ("--include-in-header", &params.header),
            ("--lua-filter", &params.filter),
            ("--include-before-body", &params.before_body),
            ("--include-after-body", &params.after_body),
        ];
        for (flag, path) in includes {
            if let Some(path) = path {
                args.push(flag.into());
                args.push(path.clone().into());
            }
        }
        args
    }
}

impl Converter for PandocConverter {
    fn convert(&self, params: &ConvertParams) -> Result<(), ConvertError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.args(params))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        debug!("running {:?}", cmd);

        let mut child = cmd.spawn()?;
        let stdin = child.stdin.take();
        let markup = params.markup.as_bytes();
        // The engine may exit before reading all of stdin; its status and
        // stderr still decide the outcome.
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(markup),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (output, written)
        });
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Error running pandoc: {}", stderr);
            return Err(ConvertError::Failed {
                status: output.status,
                stderr,
            });
        }
        written?;
        Ok(())
    }
}
