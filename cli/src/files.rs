//! Input and output files, with `-` meaning standard input/output.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Path sentinel selecting standard input or standard output.
pub const STDIO_SENTINEL: &str = "-";

/// Error type for reading input and writing output.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {source_name}: {err}")]
    Read { source_name: String, err: io::Error },
    #[error("{source_name} is not valid UTF-8")]
    Utf8 { source_name: String },
    #[error("failed to write {sink_name}: {err}")]
    Write { sink_name: String, err: io::Error },
}

/// Where input text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

/// Where output audio goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    File(PathBuf),
}

impl InputSource {
    /// Parses a command-line path, `-` selects standard input.
    pub fn parse(arg: &str) -> Self {
        if arg == STDIO_SENTINEL {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    /// Reads the whole input as text.
    pub fn read_to_string(&self) -> Result<String, IoError> {
        let data = match self {
            InputSource::Stdin => read_all(io::stdin().lock()),
            InputSource::File(path) => std::fs::read(path),
        }
        .map_err(|err| IoError::Read {
            source_name: self.to_string(),
            err,
        })?;

        debug!(source = %self, bytes = data.len(), "read input");
        String::from_utf8(data).map_err(|_| IoError::Utf8 {
            source_name: self.to_string(),
        })
    }
}

impl OutputSink {
    /// Parses a command-line path, `-` selects standard output.
    pub fn parse(arg: &str) -> Self {
        if arg == STDIO_SENTINEL {
            OutputSink::Stdout
        } else {
            OutputSink::File(PathBuf::from(arg))
        }
    }

    /// Writes all bytes, creating or truncating the file.
    ///
    /// New files get mode 0644 on Unix.
    pub fn write_all(&self, data: &[u8]) -> Result<(), IoError> {
        let result = match self {
            OutputSink::Stdout => write_to(io::stdout().lock(), data),
            OutputSink::File(path) => create_file(path).and_then(|f| write_to(f, data)),
        };
        result.map_err(|err| IoError::Write {
            sink_name: self.to_string(),
            err,
        })?;

        debug!(sink = %self, bytes = data.len(), "wrote output");
        Ok(())
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("standard input"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSink::Stdout => f.write_str("standard output"),
            OutputSink::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads a stream until end of file.
pub fn read_all<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(data)
}

/// Writes the whole payload and flushes, with no framing.
pub fn write_to<W: Write>(mut writer: W, data: &[u8]) -> io::Result<()> {
    writer.write_all(data)?;
    writer.flush()
}

fn create_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_sentinels() {
        assert_eq!(InputSource::parse("-"), InputSource::Stdin);
        assert_eq!(OutputSink::parse("-"), OutputSink::Stdout);
        assert_eq!(
            InputSource::parse("in.txt"),
            InputSource::File(PathBuf::from("in.txt"))
        );
        assert_eq!(
            OutputSink::parse("./-"),
            OutputSink::File(PathBuf::from("./-"))
        );
    }

    #[test]
    fn test_read_all_large_input() {
        let text: String = "The quick brown fox jumps over the lazy dog. "
            .repeat(1024);
        assert!(text.len() > 32 * 1024);

        let data = read_all(Cursor::new(text.clone().into_bytes())).unwrap();
        assert_eq!(data, text.as_bytes());
    }

    #[test]
    fn test_write_to_no_framing() {
        let payload: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let mut out = Vec::new();
        write_to(&mut out, &payload).unwrap();
        assert_eq!(out, payload);
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, "Hello, World!").unwrap();

        let text = InputSource::File(path).read_to_string().unwrap();
        assert_eq!(text, "Hello, World!");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = InputSource::File(dir.path().join("missing.txt"));

        let err = source.read_to_string().unwrap_err();
        match &err {
            IoError::Read { err, .. } => assert_eq!(err.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = InputSource::File(path).read_to_string().unwrap_err();
        assert!(matches!(err, IoError::Utf8 { .. }));
    }

    #[test]
    fn test_write_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp3");
        std::fs::write(&path, vec![b'x'; 4096]).unwrap();

        let sink = OutputSink::File(path.clone());
        sink.write_all(b"ID3 audio").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3 audio");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.mp3");
        OutputSink::File(path.clone()).write_all(b"abc").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        // The process umask can only remove bits.
        assert_eq!(mode & 0o777 & !0o644, 0);
        assert_ne!(mode & 0o600, 0);
    }

    #[test]
    fn test_write_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let sink = OutputSink::File(dir.path().join("no-such-dir").join("out.mp3"));

        let err = sink.write_all(b"abc").unwrap_err();
        assert!(matches!(err, IoError::Write { .. }));
    }
}
