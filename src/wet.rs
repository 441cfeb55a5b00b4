//! WET output: the text extract of each capture as a WARC conversion record.
//!
//! A WET file is a sequence of gzip members, one WARC/1.0 record each. The
//! first record is a `warcinfo` describing the file; every HTML response
//! with a text extract is followed by a `conversion` record carrying that
//! text as `text/plain`.
//!
//! Input is the JSON metadata envelope of a capture:
//!
//! ```json
//! {
//!   "Container": {"Filename": "crawl-00000.warc.gz"},
//!   "Envelope": {
//!     "Format": "WARC",
//!     "WARC-Header-Metadata": {
//!       "WARC-Type": "response",
//!       "WARC-Target-URI": "http://example.com/",
//!       "WARC-Date": "2017-04-23T12:13:02Z",
//!       "WARC-Record-ID": "<urn:uuid:...>"
//!     },
//!     "Payload-Metadata": {"HTTP-Response-Metadata": {"HTML-Metadata": {"Text": "..."}}}
//!   }
//! }
//! ```

use std::io::Write;

use chrono::{DateTime, NaiveDateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::error::{Error, Result};

const WARC_VERSION: &str = "WARC/1.0";
const CRLF: &str = "\r\n";

pub const CONTAINER_FILENAME: &str = "Container.Filename";
pub const ENVELOPE_FORMAT: &str = "Envelope.Format";
pub const WARC_TYPE: &str = "Envelope.WARC-Header-Metadata.WARC-Type";
pub const WARC_TARGET_URI: &str = "Envelope.WARC-Header-Metadata.WARC-Target-URI";
pub const WARC_DATE: &str = "Envelope.WARC-Header-Metadata.WARC-Date";
pub const WARC_RECORD_ID: &str = "Envelope.WARC-Header-Metadata.WARC-Record-ID";
pub const HTML_TEXT: &str = "Envelope.Payload-Metadata.HTTP-Response-Metadata.HTML-Metadata.Text";
pub const WARC_INFO_METADATA: &str = "Envelope.Payload-Metadata.WARC-Info-Metadata";

/// warcinfo fields copied from the source archive into the WET warcinfo.
const COPIED_WARCINFO_FIELDS: [&str; 5] = ["robots", "isPartOf", "operator", "description", "publisher"];

/// Looks up a dot-separated path of object keys; the leaf must be a string.
#[must_use]
pub fn extract_single<'a>(metadata: &'a Value, path: &str) -> Option<&'a str> {
    path.split('.')
        .try_fold(metadata, |node, key| node.get(key))
        .and_then(Value::as_str)
}

fn require<'a>(metadata: &'a Value, path: &str) -> Result<&'a str> {
    extract_single(metadata, path).ok_or_else(|| Error::MissingMetadata(path.to_string()))
}

/// Parses a WARC date of the exact form `YYYY-MM-DDThh:mm:ssZ`.
fn parse_warc_date(input: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%SZ")
        .map(|naive| naive.and_utc())
        .map_err(|_| Error::InvalidDate(input.to_string()))
}

/// Capture fields a conversion record refers back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureInfo {
    pub target_uri: String,
    pub date: DateTime<Utc>,
    /// `WARC-Record-ID` of the response record the text was extracted from.
    pub record_id: String,
}

impl CaptureInfo {
    /// Reads the capture fields from a metadata envelope.
    ///
    /// # Errors
    ///
    /// [`Error::MissingMetadata`] names the first absent field;
    /// [`Error::InvalidDate`] reports a malformed `WARC-Date`.
    pub fn from_metadata(metadata: &Value) -> Result<Self> {
        let target_uri = require(metadata, WARC_TARGET_URI)?.to_string();
        let date = parse_warc_date(require(metadata, WARC_DATE)?)?;
        let record_id = require(metadata, WARC_RECORD_ID)?.to_string();
        Ok(Self { target_uri, date, record_id })
    }
}

fn warc_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn new_record_id() -> String {
    format!("<urn:uuid:{}>", Uuid::new_v4())
}

/// Serializes one WARC record: version line, headers, `Content-Length`, body.
fn build_record(headers: &[(&str, &str)], content_type: &str, body: &[u8]) -> Vec<u8> {
    let mut record = Vec::with_capacity(body.len() + 512);
    let mut head = String::with_capacity(512);
    head.push_str(WARC_VERSION);
    head.push_str(CRLF);
    for (name, value) in headers {
        head.push_str(name);
        head.push_str(": ");
        head.push_str(value);
        head.push_str(CRLF);
    }
    head.push_str("Content-Type: ");
    head.push_str(content_type);
    head.push_str(CRLF);
    head.push_str(&format!("Content-Length: {}", body.len()));
    head.push_str(CRLF);
    head.push_str(CRLF);
    record.extend_from_slice(head.as_bytes());
    record.extend_from_slice(body);
    record.extend_from_slice(b"\r\n\r\n");
    record
}

/// Writer of WET files.
pub struct WetWriter<W: Write> {
    out: W,
    filename: Option<String>,
    wrote_warcinfo: bool,
    records_written: usize,
}

impl<W: Write> WetWriter<W> {
    /// The warcinfo filename will be taken from `Container.Filename`.
    pub fn new(out: W) -> Self {
        Self { out, filename: None, wrote_warcinfo: false, records_written: 0 }
    }

    /// Uses `filename` as the `WARC-Filename` of the warcinfo record.
    pub fn with_filename(out: W, filename: impl Into<String>) -> Self {
        Self { filename: Some(filename.into()), ..Self::new(out) }
    }

    /// Number of gzip members written so far.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Processes the metadata envelope of one capture.
    ///
    /// The first call writes the warcinfo record. Response captures with a
    /// text extract produce a conversion record; other captures only pass
    /// the `Envelope.Format` check.
    ///
    /// # Errors
    ///
    /// Missing `Envelope.Format`, capture fields or filename, a malformed
    /// capture date, a non-WARC envelope with text, and I/O failures.
    pub fn output(&mut self, metadata: &Value) -> Result<()> {
        if !self.wrote_warcinfo {
            self.write_warcinfo(metadata)?;
            self.wrote_warcinfo = true;
        }

        let format = require(metadata, ENVELOPE_FORMAT)?;
        if extract_single(metadata, WARC_TYPE) != Some("response") {
            trace!("not a response record, nothing to convert");
            return Ok(());
        }
        let Some(text) = extract_single(metadata, HTML_TEXT) else {
            return Ok(());
        };
        if format != "WARC" {
            warn!(%format, "no conversion writer for envelope format");
            return Err(Error::UnknownFormat(format.to_string()));
        }
        let capture = CaptureInfo::from_metadata(metadata).inspect_err(|err| {
            warn!(%err, "rejected capture");
        })?;
        self.write_conversion(&capture, text)
    }

    /// Writes a conversion record holding `text` for `capture`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails.
    pub fn write_conversion(&mut self, capture: &CaptureInfo, text: &str) -> Result<()> {
        let date = warc_date(&capture.date);
        let record_id = new_record_id();
        let headers = [
            ("WARC-Type", "conversion"),
            ("WARC-Target-URI", capture.target_uri.as_str()),
            ("WARC-Date", date.as_str()),
            ("WARC-Record-ID", record_id.as_str()),
            ("WARC-Refers-To", capture.record_id.as_str()),
        ];
        let record = build_record(&headers, "text/plain", text.as_bytes());
        self.write_member(&record)?;
        debug!(target_uri = %capture.target_uri, bytes = text.len(), "wrote conversion record");
        Ok(())
    }

    fn write_warcinfo(&mut self, metadata: &Value) -> Result<()> {
        let filename = match &self.filename {
            Some(name) => name.clone(),
            None => require(metadata, CONTAINER_FILENAME)?.to_string(),
        };

        let now = Utc::now();
        let mut fields = vec![
            ("Software-Info".to_string(), concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()),
            ("Extracted-Date".to_string(), now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()),
        ];
        if extract_single(metadata, WARC_TYPE) == Some("warcinfo") {
            for name in COPIED_WARCINFO_FIELDS {
                let path = format!("{WARC_INFO_METADATA}.{name}");
                if let Some(value) = extract_single(metadata, &path) {
                    fields.push((name.to_string(), value.to_string()));
                }
            }
        }
        let body: String = fields.iter().map(|(name, value)| format!("{name}: {value}{CRLF}")).collect();

        let date = warc_date(&now);
        let record_id = new_record_id();
        let headers = [
            ("WARC-Type", "warcinfo"),
            ("WARC-Date", date.as_str()),
            ("WARC-Filename", filename.as_str()),
            ("WARC-Record-ID", record_id.as_str()),
        ];
        let record = build_record(&headers, "application/warc-fields", body.as_bytes());
        self.write_member(&record)?;
        debug!(%filename, "wrote warcinfo record");
        Ok(())
    }

    /// Compresses `record` as its own gzip member.
    fn write_member(&mut self, record: &[u8]) -> Result<()> {
        let mut gz = GzEncoder::new(&mut self.out, Compression::default());
        gz.write_all(record)?;
        gz.finish()?;
        self.records_written += 1;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if flushing fails.
    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
