//! Appendix A reader. Each dataset version ships a plain-text listing of
//! every DRG with its MDC, medical/surgical type, and title:
//!
//! ```text
//! 001  PRE  P     HEART TRANSPLANT OR IMPLANT OF HEART ASSIST SYSTEM W MCC
//! ```
//!
//! Records are whitespace-delimited. The first token is the DRG code and
//! must be all ASCII digits; lines whose first token is anything else
//! (page headers, column headings, blanks) are format noise and skipped.
//! The second token is the MDC (`01`..`25`, `PRE`, or `--` for DRGs with
//! no MDC assignment), the third is the type (`M` medical, `P` surgical,
//! `-` neither), and the remaining tokens joined by single spaces form the
//! description.
//!
//! A digit-led line that does not fit this layout fails the whole parse.
//! A repeated DRG code keeps the last occurrence; a warning names the code.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::record::{DrgRecord, RecordSet};

/// Errors raised while reading an Appendix A listing.
///
/// Line numbers are 1-based. Callers that know the source path add it as
/// context; the parser itself only sees a reader.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed record ({reason}): {content:?}")]
    MalformedRecord {
        line: usize,
        reason: &'static str,
        content: String,
    },
}

/// Read and parse the Appendix A file at `path`.
///
/// The file handle lives only for the duration of the call.
pub fn read_appendix(path: &Path) -> Result<RecordSet, ParseError> {
    let file = File::open(path)?;
    parse_appendix(BufReader::new(file))
}

/// Parse an Appendix A listing from any buffered reader.
pub fn parse_appendix<R: BufRead>(reader: R) -> Result<RecordSet, ParseError> {
    let mut records = RecordSet::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;

        let mut fields = line.split_whitespace();
        let Some(code) = fields.next() else {
            continue;
        };
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }

        let (Some(mdc), Some(type_code)) = (fields.next(), fields.next()) else {
            return Err(ParseError::MalformedRecord {
                line: line_no,
                reason: "expected `code mdc type description`",
                content: line.clone(),
            });
        };

        let (is_medical, is_surgical) = match type_code {
            "M" => (true, false),
            "P" => (false, true),
            "-" => (false, false),
            _ => {
                return Err(ParseError::MalformedRecord {
                    line: line_no,
                    reason: "type must be `M`, `P`, or `-`",
                    content: line.clone(),
                });
            }
        };

        let description = fields.collect::<Vec<_>>().join(" ");
        if description.is_empty() {
            return Err(ParseError::MalformedRecord {
                line: line_no,
                reason: "missing description",
                content: line.clone(),
            });
        }

        let record = DrgRecord {
            mdc: mdc.to_string(),
            is_medical,
            is_surgical,
            description,
        };
        if records.insert(code, record).is_some() {
            warn!(code, line = line_no, "duplicate DRG code, keeping the later record");
        }
    }

    Ok(records)
}
