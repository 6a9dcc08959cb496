//! Streaming parser for allocator benchmark traces.
//!
//! A trace is line oriented. Comment lines start with `#` and carry the
//! header (`type=...`, `total_size=...,max_levels=...`) and, on the last
//! line, the timing footer. Event lines are comma separated:
//!
//! ```text
//! a,<index>,<size>,<status>,<fragmentation>
//! f,<index>,<status>,<fragmentation>
//! ```
//!
//! The whole file is read once, top to bottom. Only the most recent
//! non-blank line is buffered so the footer can be checked at the end.

use super::schema::{EventOutcome, OperationKind, ParsedTrace, TimingFooter, TraceHeader};
use crate::utils::config::{
    ALLOC_FIELD_COUNT, COMMENT_MARKER, FIELD_SEPARATOR, FOOTER_KEYS, FREE_FIELD_COUNT,
    HEADER_MAX_LEVELS_KEY, HEADER_TOTAL_SIZE_KEY, HEADER_TYPE_KEY, STATUS_SUCCESS,
};
use crate::utils::error::{LineError, ParseError};
use log::{debug, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One classified trace line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceLine<'a> {
    Blank,

    /// Comment body with the marker stripped
    Comment(&'a str),

    Allocation {
        index: i64,
        size: u64,
        success: bool,
        fragmentation: u64,
    },

    Free {
        index: i64,
        success: bool,
        fragmentation: u64,
    },

    /// Command symbol nobody handles (yet)
    Unknown(&'a str),
}

/// Parse a trace from any buffered reader
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::ReadFailed` - the reader failed or produced invalid UTF-8
///
/// Malformed lines are not errors; they are logged and skipped.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<ParsedTrace, ParseError> {
    let mut context = ParseContext::new();

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        context.process_line(line_index + 1, &line);
    }

    let parsed = context.finish();

    debug!(
        "Parsed {} operations ({} successful, {} fragmentation failures)",
        parsed.operation_count,
        parsed.outcomes.len(),
        parsed.failure_indices.len()
    );

    Ok(parsed)
}

/// Open and parse a trace file
///
/// **Public** - used by the batch driver
///
/// # Errors
/// * `ParseError::OpenFailed` - the file cannot be opened
/// * `ParseError::ReadFailed` - reading failed part way through
pub fn parse_trace_file(path: impl AsRef<Path>) -> Result<ParsedTrace, ParseError> {
    let path = path.as_ref();

    debug!("Parsing trace file: {}", path.display());

    let file = File::open(path).map_err(|source| ParseError::OpenFailed {
        path: path.to_path_buf(),
        source,
    })?;

    parse_trace(BufReader::new(file))
}

/// Classify a single line
///
/// **Public** - pure function, no parse state involved
///
/// # Errors
/// * `LineError::TooFewFields` - event line shorter than its command needs
/// * `LineError::InvalidField` - a numeric field does not parse
pub fn parse_line(line: &str) -> Result<TraceLine<'_>, LineError> {
    let line = line.trim();

    if line.is_empty() {
        return Ok(TraceLine::Blank);
    }

    if let Some(body) = line.strip_prefix(COMMENT_MARKER) {
        return Ok(TraceLine::Comment(body.trim()));
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();

    match fields[0] {
        "a" => {
            require_fields('a', &fields, ALLOC_FIELD_COUNT)?;
            Ok(TraceLine::Allocation {
                index: parse_field("index", fields[1])?,
                size: parse_field("size", fields[2])?,
                success: is_success(fields[3]),
                fragmentation: parse_field("fragmentation", fields[4])?,
            })
        }
        "f" => {
            require_fields('f', &fields, FREE_FIELD_COUNT)?;
            Ok(TraceLine::Free {
                index: parse_field("index", fields[1])?,
                success: is_success(fields[2]),
                fragmentation: parse_field("fragmentation", fields[3])?,
            })
        }
        other => Ok(TraceLine::Unknown(other)),
    }
}

/// Parse the timing footer
///
/// Accepts `# elapsed_seconds=<f> user_seconds=<f> sys_seconds=<f>`,
/// keys in exactly that order. Anything else yields `None`.
pub fn parse_timing_footer(line: &str) -> Option<TimingFooter> {
    let body = line.trim().strip_prefix(COMMENT_MARKER)?;
    let tokens: Vec<&str> = body.split_whitespace().collect();

    if tokens.len() != FOOTER_KEYS.len() {
        return None;
    }

    let mut values = [0.0_f64; 3];
    for ((token, key), slot) in tokens.iter().zip(FOOTER_KEYS).zip(values.iter_mut()) {
        let (found_key, raw) = token.split_once('=')?;
        if found_key != key {
            return None;
        }
        let value: f64 = raw.parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        *slot = value;
    }

    Some(TimingFooter {
        elapsed_seconds: values[0],
        user_seconds: values[1],
        sys_seconds: values[2],
    })
}

/// Per-parse state
///
/// Created fresh for every trace and consumed by [`ParseContext::finish`],
/// so nothing carries over between files.
#[derive(Debug, Default)]
pub struct ParseContext {
    header: TraceHeader,
    allocator_seen: bool,
    capacity_seen: bool,

    /// Live blocks: index -> size
    live: HashMap<i64, u64>,

    /// Always equals the sum of `live`
    allocated_bytes: u64,

    operation_count: u64,
    outcomes: Vec<EventOutcome>,
    failure_indices: Vec<usize>,

    /// Most recent non-blank line, checked for the footer at the end
    last_line: String,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line (1-based `line_number` is only used in logs)
    pub fn process_line(&mut self, line_number: usize, raw: &str) {
        let applied = parse_line(raw).and_then(|parsed| self.apply_line(line_number, parsed));

        if let Err(e) = applied {
            warn!("Skipping line {}: {}", line_number, e);
        }

        self.remember_line(raw);
    }

    #[cfg(test)]
    fn allocated_bytes(&self) -> u64 {
        self.allocated_bytes
    }

    #[cfg(test)]
    fn live_blocks(&self) -> usize {
        self.live.len()
    }

    #[cfg(test)]
    fn header(&self) -> &TraceHeader {
        &self.header
    }

    /// Close the pass and hand over the results
    pub fn finish(self) -> ParsedTrace {
        let timing = parse_timing_footer(&self.last_line);
        if timing.is_none() {
            debug!("No timing footer found, throughput will be reported as 0");
        }

        ParsedTrace {
            header: self.header,
            outcomes: self.outcomes,
            failure_indices: self.failure_indices,
            operation_count: self.operation_count,
            timing,
        }
    }

    fn remember_line(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            self.last_line.clear();
            self.last_line.push_str(trimmed);
        }
    }

    fn apply_line(&mut self, line_number: usize, parsed: TraceLine<'_>) -> Result<(), LineError> {
        match parsed {
            TraceLine::Blank => {}
            TraceLine::Comment(body) => self.apply_header(body),
            TraceLine::Allocation {
                index,
                size,
                success,
                fragmentation,
            } => self.record_allocation(index, size, success, fragmentation)?,
            TraceLine::Free {
                index,
                success,
                fragmentation,
            } => self.record_free(index, success, fragmentation),
            TraceLine::Unknown(symbol) => {
                debug!("Ignoring unknown command '{}' on line {}", symbol, line_number);
            }
        }
        Ok(())
    }

    /// Recognise `type=<name>` and `total_size=<int>,max_levels=<int>`.
    /// Any other comment is ignored.
    fn apply_header(&mut self, body: &str) {
        if let Some(name) = strip_key(body, HEADER_TYPE_KEY) {
            if self.allocator_seen {
                debug!("Repeated allocator type '{}' ignored", name);
                return;
            }
            self.allocator_seen = true;
            self.header.allocator_name = Some(name.trim().to_string());
            return;
        }

        if strip_key(body, HEADER_TOTAL_SIZE_KEY).is_none() {
            return;
        }

        let Some((total_size, max_levels)) = parse_capacity_header(body) else {
            warn!("Ignoring malformed capacity header: {}", body);
            return;
        };

        if self.capacity_seen {
            debug!("Repeated capacity header ignored: {}", body);
            return;
        }
        self.capacity_seen = true;
        self.header.total_size = total_size;
        self.header.max_levels = max_levels;
    }

    /// Rejects, without counting the operation, a successful allocation
    /// that would push the live byte count past `u64::MAX`.
    fn record_allocation(
        &mut self,
        index: i64,
        size: u64,
        success: bool,
        fragmentation: u64,
    ) -> Result<(), LineError> {
        if !success {
            let operation_index = self.next_operation_index();
            let free_bytes = self.header.total_size.checked_sub(self.allocated_bytes);
            if free_bytes.is_some_and(|free| free >= size) {
                debug!(
                    "Operation {}: allocation of {} bytes failed with {} bytes free",
                    operation_index,
                    size,
                    free_bytes.unwrap_or_default()
                );
                self.failure_indices.push(operation_index);
            }
            return Ok(());
        }

        // A live block at this index is replaced, so its bytes leave first
        let replaced = self.live.get(&index).copied().unwrap_or(0);
        let allocated = (self.allocated_bytes - replaced)
            .checked_add(size)
            .ok_or(LineError::ByteCountOverflow {
                size,
                allocated: self.allocated_bytes,
            })?;

        let operation_index = self.next_operation_index();
        if let Some(previous) = self.live.insert(index, size) {
            debug!(
                "Operation {}: index {} reallocated while live ({} -> {} bytes)",
                operation_index, index, previous, size
            );
        }
        self.allocated_bytes = allocated;

        self.push_outcome(OperationKind::Allocation, size, fragmentation);
        Ok(())
    }

    fn record_free(&mut self, index: i64, success: bool, fragmentation: u64) {
        self.next_operation_index();

        if !success {
            return;
        }

        let released = self.live.remove(&index).unwrap_or(0);
        self.allocated_bytes -= released;

        self.push_outcome(OperationKind::Free, released, fragmentation);
    }

    /// Index of the operation being observed, then advance the counter
    fn next_operation_index(&mut self) -> usize {
        let index = self.operation_count as usize;
        self.operation_count += 1;
        index
    }

    fn push_outcome(&mut self, kind: OperationKind, size: u64, fragmentation: u64) {
        self.outcomes.push(EventOutcome {
            sequence_position: self.outcomes.len(),
            kind,
            size,
            allocated_bytes_after: self.allocated_bytes,
            fragmentation,
        });
    }
}

fn require_fields(command: char, fields: &[&str], expected: usize) -> Result<(), LineError> {
    if fields.len() < expected {
        return Err(LineError::TooFewFields {
            command,
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, LineError> {
    value.parse().map_err(|_| LineError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// `0` is success, any other status is a failure
fn is_success(status: &str) -> bool {
    status == STATUS_SUCCESS || status.parse::<i64>().is_ok_and(|s| s == 0)
}

/// Value after `<key>=` when `body` starts with that key
fn strip_key<'a>(body: &'a str, key: &str) -> Option<&'a str> {
    body.strip_prefix(key)?.trim_start().strip_prefix('=')
}

/// Parse exactly `total_size=<int>,max_levels=<int>`
fn parse_capacity_header(body: &str) -> Option<(u64, u64)> {
    let (total, levels) = body.split_once(FIELD_SEPARATOR)?;
    let total_size = strip_key(total.trim(), HEADER_TOTAL_SIZE_KEY)?.trim().parse().ok()?;
    let max_levels = strip_key(levels.trim(), HEADER_MAX_LEVELS_KEY)?.trim().parse().ok()?;
    Some((total_size, max_levels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_allocation() {
        let line = parse_line(" a, 3, 128, 0, 16 ").unwrap();
        assert_eq!(
            line,
            TraceLine::Allocation {
                index: 3,
                size: 128,
                success: true,
                fragmentation: 16,
            }
        );
    }

    #[test]
    fn test_parse_line_failed_free() {
        let line = parse_line("f,7,1,0").unwrap();
        assert_eq!(
            line,
            TraceLine::Free {
                index: 7,
                success: false,
                fragmentation: 0,
            }
        );
    }

    #[test]
    fn test_parse_line_short_allocation() {
        let err = parse_line("a,1,64,0").unwrap_err();
        assert_eq!(
            err,
            LineError::TooFewFields {
                command: 'a',
                expected: 5,
                found: 4,
            }
        );
    }

    #[test]
    fn test_parse_line_bad_number() {
        let err = parse_line("a,x,64,0,0").unwrap_err();
        assert!(matches!(err, LineError::InvalidField { field: "index", .. }));
    }

    #[test]
    fn test_parse_line_comment_and_unknown() {
        assert_eq!(parse_line("#  type=slab ").unwrap(), TraceLine::Comment("type=slab"));
        assert_eq!(parse_line("z,1,2").unwrap(), TraceLine::Unknown("z"));
        assert_eq!(parse_line("   ").unwrap(), TraceLine::Blank);
    }

    #[test]
    fn test_non_zero_status_is_failure() {
        assert!(is_success("0"));
        assert!(!is_success("1"));
        assert!(!is_success("-1"));
        assert!(!is_success("err"));
    }

    #[test]
    fn test_parse_timing_footer() {
        let footer =
            parse_timing_footer("# elapsed_seconds=2.5 user_seconds=1.25 sys_seconds=0.5").unwrap();
        assert_eq!(footer.elapsed_seconds, 2.5);
        assert_eq!(footer.user_seconds, 1.25);
        assert_eq!(footer.sys_seconds, 0.5);
    }

    #[test]
    fn test_parse_timing_footer_rejects_other_lines() {
        assert!(parse_timing_footer("a,0,1,0,0").is_none());
        assert!(parse_timing_footer("# elapsed_seconds=1.0").is_none());
        assert!(parse_timing_footer("# user_seconds=1 elapsed_seconds=1 sys_seconds=1").is_none());
        assert!(parse_timing_footer("# elapsed_seconds=-1 user_seconds=1 sys_seconds=1").is_none());
    }

    #[test]
    fn test_context_reallocation_keeps_sum() {
        let mut context = ParseContext::new();
        context.process_line(1, "a,0,100,0,0");
        context.process_line(2, "a,0,40,0,0");
        assert_eq!(context.allocated_bytes(), 40);
        assert_eq!(context.live_blocks(), 1);
    }

    #[test]
    fn test_context_header_first_write_wins() {
        let mut context = ParseContext::new();
        context.process_line(1, "# type=buddy");
        context.process_line(2, "# total_size=1024,max_levels=5");
        context.process_line(3, "# type=slab");
        context.process_line(4, "# total_size=9,max_levels=1");
        assert_eq!(context.header().allocator_label(), "buddy");
        assert_eq!(context.header().total_size, 1024);
        assert_eq!(context.header().max_levels, 5);
    }

    #[test]
    fn test_context_ignores_other_key_value_comments() {
        let mut context = ParseContext::new();
        context.process_line(1, "# seed=1,total_size=99");
        context.process_line(2, "# max_levels=3");
        context.process_line(3, "# total_size=64");
        context.process_line(4, "# allocator type=slab");
        assert_eq!(context.header(), &TraceHeader::default());

        context.process_line(5, "# total_size = 2048 , max_levels = 4");
        assert_eq!(context.header().total_size, 2048);
        assert_eq!(context.header().max_levels, 4);
    }

    #[test]
    fn test_parse_capacity_header() {
        assert_eq!(parse_capacity_header("total_size=1024,max_levels=5"), Some((1024, 5)));
        assert_eq!(parse_capacity_header("total_size=1024"), None);
        assert_eq!(parse_capacity_header("total_size=x,max_levels=5"), None);
        assert_eq!(parse_capacity_header("max_levels=5,total_size=1024"), None);
    }

    #[test]
    fn test_context_rejects_byte_count_overflow() {
        let mut context = ParseContext::new();
        context.process_line(1, &format!("a,0,{},0,0", u64::MAX));
        context.process_line(2, "a,1,10,0,0");
        assert_eq!(context.allocated_bytes(), u64::MAX);
        assert_eq!(context.live_blocks(), 1);

        // Replacing the live block itself still fits
        context.process_line(3, "a,0,10,0,0");
        assert_eq!(context.allocated_bytes(), 10);
    }
}
