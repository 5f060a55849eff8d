//! Override block parser using nom
//!
//! This parser handles the docstring override format:
//! - `<override namespace="...">` blocks
//! - optional `<signature>` and `<paramnames>` elements
//! - required `<description>` bodies taken verbatim
//! - `#` line comments between blocks
//!
//! Parsing is strict: the first malformed block aborts the load with a
//! line-numbered [`ParseError`].

use lazy_static::lazy_static;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0},
    sequence::delimited,
    IResult,
};
use regex::Regex;

use super::record::{OverrideRecord, ParamName};

lazy_static! {
    // Dotted identifier path: segments of [A-Za-z_][A-Za-z0-9_]* joined by '.'
    static ref NAMESPACE_PATTERN: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap();
}

/// Error type for parsing failures, with 1-based source lines
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: expected an <override> block")]
    ExpectedBlock { line: u32 },
    #[error("line {line}: <override> block is missing a well-formed namespace attribute")]
    MissingNamespace { line: u32 },
    #[error("line {line}: invalid namespace {namespace:?}")]
    InvalidNamespace { namespace: String, line: u32 },
    #[error("line {line}: expected an element or </override> in block {namespace:?}")]
    MalformedBlock { namespace: String, line: u32 },
    #[error("line {line}: unknown element <{tag}> in block {namespace:?}")]
    UnknownElement {
        tag: String,
        namespace: String,
        line: u32,
    },
    #[error("line {line}: duplicate element <{tag}> in block {namespace:?}")]
    DuplicateElement {
        tag: String,
        namespace: String,
        line: u32,
    },
    #[error("line {line}: unterminated <{tag}> element in block {namespace:?}")]
    UnterminatedElement {
        tag: String,
        namespace: String,
        line: u32,
    },
    #[error("line {line}: malformed <paramnames> list in block {namespace:?}")]
    MalformedParamNames { namespace: String, line: u32 },
    #[error("line {line}: block {namespace:?} has no <description>")]
    MissingDescription { namespace: String, line: u32 },
    #[error("line {line}: unterminated <override> block {namespace:?}")]
    UnterminatedBlock { namespace: String, line: u32 },
}

/// Parse an override source file into records, in source order
pub fn parse(input: &str) -> Result<Vec<OverrideRecord>, ParseError> {
    let mut records = Vec::new();
    let mut remaining = input;
    let mut line = 1u32;

    loop {
        let (rest, skipped) = skip_blank_and_comments(remaining);
        line += count_lines(skipped);
        remaining = rest;

        if remaining.is_empty() {
            return Ok(records);
        }
        if !remaining.starts_with("<override") {
            return Err(ParseError::ExpectedBlock { line });
        }

        let (rest, record) = parse_block(remaining, line)?;
        line += count_lines(consumed(remaining, rest));
        remaining = rest;
        records.push(record);
    }
}

/// The prefix of `before` that was consumed to reach `after`
fn consumed<'a>(before: &'a str, after: &'a str) -> &'a str {
    &before[..before.len() - after.len()]
}

fn count_lines(s: &str) -> u32 {
    s.matches('\n').count() as u32
}

/// Skip whitespace and `#` line comments, return remaining input and skipped text
fn skip_blank_and_comments(input: &str) -> (&str, &str) {
    let mut pos = 0;
    let bytes = input.as_bytes();

    while pos < bytes.len() {
        if bytes[pos].is_ascii_whitespace() {
            pos += 1;
        } else if bytes[pos] == b'#' {
            while pos < bytes.len() && bytes[pos] != b'\n' {
                pos += 1;
            }
        } else {
            break;
        }
    }

    (&input[pos..], &input[..pos])
}

/// Parse one `<override>` block starting at `start_line`
fn parse_block(input: &str, start_line: u32) -> Result<(&str, OverrideRecord), ParseError> {
    let (rest, namespace) = parse_open_tag(input, start_line)?;
    let mut line = start_line + count_lines(consumed(input, rest));
    let mut remaining = rest;

    let mut signature: Option<String> = None;
    let mut param_names: Option<Vec<ParamName>> = None;
    let mut description: Option<String> = None;

    loop {
        let trimmed = remaining.trim_start();
        line += count_lines(consumed(remaining, trimmed));
        remaining = trimmed;

        if remaining.is_empty() {
            return Err(ParseError::UnterminatedBlock { namespace, line });
        }

        if let Some(rest) = remaining.strip_prefix("</override>") {
            let description = description.ok_or(ParseError::MissingDescription {
                namespace: namespace.clone(),
                line,
            })?;
            let record = OverrideRecord {
                namespace,
                signature,
                param_names: param_names.unwrap_or_default(),
                description,
                line: start_line,
            };
            return Ok((rest, record));
        }

        let (rest, element) = match element_open(remaining) {
            Ok(parsed) => parsed,
            Err(_) => return Err(ParseError::MalformedBlock { namespace, line }),
        };

        if !matches!(element, "signature" | "paramnames" | "description") {
            return Err(ParseError::UnknownElement {
                tag: element.to_string(),
                namespace,
                line,
            });
        }

        let close = format!("</{}>", element);
        let end = match rest.find(&close) {
            Some(end) => end,
            None => {
                return Err(ParseError::UnterminatedElement {
                    tag: element.to_string(),
                    namespace,
                    line,
                })
            }
        };
        let body = &rest[..end];
        let after = &rest[end + close.len()..];

        let duplicate = match element {
            "signature" => signature.is_some(),
            "paramnames" => param_names.is_some(),
            _ => description.is_some(),
        };
        if duplicate {
            return Err(ParseError::DuplicateElement {
                tag: element.to_string(),
                namespace,
                line,
            });
        }

        match element {
            "signature" => signature = Some(body.trim().to_string()),
            "paramnames" => {
                param_names = Some(parse_paramname_list(body).ok_or_else(|| {
                    ParseError::MalformedParamNames {
                        namespace: namespace.clone(),
                        line,
                    }
                })?);
            }
            _ => description = Some(trim_body(body)),
        }

        line += count_lines(consumed(remaining, after));
        remaining = after;
    }
}

/// Parse `<override namespace="...">` and validate the namespace
fn parse_open_tag(input: &str, line: u32) -> Result<(&str, String), ParseError> {
    match open_tag(input) {
        Ok((rest, Some(namespace))) => {
            if !NAMESPACE_PATTERN.is_match(namespace) {
                return Err(ParseError::InvalidNamespace {
                    namespace: namespace.to_string(),
                    line,
                });
            }
            Ok((rest, namespace.to_string()))
        }
        Ok((_, None)) | Err(_) => Err(ParseError::MissingNamespace { line }),
    }
}

/// Parse the open tag, returning the namespace attribute value if present
fn open_tag(input: &str) -> IResult<&str, Option<&str>> {
    let (rest, _) = tag("<override")(input)?;
    let (rest, _) = multispace0(rest)?;
    if let Some(rest) = rest.strip_prefix('>') {
        return Ok((rest, None));
    }
    let (rest, _) = tag("namespace")(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, namespace) = quoted(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('>')(rest)?;
    Ok((rest, Some(namespace)))
}

/// Parse `<name>` for a child element
fn element_open(input: &str) -> IResult<&str, &str> {
    delimited(
        char('<'),
        take_while1(|c: char| c.is_ascii_alphanumeric()),
        char('>'),
    )(input)
}

/// Parse a quoted value, single or double quotes
fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c| c != '"' && c != '\n'), char('"')),
        delimited(
            char('\''),
            take_while(|c| c != '\'' && c != '\n'),
            char('\''),
        ),
    ))(input)
}

/// Parse a bracketed list of quoted parameter tokens
fn parse_paramname_list(input: &str) -> Option<Vec<ParamName>> {
    let mut rest = input.trim_start().strip_prefix('[')?;
    let mut names = Vec::new();

    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix(']') {
            if !after.trim().is_empty() {
                return None;
            }
            return Some(names);
        }

        let (after, token) = quoted(rest).ok()?;
        let param = ParamName::from_token(token);
        if param.name.is_empty() {
            return None;
        }
        names.push(param);

        rest = after.trim_start();
        if let Some(after_comma) = rest.strip_prefix(',') {
            rest = after_comma;
        } else if !rest.starts_with(']') {
            return None;
        }
    }
}

/// Trim the element body down to the authored text: drop the indentation
/// before the closing tag and the newlines adjoining both tags, keep
/// everything in between verbatim
fn trim_body(body: &str) -> String {
    body.trim_end_matches([' ', '\t'])
        .trim_matches(['\n', '\r'])
        .to_string()
}
