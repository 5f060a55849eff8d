//! Advisory consistency checks over a loaded registry
//!
//! Validation never fails a registry; it reports warnings for records whose
//! descriptive signature disagrees with the paramnames list, and for
//! paramnames lists that are internally inconsistent.

use serde::Serialize;

use crate::record::OverrideRecord;
use crate::registry::OverrideRegistry;

/// What a warning is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// The signature's parameter count disagrees with the paramnames length
    SignatureArityMismatch {
        signature_params: usize,
        param_names: usize,
    },
    /// The signature carries no parenthesized parameter list
    UnparsableSignature,
    /// The same name appears twice in the paramnames list
    DuplicateParamName { name: String },
    /// A positional name follows a keyword-only name
    PositionalAfterKeyword { name: String },
}

/// One advisory finding for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub namespace: String,
    pub line: u32,
    pub kind: WarningKind,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (line {}): ", self.namespace, self.line)?;
        match &self.kind {
            WarningKind::SignatureArityMismatch {
                signature_params,
                param_names,
            } => write!(
                f,
                "signature declares {} parameter(s) but paramnames lists {}",
                signature_params, param_names
            ),
            WarningKind::UnparsableSignature => {
                write!(f, "signature has no parenthesized parameter list")
            }
            WarningKind::DuplicateParamName { name } => {
                write!(f, "parameter {:?} appears more than once", name)
            }
            WarningKind::PositionalAfterKeyword { name } => {
                write!(f, "positional parameter {:?} follows a keyword-only one", name)
            }
        }
    }
}

/// Run all advisory checks over a registry
pub fn validate(registry: &OverrideRegistry) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for record in registry.records() {
        check_record(record, &mut warnings);
    }
    warnings
}

fn check_record(record: &OverrideRecord, warnings: &mut Vec<Warning>) {
    let warn = |kind: WarningKind| Warning {
        namespace: record.namespace.clone(),
        line: record.line,
        kind,
    };

    if let Some(signature) = &record.signature {
        match signature_param_count(signature) {
            Some(count) if count != record.param_names.len() => {
                warnings.push(warn(WarningKind::SignatureArityMismatch {
                    signature_params: count,
                    param_names: record.param_names.len(),
                }));
            }
            Some(_) => {}
            None => warnings.push(warn(WarningKind::UnparsableSignature)),
        }
    }

    let mut seen = std::collections::HashSet::new();
    let mut keyword_seen = false;
    for param in &record.param_names {
        if !seen.insert(param.name.as_str()) {
            warnings.push(warn(WarningKind::DuplicateParamName {
                name: param.name.clone(),
            }));
        }
        if param.keyword_only {
            keyword_seen = true;
        } else if keyword_seen {
            warnings.push(warn(WarningKind::PositionalAfterKeyword {
                name: param.name.clone(),
            }));
        }
    }
}

/// Count the parameters implied by a descriptive signature.
///
/// Takes the first top-level parenthesized group and counts depth-0,
/// comma-separated tokens, skipping a leading `self`/`cls` and the bare
/// `*` and `/` markers. Returns None when no complete group exists.
fn signature_param_count(signature: &str) -> Option<usize> {
    let params = signature_params(signature)?;
    let mut count = 0;
    for (i, token) in params.iter().enumerate() {
        let name = param_token_name(token);
        if name.is_empty() {
            continue;
        }
        if i == 0 && (name == "self" || name == "cls") {
            continue;
        }
        count += 1;
    }
    Some(count)
}

/// Split the first parenthesized group into top-level tokens
fn signature_params(signature: &str) -> Option<Vec<String>> {
    let start = signature.find('(')?;

    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut current = String::new();
    let mut params = Vec::new();
    let mut closed = false;

    for c in signature[start + 1..].chars() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => {
                quote = Some(c);
                current.push(c);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' if depth == 0 => {
                closed = true;
                break;
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                params.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if !closed {
        return None;
    }
    if !current.trim().is_empty() {
        params.push(current.trim().to_string());
    }
    Some(params)
}

/// Leading identifier of a signature token, `*` prefixes stripped
fn param_token_name(token: &str) -> &str {
    let token = token.trim_start_matches('*');
    let end = token
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(token.len());
    &token[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(input: &str) -> OverrideRegistry {
        OverrideRegistry::load_str(input).unwrap()
    }

    #[test]
    fn test_consistent_record_has_no_warnings() {
        let registry = load(
            r#"
<override namespace="ensight.objs.addcallback">
<signature>(target: ENSOBJ, tag: str, method: object, replace: int = 0) -> int</signature>
<paramnames>['target', 'tag', 'method', 'replace=']</paramnames>
<description>
Register a callback.
</description>
</override>
"#,
        );
        assert!(validate(&registry).is_empty());
    }

    #[test]
    fn test_arity_mismatch() {
        let registry = load(
            r#"
<override namespace="ensight.view_transf.rotate">
<signature>(xrot: float, yrot: float, zrot: float) -> int</signature>
<paramnames>['xrot', 'yrot']</paramnames>
<description>
Rotate the view.
</description>
</override>
"#,
        );
        let warnings = validate(&registry);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].kind,
            WarningKind::SignatureArityMismatch {
                signature_params: 3,
                param_names: 2,
            }
        );
        assert_eq!(warnings[0].namespace, "ensight.view_transf.rotate");
    }

    #[test]
    fn test_unparsable_signature() {
        let registry = load(
            r#"
<override namespace="ensight.batch">
<signature>bool property</signature>
<description>
Batch mode flag.
</description>
</override>
"#,
        );
        let warnings = validate(&registry);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnparsableSignature);
    }

    #[test]
    fn test_duplicate_param_name() {
        let registry = load(
            r#"
<override namespace="ensight.part.modify_begin">
<paramnames>['part', 'part']</paramnames>
<description>
Begin part modification.
</description>
</override>
"#,
        );
        let warnings = validate(&registry);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0].kind,
            WarningKind::DuplicateParamName { ref name } if name == "part"
        ));
    }

    #[test]
    fn test_positional_after_keyword() {
        let registry = load(
            r#"
<override namespace="ensight.query.create">
<paramnames>['name', 'record=', 'source']</paramnames>
<description>
Create a query.
</description>
</override>
"#,
        );
        let warnings = validate(&registry);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0].kind,
            WarningKind::PositionalAfterKeyword { ref name } if name == "source"
        ));
    }

    #[test]
    fn test_signature_param_count_edge_cases() {
        assert_eq!(signature_param_count("() -> int"), Some(0));
        assert_eq!(signature_param_count("(self, value: float) -> None"), Some(1));
        assert_eq!(
            signature_param_count("(mapping: Dict[str, int], flag: bool) -> int"),
            Some(2)
        );
        assert_eq!(
            signature_param_count("(pattern: str = 'a, b', *args) -> int"),
            Some(2)
        );
        assert_eq!(signature_param_count("(a, *, b) -> int"), Some(2));
        assert_eq!(signature_param_count("no parens"), None);
        assert_eq!(signature_param_count("(never closed"), None);
    }
}
