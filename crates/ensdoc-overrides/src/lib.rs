//! Docstring override registry for the EnSight scripting API
//!
//! EnSight's documentation generator extracts call signatures automatically;
//! this crate handles the hand-authored override blocks that supplement or
//! replace what extraction gets wrong. It parses override source files into
//! an immutable in-memory registry keyed by dotted namespace, with exact
//! lookup, advisory validation, canonical re-formatting, and JSON export.
//!
//! Features:
//! - Strict, line-numbered parser for `<override>` blocks
//! - Exact namespace lookup, no fuzzy or prefix matching
//! - Duplicate namespaces rejected at load time
//! - Advisory signature/paramnames consistency checks
//! - Round-trip canonical formatting
//!
//! ```
//! use ensdoc_overrides::OverrideRegistry;
//!
//! let source = r#"
//! <override namespace="ensight.batch">
//! <description>
//! True if EnSight is running in batch mode.
//! </description>
//! </override>
//! "#;
//! let registry = OverrideRegistry::load_str(source).unwrap();
//! let record = registry.lookup("ensight.batch").unwrap();
//! assert_eq!(record.description, "True if EnSight is running in batch mode.");
//! ```

mod formatter;
pub mod parser;
mod record;
mod registry;
mod validate;

pub use formatter::{format_record, format_records};
pub use parser::{parse, ParseError};
pub use record::{OverrideRecord, ParamName};
pub use registry::{OverrideRegistry, RegistryError};
pub use validate::{validate, Warning, WarningKind};
