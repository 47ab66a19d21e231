//! # ynlgen: typed bindings from YAML netlink specifications
//!
//! Reads a YAML netlink specification (the format used by the kernel's
//! `Documentation/netlink/specs`) and generates a Rust module with a
//! connection type plus one typed method per `do`/`dump` operation.
//!
//! ## Pipeline
//!
//! - [`spec::parse`]: YAML document to [`Spec`], with description text
//!   flattened to single lines
//! - [`AttributeIndex`]: attribute-set lookup and name resolution
//! - [`generate()`]: emits the module source
//! - [`runtime`]: what the generated module calls at run time
//!
//! ## Attribute types
//!
//! `u8`, `u16`, `u32`, `u64` and `nul-string` become record fields. Any
//! other type (nests, arrays, ...) becomes a `// ynlgen: unimplemented`
//! marker comment so the gap stays visible in the generated source.
//!
//! ## Example
//!
//! ```no_run
//! let spec = ynlgen::spec::parse_file("nlctrl.yaml")?;
//! let code = ynlgen::generate(&spec, &ynlgen::Config::default())?;
//! std::fs::write("src/nlctrl.rs", code)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The generated module is then used as:
//!
//! ```ignore
//! let mut c = nlctrl::Conn::dial(&ynlgen::runtime::DialConfig::default())?;
//! let family = c.do_getfamily(&nlctrl::DoGetfamilyRequest {
//!     family_name: "nlctrl".to_string(),
//!     ..Default::default()
//! })?;
//! let all = c.dump_getfamily()?;
//! c.close()?;
//! ```

mod emit;
pub mod error;
pub mod generate;
pub mod naming;
pub mod resolve;
pub mod runtime;
pub mod spec;
pub mod types;

pub use error::{Error, Inconsistency};
pub use generate::{generate, Channel, Config, UNIMPLEMENTED_MARKER};
pub use resolve::AttributeIndex;
pub use spec::{parse, Spec};
