//! YAML netlink specification model.
//!
//! A [`Spec`] describes one generic netlink family: its attribute sets and the
//! operations that exchange those attributes with the kernel. Field names map
//! one-to-one onto the keys of the YAML document (`attribute-sets`,
//! `name-prefix`, ...). Keys the model does not capture are ignored.
//!
//! ```text
//! name: nlctrl
//! protocol: genetlink-legacy
//! attribute-sets:
//!   - name: main
//!     name-prefix: ctrl-attr-
//!     attributes:
//!       - name: family-id
//!         type: u16
//! operations:
//!   name-prefix: ctrl-cmd-
//!   list:
//!     - name: getfamily
//!       attribute-set: main
//!       do:
//!         request:
//!           attributes: [ family-id ]
//! ```

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Root of a YAML netlink specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Spec {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uapi_header: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_sets: Vec<AttributeSet>,
    #[serde(default)]
    pub operations: Operations,
}

/// Named, ordered collection of attributes sharing a constant prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AttributeSet {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name_prefix: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

/// A single netlink attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Attribute {
    pub name: String,
    /// Raw spec type, e.g. `u16`, `nul-string` or `array-nest`.
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_value: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub len: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nested_attributes: String,
}

/// All operations of a family, sharing one command constant prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Operations {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name_prefix: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<Operation>,
}

/// One request/reply exchange or one notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Operation {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub attribute_set: String,
    /// Kernel policy validation flags, carried through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dont_validate: Vec<String>,
    /// Set for notification-only operations; names the operation whose reply
    /// layout the notification reuses.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notify: String,
    #[serde(default, rename = "do", skip_serializing_if = "OperationAttributes::is_empty")]
    pub do_: OperationAttributes,
    #[serde(default, skip_serializing_if = "OperationAttributes::is_empty")]
    pub dump: OperationAttributes,
}

/// Request and reply attribute lists of a do or dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationAttributes {
    #[serde(default, skip_serializing_if = "OperationAttributesList::is_empty")]
    pub request: OperationAttributesList,
    #[serde(default, skip_serializing_if = "OperationAttributesList::is_empty")]
    pub reply: OperationAttributesList,
}

impl OperationAttributes {
    /// True when neither the request nor the reply names an attribute.
    pub fn is_empty(&self) -> bool {
        self.request.is_empty() && self.reply.is_empty()
    }
}

/// Attribute names (not resolved records) used by a request or reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationAttributesList {
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl OperationAttributesList {
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Spec {
    /// Tidy every free-text description in place so it can be embedded in a
    /// single-line doc comment.
    pub fn normalize(&mut self) {
        normalize(&mut self.description);
        for set in &mut self.attribute_sets {
            for attr in &mut set.attributes {
                normalize(&mut attr.description);
            }
        }
        for op in &mut self.operations.list {
            normalize(&mut op.description);
        }
    }
}

/// Parse a YAML netlink specification from a reader and normalize it.
pub fn parse<R: Read>(reader: R) -> Result<Spec, Error> {
    let mut spec: Spec = serde_yaml::from_reader(reader)?;
    spec.normalize();
    Ok(spec)
}

/// Parse a YAML netlink specification held in memory.
pub fn parse_str(source: &str) -> Result<Spec, Error> {
    let mut spec: Spec = serde_yaml::from_str(source)?;
    spec.normalize();
    Ok(spec)
}

/// Open and parse a YAML netlink specification file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Spec, Error> {
    let file = File::open(path.as_ref())?;
    parse(std::io::BufReader::new(file))
}

/// Newlines become spaces, no leading or trailing whitespace.
pub fn normalize(s: &mut String) {
    *s = s.replace('\n', " ").trim().to_string();
}
