//! Scalar attribute types the generator can bind.
//!
//! One row per spec type drives all three emission sites: record fields,
//! the sparse encoder and the reply decoder. Adding a scalar is a one-line
//! edit to [`SCALARS`] plus the matching runtime accessor.

/// How the encoder decides a field holds its default and can be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultTest {
    /// Numeric: omitted when `== 0`. Passed to the encoder by value.
    Zero,
    /// Text: omitted when empty. Passed to the encoder by reference.
    Empty,
}

/// Mapping for one scalar spec type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalar {
    /// Type name as written in the spec.
    pub spec: &'static str,
    /// Rust type of the record field.
    pub field: &'static str,
    /// Name shared by `AttributeEncoder::<accessor>` and
    /// `Attribute::<accessor>` in the runtime.
    pub accessor: &'static str,
    pub default: DefaultTest,
}

pub const SCALARS: &[Scalar] = &[
    Scalar { spec: "u8", field: "u8", accessor: "u8", default: DefaultTest::Zero },
    Scalar { spec: "u16", field: "u16", accessor: "u16", default: DefaultTest::Zero },
    Scalar { spec: "u32", field: "u32", accessor: "u32", default: DefaultTest::Zero },
    Scalar { spec: "u64", field: "u64", accessor: "u64", default: DefaultTest::Zero },
    Scalar { spec: "nul-string", field: "String", accessor: "string", default: DefaultTest::Empty },
];

/// Look up a spec type; `None` for nested, array and other unmodeled types.
pub fn scalar(spec_type: &str) -> Option<&'static Scalar> {
    SCALARS.iter().find(|s| s.spec == spec_type)
}

impl Scalar {
    /// Condition under which `expr` must be written to the wire.
    pub fn present_condition(&self, expr: &str) -> String {
        match self.default {
            DefaultTest::Zero => format!("{} != 0", expr),
            DefaultTest::Empty => format!("!{}.is_empty()", expr),
        }
    }

    /// Argument form of `expr` for the encoder call.
    pub fn encode_arg(&self, expr: &str) -> String {
        match self.default {
            DefaultTest::Zero => expr.to_string(),
            DefaultTest::Empty => format!("&{}", expr),
        }
    }
}
