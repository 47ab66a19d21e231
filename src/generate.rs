//! Generate Rust client bindings from a [`Spec`].
//!
//! For every operation whose `do` or `dump` names at least one attribute the
//! generator emits, per variant:
//!
//! - `{Variant}{Op}Request` (when the request lists attributes) and
//!   `{Variant}{Op}Reply` (when the reply lists attributes) record types,
//! - a `Conn::{variant}_{op}` method that sparsely encodes the request,
//!   executes it through the connection's transport and decodes the replies.
//!
//! Notifications are not bound. Attribute types outside the scalar table
//! produce a marker comment ([`UNIMPLEMENTED_MARKER`]) instead of a field.

use crate::emit::Emitter;
use crate::error::Error;
use crate::naming::{self, Direction, Variant};
use crate::resolve::AttributeIndex;
use crate::spec::{Attribute, Operation, OperationAttributes, OperationAttributesList, Spec};
use crate::types::{self, Scalar};
use tracing::{debug, warn};

/// Prefix of the comment emitted for every attribute that has no binding.
pub const UNIMPLEMENTED_MARKER: &str = "ynlgen: unimplemented";

/// How a generated connection finds the family ID it sends requests to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Channel {
    /// Always the generic netlink control family (`GENL_ID_CTRL`).
    #[default]
    Control,
    /// Look the family ID up by spec name when the connection is created.
    ResolveByName,
}

/// Generation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Module name for the generated code. Defaults to the spec name.
    pub package: Option<String>,
    /// Wrap the output in `pub mod <package> { ... }` instead of emitting a
    /// module body for a file of its own.
    pub inline_module: bool,
    /// Path of the module exposing the protocol constants
    /// (`CTRL_ATTR_FAMILY_ID`, ...).
    pub constants: String,
    /// Path of the runtime the generated code links against.
    pub runtime: String,
    pub channel: Channel,
    /// Generic netlink header version sent with every request.
    pub version: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            package: None,
            inline_module: false,
            constants: "libc".to_string(),
            runtime: "ynlgen::runtime".to_string(),
            channel: Channel::Control,
            version: 1,
        }
    }
}

/// Generate bindings for `spec`. Stops at the first inconsistency in the spec
/// and returns no partial output.
pub fn generate(spec: &Spec, cfg: &Config) -> Result<String, Error> {
    if spec.name.trim().is_empty() {
        return Err(Error::EmptyName);
    }
    let mut g = Generator::new(spec, cfg);
    g.header();
    g.conn();
    for op in &spec.operations.list {
        g.op(op)?;
    }
    Ok(g.finish())
}

/// One resolved attribute, with the names used at every emission site.
struct Field<'a> {
    attr: &'a Attribute,
    ident: String,
    /// Constant path of the attribute tag, already cast to `u16`.
    tag: String,
    scalar: Option<&'static Scalar>,
}

impl Field<'_> {
    fn marker(&self) -> String {
        format!(
            "// {} field {:?} of type {:?}",
            UNIMPLEMENTED_MARKER, self.attr.name, self.attr.ty
        )
    }
}

struct Generator<'a> {
    spec: &'a Spec,
    cfg: &'a Config,
    index: AttributeIndex<'a>,
    package: String,
    out: Emitter,
}

impl<'a> Generator<'a> {
    fn new(spec: &'a Spec, cfg: &'a Config) -> Self {
        let package = cfg
            .package
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(spec.name.as_str());
        Generator {
            spec,
            cfg,
            index: AttributeIndex::new(spec),
            package: naming::field_ident(package),
            out: Emitter::new(),
        }
    }

    fn finish(mut self) -> String {
        self.out.trim_blank();
        if self.cfg.inline_module {
            self.out.close("}");
        }
        self.out.finish()
    }

    fn header(&mut self) {
        if self.cfg.inline_module {
            self.out.open(format!("pub mod {} {{", self.package));
        }
        self.out.line(format!(
            "//! Module `{}` is generated from a YAML netlink specification for family {:?}.",
            self.package, self.spec.name
        ));
        if !self.spec.description.is_empty() {
            self.out.line("//!");
            self.out.line(format!("//! Description: {}", self.spec.description));
        }
        self.out.line("//!");
        self.out.line("//! Code generated by ynlgen. DO NOT EDIT.");
        self.out.blank();
        self.out.line(format!("use {} as rt;", self.cfg.runtime));
        self.out.blank();
    }

    fn conn(&mut self) {
        let name = &self.spec.name;
        let o = &mut self.out;

        o.line(format!("/// A Conn is a connection to netlink family {:?}.", name));
        o.line("#[derive(Debug)]");
        o.open("pub struct Conn<T> {");
        o.line("c: T,");
        o.line("family: u16,");
        o.close("}");
        o.blank();

        o.line("#[cfg(target_os = \"linux\")]");
        o.open("impl Conn<rt::GenlSocket> {");
        o.line(format!(
            "/// Dial opens a Conn for netlink family {:?} over a generic netlink socket.",
            name
        ));
        o.open("pub fn dial(cfg: &rt::DialConfig) -> Result<Self, rt::Error> {");
        o.line("let c = rt::GenlSocket::dial(cfg)?;");
        o.line("Self::with_transport(c)");
        o.close("}");
        o.close("}");
        o.blank();

        o.open("impl<T: rt::Transport> Conn<T> {");
        o.line("/// Wraps an open transport.");
        match self.cfg.channel {
            Channel::Control => {
                o.open("pub fn with_transport(c: T) -> Result<Self, rt::Error> {");
                o.open("Ok(Conn {");
                o.line("c,");
                o.line(format!(
                    "family: {} as u16,",
                    naming::constant_path(&self.cfg.constants, "genl-id-", "ctrl")
                ));
                o.close("})");
                o.close("}");
            }
            Channel::ResolveByName => {
                o.open("pub fn with_transport(mut c: T) -> Result<Self, rt::Error> {");
                o.line(format!("let family = rt::resolve_family(&mut c, {:?})?;", name));
                o.line("Ok(Conn { c, family })");
                o.close("}");
            }
        }
        o.blank();
        o.line("/// Family ID requests are sent to.");
        o.open("pub fn family(&self) -> u16 {");
        o.line("self.family");
        o.close("}");
        o.blank();
        o.line("/// Close closes the Conn's underlying transport.");
        o.open("pub fn close(self) -> Result<(), rt::Error> {");
        o.line("self.c.close()");
        o.close("}");
        o.close("}");
        o.blank();
    }

    fn op(&mut self, op: &Operation) -> Result<(), Error> {
        let mut bound = false;
        for variant in Variant::ALL {
            let oas = variant_attributes(op, variant);
            // Only bind variants where the request or reply has at least one
            // attribute.
            if oas.is_empty() {
                continue;
            }
            bound = true;

            let request = self.fields(op, &oas.request)?;
            let reply = self.fields(op, &oas.reply)?;
            debug!(
                operation = %op.name,
                %variant,
                request = request.len(),
                reply = reply.len(),
                "binding operation"
            );

            self.record(op, variant, Direction::Request, &request);
            self.record(op, variant, Direction::Reply, &reply);
            self.method(op, variant, &request, &reply);
        }
        if !bound {
            debug!(operation = %op.name, notify = %op.notify, "no do/dump attributes, not bound");
        }
        Ok(())
    }

    fn fields(
        &self,
        op: &Operation,
        list: &OperationAttributesList,
    ) -> Result<Vec<Field<'a>>, Error> {
        let attrs = self
            .index
            .resolve(&op.attribute_set, &list.attributes)
            .map_err(|e| Error::inconsistent(&op.name, e))?;
        if attrs.is_empty() {
            return Ok(Vec::new());
        }
        let prefix = self
            .index
            .name_prefix(&op.attribute_set)
            .map_err(|e| Error::inconsistent(&op.name, e))?;

        Ok(attrs
            .into_iter()
            .map(|attr| Field {
                attr,
                ident: naming::field_ident(&attr.name),
                tag: format!(
                    "{} as u16",
                    naming::constant_path(&self.cfg.constants, prefix, &attr.name)
                ),
                scalar: types::scalar(&attr.ty),
            })
            .collect())
    }

    fn record(&mut self, op: &Operation, variant: Variant, direction: Direction, fields: &[Field]) {
        if fields.is_empty() {
            return;
        }
        let name = naming::record_ident(variant, &op.name, direction);
        let method = naming::method_ident(variant, &op.name);
        let o = &mut self.out;

        o.line(format!("/// {} is used with the `Conn::{}` method.", name, method));
        o.line("#[derive(Debug, Clone, Default, PartialEq, Eq)]");
        o.open(format!("pub struct {} {{", name));
        for f in fields {
            match f.scalar {
                Some(s) => {
                    if !f.attr.description.is_empty() {
                        o.line(format!("/// {}", f.attr.description));
                    }
                    o.line(format!("pub {}: {},", f.ident, s.field));
                }
                None => {
                    warn!(
                        record = %name,
                        field = %f.attr.name,
                        ty = %f.attr.ty,
                        "attribute type has no binding"
                    );
                    if !f.attr.description.is_empty() {
                        o.line(format!("// {}", f.attr.description));
                    }
                    o.line(f.marker());
                }
            }
        }
        o.close("}");
        o.blank();
    }

    fn method(&mut self, op: &Operation, variant: Variant, request: &[Field], reply: &[Field]) {
        let stem = naming::operation_ident(variant, &op.name);
        let method = naming::method_ident(variant, &op.name);
        let reply_type = naming::record_ident(variant, &op.name, Direction::Reply);

        let params = if request.is_empty() {
            "&mut self".to_string()
        } else {
            format!(
                "&mut self, {}: &{}",
                if has_binding(request) { "req" } else { "_req" },
                naming::record_ident(variant, &op.name, Direction::Request)
            )
        };
        let ret = match (variant, reply.is_empty()) {
            (_, true) => "()".to_string(),
            (Variant::Do, false) => reply_type.clone(),
            (Variant::Dump, false) => format!("Vec<{}>", reply_type),
        };
        // Without reply attributes a do only hears back through an ack.
        let flags = match (variant, reply.is_empty()) {
            (Variant::Do, false) => "rt::Flags::REQUEST",
            (Variant::Do, true) => "rt::Flags::REQUEST | rt::Flags::ACK",
            (Variant::Dump, _) => "rt::Flags::REQUEST | rt::Flags::DUMP",
        };

        self.out.open("impl<T: rt::Transport> Conn<T> {");
        self.out
            .line(format!("/// {} wraps the {:?} operation:", stem, op.name));
        if !op.description.is_empty() {
            self.out.line(format!("/// {}", op.description));
        }
        self.out.open(format!(
            "pub fn {}({}) -> Result<{}, rt::Error> {{",
            method, params, ret
        ));

        self.encoder(request);

        let command = naming::constant_path(
            &self.cfg.constants,
            &self.spec.operations.name_prefix,
            &op.name,
        );
        let o = &mut self.out;
        o.open("let msg = rt::Message {");
        o.open("header: rt::Header {");
        o.line(format!("command: {} as u8,", command));
        o.line(format!("version: {},", self.cfg.version));
        o.close("},");
        o.line("data: b,");
        o.close("};");
        o.blank();

        if reply.is_empty() {
            o.line(format!("self.c.execute(msg, self.family, {})?;", flags));
            o.line("Ok(())");
        } else {
            o.line(format!(
                "let msgs = self.c.execute(msg, self.family, {})?;",
                flags
            ));
            o.blank();
            self.decoder(variant, &reply_type, reply);
        }

        self.out.close("}");
        self.out.close("}");
        self.out.blank();
    }

    /// Sparse encoder: zero and empty fields stay off the wire.
    fn encoder(&mut self, request: &[Field]) {
        let o = &mut self.out;
        if request.is_empty() {
            o.line("// No attribute arguments.");
            o.line("let b = Vec::new();");
            o.blank();
            return;
        }

        if !has_binding(request) {
            for f in request {
                o.line(f.marker());
            }
            o.line("let b = Vec::new();");
            o.blank();
            return;
        }

        o.line("let mut ae = rt::AttributeEncoder::new();");
        for f in request {
            let Some(s) = f.scalar else {
                o.line(f.marker());
                continue;
            };
            let value = format!("req.{}", f.ident);
            o.open(format!("if {} {{", s.present_condition(&value)));
            o.line(format!(
                "ae.{}({}, {});",
                s.accessor,
                f.tag,
                s.encode_arg(&value)
            ));
            o.close("}");
        }
        o.line("let b = ae.encode()?;");
        o.blank();
    }

    fn decoder(&mut self, variant: Variant, reply_type: &str, reply: &[Field]) {
        let o = &mut self.out;
        o.line("let mut replies = Vec::with_capacity(msgs.len());");
        o.open("for m in &msgs {");
        let binding = if has_binding(reply) { "let mut reply" } else { "let reply" };
        o.line(format!("{} = {}::default();", binding, reply_type));
        o.open("for attr in rt::AttributeDecoder::new(&m.data) {");
        o.line("let attr = attr?;");
        o.open("match attr.kind() {");
        for f in reply {
            match f.scalar {
                Some(s) => o.line(format!(
                    "k if k == {} => reply.{} = attr.{}()?,",
                    f.tag, f.ident, s.accessor
                )),
                None => o.line(f.marker()),
            }
        }
        o.line("_ => {}");
        o.close("}");
        o.close("}");
        o.line("replies.push(reply);");
        o.close("}");
        o.blank();

        match variant {
            Variant::Do => {
                o.open("if replies.len() != 1 {");
                o.open("return Err(rt::Error::ExpectedOne {");
                o.line(format!("family: {:?},", self.spec.name));
                o.line(format!("record: {:?},", reply_type));
                o.line("got: replies.len(),");
                o.close("});");
                o.close("}");
                o.line("Ok(replies.remove(0))");
            }
            Variant::Dump => o.line("Ok(replies)"),
        }
    }
}

/// True when at least one field has a binding.
fn has_binding(fields: &[Field]) -> bool {
    fields.iter().any(|f| f.scalar.is_some())
}

fn variant_attributes(op: &Operation, variant: Variant) -> &OperationAttributes {
    match variant {
        Variant::Do => &op.do_,
        Variant::Dump => &op.dump,
    }
}
