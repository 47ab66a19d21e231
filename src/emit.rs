//! Indentation-aware line writer for generated source.

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub(crate) struct Emitter {
    out: String,
    depth: usize,
}

impl Emitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current depth. An empty line carries no indent.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `text` (usually ending in `{`) and indent what follows.
    pub(crate) fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedent and write `text` (usually starting with `}`).
    pub(crate) fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    /// Drop trailing empty lines, keeping the final newline.
    pub(crate) fn trim_blank(&mut self) {
        while self.out.ends_with("\n\n") {
            self.out.pop();
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_blocks() {
        let mut e = Emitter::new();
        e.open("fn f() {");
        e.open("if x {");
        e.line("y();");
        e.close("}");
        e.blank();
        e.close("}");
        assert_eq!(e.finish(), "fn f() {\n    if x {\n        y();\n    }\n\n}\n");
    }

    #[test]
    fn trim_blank_keeps_one_newline() {
        let mut e = Emitter::new();
        e.line("a");
        e.blank();
        e.blank();
        e.trim_blank();
        assert_eq!(e.finish(), "a\n");
    }
}
