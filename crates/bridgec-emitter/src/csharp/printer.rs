//! Text printer for [`NamespaceSpec`] trees.
//!
//! ```text
//! using Foundation;
//! namespace Bindings
//! {
//!   using People = Bindings.SharedPerson[];
//!   [BaseType (typeof(Bindings.SharedBase))]
//!   interface SharedPerson : ObjCRuntime.INativeObject
//!   {
//!     [Export ("name")]
//!     string Name { get; }
//!   }
//! }
//! ```

use super::spec::{BodyLayout, InterfaceDeclarationSpec, MemberSpec, NamespaceSpec};

pub struct CSharpPrinter {
    output: String,
    indent_level: u32,
    indent_str: &'static str,
}

impl Default for CSharpPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl CSharpPrinter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: "  ",
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    /// A complete API definition file: the Foundation import plus one namespace.
    pub fn print_file(namespace: &NamespaceSpec) -> String {
        let mut printer = Self::new();
        printer.write_line("using Foundation;");
        printer.print_namespace(namespace);
        printer.finish()
    }

    pub fn print_namespace(&mut self, namespace: &NamespaceSpec) {
        self.write_line(&format!("namespace {}", namespace.name));
        self.write_line("{");
        self.increase_indent();
        for alias in &namespace.aliases {
            self.write_line(&format!("using {} = {};", alias.identifier, alias.target.render(false)));
        }
        for interface in &namespace.interfaces {
            self.print_interface(interface);
        }
        self.decrease_indent();
        self.write_line("}");
    }

    pub fn print_interface(&mut self, interface: &InterfaceDeclarationSpec) {
        if !interface.attributes.is_empty() {
            self.write_line(&interface.attributes.render());
        }
        let mut header = format!("interface {}", interface.identifier);
        if !interface.interfaces.is_empty() {
            let list: Vec<String> = interface.interfaces.iter().map(|ty| ty.render(false)).collect();
            header.push_str(" : ");
            header.push_str(&list.join(", "));
        }
        self.write_line(&header);
        self.write_line("{");
        self.increase_indent();
        for (index, member) in interface.members.iter().enumerate() {
            if index > 0 && interface.layout == BodyLayout::Spaced {
                self.write_blank_line();
            }
            self.print_member(member);
        }
        self.decrease_indent();
        self.write_line("}");
    }

    fn print_member(&mut self, member: &MemberSpec) {
        for attributes in member.attributes.iter().filter(|list| !list.is_empty()) {
            self.write_line(&attributes.render());
        }
        self.write_line(&member.signature.render());
    }

    // =========================================================================
    // Low-level writing
    // =========================================================================

    fn write_line(&mut self, text: &str) {
        self.write_indent();
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn write_blank_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod tests;
