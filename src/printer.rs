//! A named-variable template sink for emitted C# source.
//!
//! Templates interpolate `$name$` from a binding table built once per field.
//! The printer appends to a caller owned buffer and never reads it back;
//! templates carry their own relative indentation and the surrounding class
//! emitter owns block indentation.

use std::collections::HashMap;

/// Named text fragments available to templates for one field.
///
/// Built once at generator construction and immutable afterwards. Rebinding
/// a name replaces the previous value, which is how the oneof variant swaps
/// presence and member bindings over the plain ones.
#[derive(Clone, Debug, Default)]
pub struct Vars {
    bindings: HashMap<&'static str, String>,
}

impl Vars {
    pub fn new() -> Vars {
        Vars::default()
    }

    /// Binds `name`, replacing any previous binding.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.bindings.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }
}

/// Appends template output to a caller owned string.
pub struct Printer<'a> {
    out: &'a mut String,
}

impl<'a> Printer<'a> {
    pub fn new(out: &'a mut String) -> Printer<'a> {
        Printer { out }
    }

    /// Appends `template` with every `$name$` replaced by its binding and
    /// `$$` replaced by a literal dollar sign.
    ///
    /// Panics when the template names a variable with no binding. Templates
    /// and binding tables are built together, so an unbound name is a defect
    /// in this crate, never in caller data.
    pub fn print(&mut self, vars: &Vars, template: &str) {
        let mut rest = template;
        while let Some(start) = rest.find('$') {
            self.out.push_str(&rest[..start]);
            rest = &rest[start + 1..];
            match rest.find('$') {
                Some(0) => {
                    self.out.push('$');
                    rest = &rest[1..];
                }
                Some(end) => {
                    let name = &rest[..end];
                    match vars.get(name) {
                        Some(value) => self.out.push_str(value),
                        None => panic!("template references unbound variable `{name}`"),
                    }
                    rest = &rest[end + 1..];
                }
                None => panic!("template ends inside a `$` variable reference"),
            }
        }
        self.out.push_str(rest);
    }

    /// Appends `text` verbatim, with no variable substitution.
    pub fn raw(&mut self, text: &str) {
        self.out.push_str(text);
    }
}
