//! Declarative description of a rendered form and its post-render effects.
//!
//! The rendering layer decides how to focus a field; this module only says
//! which one, so every surface behaves the same.

/// Post-render behaviour a form asks the rendering layer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Focus the first input element of the form once it is mounted.
    AutofocusFirstInput,
}

impl Capability {
    /// Stable tag the rendering layer keys the effect on.
    pub fn tag(self) -> &'static str {
        match self {
            Capability::AutofocusFirstInput => "autofocus-first-input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Input,
    Select,
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Name used by field bindings (`set <name> <value>`).
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

/// Fields of a form, in display order, plus requested capabilities.
#[derive(Debug, Clone, Copy)]
pub struct FormLayout {
    pub fields: &'static [FieldDescriptor],
    pub capabilities: &'static [Capability],
}

impl FormLayout {
    /// The field to focus after the form is mounted, if any.
    pub fn focus_target(&self) -> Option<&FieldDescriptor> {
        if !self.capabilities.contains(&Capability::AutofocusFirstInput) {
            return None;
        }
        self.fields.iter().find(|field| field.kind == FieldKind::Input)
    }
}
