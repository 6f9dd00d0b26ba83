//! Message-level choices the surrounding class emitter passes down to field
//! generators.

/// The access modifier applied to emitted members.
#[non_exhaustive]
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub enum AccessLevel {
    /// Members are `public`.
    #[default]
    Public,
    /// Members are `internal`.
    Internal,
}

impl AccessLevel {
    /// The C# access modifier keyword.
    pub fn modifier(&self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            AccessLevel::Internal => "internal",
        }
    }
}

/// Per-message generator options.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Access modifier for emitted members.
    pub access_level: AccessLevel,
    /// Whether to emit `Has`/`Clear` members for fields with explicit
    /// presence.
    pub presence_api: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            access_level: AccessLevel::Public,
            presence_api: true,
        }
    }
}
