//! Flag types and identifiers attached to tree nodes.

bitflags::bitflags! {
    /// Flags for tree nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE              = 0;
        const LET               = 1 << 0;
        const CONST             = 1 << 1;
        const OPTIONAL_CHAIN    = 1 << 2;
        /// The node was parsed across an error and is partly synthesized.
        const THIS_NODE_HAS_ERROR = 1 << 3;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();
    }
}

bitflags::bitflags! {
    /// Modifier flags for functions and class members.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const NONE      = 0;
        const STATIC    = 1 << 0;
        const ASYNC     = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Flags describing how a token was scanned.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                  = 0;
        const PRECEDING_LINE_BREAK  = 1 << 0;
        const UNTERMINATED          = 1 << 1;
        const SCIENTIFIC            = 1 << 2;
        const HEX_SPECIFIER         = 1 << 3;
        const BINARY_SPECIFIER      = 1 << 4;
        const OCTAL_SPECIFIER       = 1 << 5;
        const CONTAINS_SEPARATOR    = 1 << 6;
        /// The word contained a `\u` escape sequence.
        const UNICODE_ESCAPE        = 1 << 7;
        const IS_INVALID            = 1 << 8;
    }
}

/// Identity of a node within one parsed file. Comment attachment and the
/// documentation walker key their side tables on this.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::INVALID
    }
}
