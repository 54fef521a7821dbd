//! Node and modifier flag bits.

pub mod node_flags {
    pub const NONE: u16 = 0;
    pub const LET: u16 = 1 << 0;
    pub const CONST: u16 = 1 << 1;
    /// Set on property/element access and call nodes that are part of a `?.` chain.
    pub const OPTIONAL_CHAIN: u16 = 1 << 2;
    /// Inside a `declare` context; no bodies.
    pub const AMBIENT: u16 = 1 << 3;
    pub const THIS_NODE_HAS_ERROR: u16 = 1 << 4;
    pub const BLOCK_SCOPED: u16 = LET | CONST;
}

pub mod modifier_flags {
    pub const NONE: u32 = 0;
    pub const EXPORT: u32 = 1 << 0;
    pub const AMBIENT: u32 = 1 << 1;
    pub const DEFAULT: u32 = 1 << 2;
    pub const CONST: u32 = 1 << 3;
    pub const PUBLIC: u32 = 1 << 4;
    pub const PRIVATE: u32 = 1 << 5;
    pub const PROTECTED: u32 = 1 << 6;
    pub const READONLY: u32 = 1 << 7;
    pub const STATIC: u32 = 1 << 8;
    pub const ABSTRACT: u32 = 1 << 9;
    pub const ASYNC: u32 = 1 << 10;
    pub const OVERRIDE: u32 = 1 << 11;
    pub const PARAMETER_PROPERTY_MODIFIERS: u32 = PUBLIC | PRIVATE | PROTECTED | READONLY | OVERRIDE;
}
