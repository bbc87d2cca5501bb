//! Length bounds for record fields, measured in characters.

pub const MAX_NAME_CHARS: usize = 20;
pub const MAX_DESCRIPTION_CHARS: usize = 100;
pub const MAX_ADDRESS_CHARS: usize = 42;

/// Upper bounds applied by the field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    pub name: usize,
    pub description: usize,
    pub address: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            name: MAX_NAME_CHARS,
            description: MAX_DESCRIPTION_CHARS,
            address: MAX_ADDRESS_CHARS,
        }
    }
}
