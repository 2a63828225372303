use crate::{IdentityCounter, StringTable};

/// State shared by every parse and reparse of one editing session.
///
/// Reusing a session across calls amortizes interning. A fresh session starts
/// from an empty string table and a zeroed identity counter, so results do
/// not depend on unrelated earlier work.
#[derive(Debug, Default)]
pub struct Session {
    pub strings: StringTable,
    pub identities: IdentityCounter,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
