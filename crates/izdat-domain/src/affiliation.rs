//! Affiliation rows referenced by authors

use crate::bilingual::Bilingual;
use serde::{Deserialize, Serialize};

/// An institution an author can reference. The id is unique within the
/// owning article and never reassigned after deletion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub id: u32,
    pub name: Bilingual,
}

impl Affiliation {
    pub fn new(id: u32, name: Bilingual) -> Self {
        Self { id, name }
    }
}
