use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default message extracted from source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    pub message: String,
    pub description: Option<String>,
    /// Where the message was first declared.
    pub file: PathBuf,
    pub line: usize,
}

/// Conflicting declaration found while inserting into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMessage {
    pub id: String,
    pub existing: MessageDescriptor,
}

/// Message id to default message, ordered by id.
///
/// Filled by the extraction stage and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: BTreeMap<String, MessageDescriptor>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a message.
    ///
    /// Re-declaring an id with the same message is a no-op; a different
    /// message for an existing id is rejected and the first one is kept.
    pub fn insert(
        &mut self,
        id: String,
        descriptor: MessageDescriptor,
    ) -> Result<(), DuplicateMessage> {
        match self.messages.get(&id) {
            Some(existing) if existing.message != descriptor.message => Err(DuplicateMessage {
                id,
                existing: existing.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                self.messages.insert(id, descriptor);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&MessageDescriptor> {
        self.messages.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.messages.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageDescriptor)> {
        self.messages.iter().map(|(id, d)| (id.as_str(), d))
    }
}
