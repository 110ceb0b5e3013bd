use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("artwork '{0}' has an empty id")]
    EmptyId(String),
    #[error("artwork id '{0}' is registered more than once")]
    DuplicateId(String),
}

/// Static metadata plus the drawing routine for one artwork.
#[derive(Debug, Clone)]
pub struct ArtworkDescriptor<R> {
    id: String,
    title: String,
    description: String,
    placeholder: bool,
    routine: R,
}

impl<R> ArtworkDescriptor<R> {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        routine: R,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            placeholder: false,
            routine,
        }
    }

    /// Descriptor for an entry that is listed but not finished yet.
    pub fn placeholder(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        routine: R,
    ) -> Self {
        Self {
            placeholder: true,
            ..Self::new(id, title, description, routine)
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn routine(&self) -> &R {
        &self.routine
    }
}

/// Ordered, immutable list of artworks. Built once at start-up.
#[derive(Debug, Clone)]
pub struct Registry<R> {
    entries: Vec<ArtworkDescriptor<R>>,
}

impl<R> Registry<R> {
    pub fn new(entries: Vec<ArtworkDescriptor<R>>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.id.trim().is_empty() {
                return Err(RegistryError::EmptyId(entry.title.clone()));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(RegistryError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ArtworkDescriptor<R>> {
        self.entries.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&ArtworkDescriptor<R>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtworkDescriptor<R>> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }
}
