use serde::Deserialize;

/// A distribution offered in the create form.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Distro {
    pub name: String,
    pub image: String,
}

impl Distro {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// Ordered list of distros the user can pick from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistroCatalog {
    entries: Vec<Distro>,
}

impl Default for DistroCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                Distro::new("Ubuntu", "ubuntu:latest"),
                Distro::new("Debian", "debian:latest"),
            ],
        }
    }
}

impl DistroCatalog {
    /// Builds a catalog from configured entries.
    ///
    /// Entries with a blank name or image are dropped and later duplicates of a
    /// name are ignored. An empty result yields the built-in catalog.
    pub fn from_entries(entries: Vec<Distro>) -> Self {
        let mut kept: Vec<Distro> = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = entry.name.trim();
            let image = entry.image.trim();
            if name.is_empty() || image.is_empty() {
                tracing::warn!(name, image, "ignoring incomplete distro entry");
                continue;
            }
            if kept.iter().any(|distro| distro.name == name) {
                tracing::warn!(name, "ignoring duplicate distro entry");
                continue;
            }
            kept.push(Distro::new(name, image));
        }

        if kept.is_empty() {
            Self::default()
        } else {
            Self { entries: kept }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Distro> {
        self.entries.get(index)
    }

    pub fn image_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|distro| distro.name == name)
            .map(|distro| distro.image.as_str())
    }

    /// Next selection, cycling through "nothing selected".
    pub fn next(&self, current: Option<usize>) -> Option<usize> {
        match current {
            None if self.entries.is_empty() => None,
            None => Some(0),
            Some(idx) if idx + 1 < self.entries.len() => Some(idx + 1),
            Some(_) => None,
        }
    }

    /// Previous selection, cycling through "nothing selected".
    pub fn prev(&self, current: Option<usize>) -> Option<usize> {
        match current {
            None => self.entries.len().checked_sub(1),
            Some(0) => None,
            Some(idx) => Some(idx - 1),
        }
    }
}
