//! Fixed storage keys for the persisted aggregates.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Favorites,
    Fridges,
    Theme,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Favorites => "@favorites",
            StoreKey::Fridges => "@my_fridges",
            StoreKey::Theme => "@recetapp:theme",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_keys() {
        assert_eq!(StoreKey::Favorites.as_str(), "@favorites");
        assert_eq!(StoreKey::Fridges.as_str(), "@my_fridges");
        assert_eq!(StoreKey::Theme.as_str(), "@recetapp:theme");
        assert_eq!(StoreKey::Theme.to_string(), "@recetapp:theme");
    }
}
