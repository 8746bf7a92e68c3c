//! Sort configuration

use std::fmt;

/// The column a table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    Name,
    Email,
}

impl SortKey {
    /// All keys, in column order.
    pub const ALL: [SortKey; 3] = [SortKey::Id, SortKey::Name, SortKey::Email];

    /// The field name this key refers to.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
        }
    }

    /// Column header text.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Email => "Email",
        }
    }

}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The active sort key and direction.
///
/// Starts unsorted and ascending. This is transient UI state and is never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
    /// The sorted column, or `None` to keep store order.
    pub key: Option<SortKey>,
    /// Direction applied when `key` is set.
    pub direction: SortDirection,
}

impl SortConfig {
    /// Creates a configuration sorted by `key` in `direction`.
    pub fn by(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Returns the configuration after the user asks to sort by `key`.
    ///
    /// Asking for the current key while ascending switches to descending.
    /// Any other request sorts ascending by `key`.
    pub fn toggled(self, key: SortKey) -> Self {
        let direction = match (self.key, self.direction) {
            (Some(current), SortDirection::Asc) if current == key => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self::by(key, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unsorted_ascending() {
        let config = SortConfig::default();
        assert_eq!(config.key, None);
        assert_eq!(config.direction, SortDirection::Asc);
    }

    #[test]
    fn test_toggle_same_key_flips() {
        let config = SortConfig::default().toggled(SortKey::Name);
        assert_eq!(config, SortConfig::by(SortKey::Name, SortDirection::Asc));

        let config = config.toggled(SortKey::Name);
        assert_eq!(config, SortConfig::by(SortKey::Name, SortDirection::Desc));

        let config = config.toggled(SortKey::Name);
        assert_eq!(config, SortConfig::by(SortKey::Name, SortDirection::Asc));
    }

    #[test]
    fn test_toggle_other_key_resets_to_ascending() {
        let config = SortConfig::by(SortKey::Name, SortDirection::Desc).toggled(SortKey::Email);
        assert_eq!(config, SortConfig::by(SortKey::Email, SortDirection::Asc));
    }
}
