use crate::artifacts::objects::object_type::ObjectType;

/// Mode of a tree entry. Only regular files and subdirectories are tracked.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EntryMode {
    File,
    Directory,
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::File => "100644",
            EntryMode::Directory => "40000",
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    /// Kind of object an entry with this mode references.
    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryMode::File => ObjectType::Blob,
            EntryMode::Directory => ObjectType::Tree,
        }
    }
}

impl TryFrom<&str> for EntryMode {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "100644" => Ok(EntryMode::File),
            "40000" => Ok(EntryMode::Directory),
            _ => Err(format!("unsupported entry mode {value:?}")),
        }
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
