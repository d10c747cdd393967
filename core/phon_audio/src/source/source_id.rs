use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceId(String);

impl From<uuid::Uuid> for SourceId {
    fn from(value: uuid::Uuid) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
