use serde::{Deserialize, Serialize};

/// Unique identifier for an animatable entity (player, ball, opponent) in a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

/// Unique identifier for a drawn path in a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_numbers() {
        assert_eq!(serde_json::to_string(&EntityId(7)).unwrap(), "7");
        let id: PathId = serde_json::from_str("12").unwrap();
        assert_eq!(id, PathId(12));
    }
}
