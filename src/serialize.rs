//! Traits for writing run results to, and reading them back from, JSON strings and files.
//!
//! Implemented for everything serde can handle, so an [Outcome](crate::Outcome),
//! a [Snapshot](crate::Snapshot) or a [Genome](crate::Genome) can all be saved the same way.

use core::error::Error;
use std::{fs, path::Path};

/// Trait for types that can be serialized to JSON strings and files.
pub trait ToJson {
    /// Serialize this value to a pretty printed JSON string.
    fn to_json(&self) -> Result<String, Box<dyn Error>>;

    /// Serialize this value to a file at the given path.
    fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Trait for types that can be deserialized from JSON strings and files.
pub trait FromJson: Sized {
    /// Deserialize this value from a JSON string.
    fn from_json(s: &str) -> Result<Self, Box<dyn Error>>;

    /// Deserialize this value from a file at the given path.
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

impl<T> ToJson for T
where
    T: serde::Serialize,
{
    fn to_json(&self) -> Result<String, Box<dyn Error>> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<T> FromJson for T
where
    T: for<'de> serde::Deserialize<'de>,
{
    fn from_json(s: &str) -> Result<Self, Box<dyn Error>> {
        serde_json::from_str(s).map_err(|op| op.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        generation::Outcome,
        genome::Genome,
        individual::Snapshot,
        maze::Position,
    };

    fn snapshot() -> Snapshot {
        Snapshot {
            fitness: 13.0,
            genome_len: 4,
            genome: "UUDL".parse().unwrap(),
            position: Position::new(2, 1),
        }
    }

    #[test]
    fn test_outcome_file() {
        let outcome = Outcome::Winner {
            generation: 3,
            individual: snapshot(),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outcome.json");
        outcome.to_file(&path).unwrap();
        assert_eq!(outcome, Outcome::from_file(&path).unwrap());
    }

    #[test]
    fn test_outcome_shape() {
        let json = Outcome::Exhausted {
            generations: 1,
            best: Some(snapshot()),
        }
        .to_json()
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!("exhausted", value["outcome"]);
        assert_eq!("UUDL", value["best"]["genome"]);
        assert_eq!(2, value["best"]["position"]["row"]);
    }

    #[test]
    fn test_bad_json() {
        assert!(Genome::from_json("\"UUXD\"").is_err());
        assert!(Snapshot::from_json("{}").is_err());
        assert!(Outcome::from_file("/definitely/not/an/outcome.json").is_err());
    }
}
