//! Per-class penalty weights (`-wLABEL WEIGHT`)

use crate::core::{FieldId, ValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single label/weight pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassWeight {
    pub label: i32,
    pub weight: f64,
}

/// Mapping from class label to weight multiplier for C.
///
/// Labels are unique. Entries keep the order in which labels were first
/// inserted, and that order is the order of the emitted flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ClassWeight>", into = "Vec<ClassWeight>")]
pub struct ClassWeights {
    entries: Vec<ClassWeight>,
}

impl ClassWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight for `label`, returning the previous weight if any.
    /// An existing label keeps its position.
    pub fn insert(&mut self, label: i32, weight: f64) -> Option<f64> {
        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => Some(std::mem::replace(&mut entry.weight, weight)),
            None => {
                self.entries.push(ClassWeight { label, weight });
                None
            }
        }
    }

    pub fn remove(&mut self, label: i32) -> Option<f64> {
        let pos = self.entries.iter().position(|e| e.label == label)?;
        Some(self.entries.remove(pos).weight)
    }

    pub fn get(&self, label: i32) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassWeight> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl From<Vec<ClassWeight>> for ClassWeights {
    fn from(entries: Vec<ClassWeight>) -> Self {
        entries.into_iter().map(|e| (e.label, e.weight)).collect()
    }
}

impl From<ClassWeights> for Vec<ClassWeight> {
    fn from(weights: ClassWeights) -> Self {
        weights.entries
    }
}

impl FromIterator<(i32, f64)> for ClassWeights {
    fn from_iter<I: IntoIterator<Item = (i32, f64)>>(iter: I) -> Self {
        let mut weights = ClassWeights::new();
        for (label, weight) in iter {
            weights.insert(label, weight);
        }
        weights
    }
}

impl FromStr for ClassWeights {
    type Err = ValidationError;

    /// Parse `label:weight` pairs separated by commas or whitespace,
    /// e.g. `"1:2.5, -1:0.5"`. Blank input gives an empty mapping.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut weights = ClassWeights::new();
        for pair in s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            let (label, weight) = parse_pair(pair)?;
            weights.insert(label, weight);
        }
        Ok(weights)
    }
}

/// Parse one `label:weight` pair
pub fn parse_pair(pair: &str) -> Result<(i32, f64), ValidationError> {
    let err = || ValidationError::Parse(FieldId::ClassWeights);
    let (label, weight) = pair.split_once(':').ok_or_else(err)?;
    let label = label.trim().parse::<i32>().map_err(|_| err())?;
    let weight = weight.trim().parse::<f64>().map_err(|_| err())?;
    if !weight.is_finite() {
        return Err(err());
    }
    Ok((label, weight))
}
