use thiserror::Error;

use crate::{algorithm::AlgorithmKind, compat::Incompatibility, geometry::Vector2};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// The sheet can't grow to fit the next item with the given constraints.
    /// Nothing placed before this error should be relied upon.
    #[error("ran out of space: cannot fit an item of size {item} in a {sheet} sheet")]
    OutOfSpace { item: Vector2, sheet: Vector2 },

    /// The settings ask for something the algorithm can't do. Returned before
    /// any item is placed.
    #[error(
        "algorithm {algorithm} is incompatible with the given settings: {}",
        join_reasons(.reasons)
    )]
    Incompatible {
        algorithm: AlgorithmKind,
        reasons: Vec<Incompatibility>,
    },

    #[error(transparent)]
    MalformedInput(#[from] MalformedInput),
}

/// Inputs rejected before any sorting or placement happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error("item {index} has a zero-sized dimension ({size})")]
    ZeroSizedItem { index: usize, size: Vector2 },

    #[error("the sheet {axis} was fixed to zero")]
    ZeroSizedSheet { axis: Axis },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Axis::Width => formatter.write_str("width"),
            Axis::Height => formatter.write_str("height"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm named '{name}'")]
pub struct UnknownAlgorithm {
    pub name: String,
}

fn join_reasons(reasons: &[Incompatibility]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
