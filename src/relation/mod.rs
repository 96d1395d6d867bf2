//! Named kinship relations between two individuals.
//!
//! `classifier` derives one canonical `RelationTag` for an ordered pair;
//! `label` turns a tag into a sex-specific word for display.

mod classifier;
mod label;

pub use classifier::RelationClassifier;
pub use label::humanize;

use std::fmt;

use serde::Serialize;

/// What `a` is to `b` for an ordered query `classify(a, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "relation", rename_all = "kebab-case")]
pub enum RelationTag {
    Spouse,
    Parent,
    Child,
    Sibling,
    Grandparent,
    Grandchild,
    StepParent,
    StepChild,
    HalfSibling,
    StepSibling,
    /// Direct-line ancestor three or more generations up.
    Ancestor { generations: usize },
    /// Direct-line descendant three or more generations down.
    Descendant { generations: usize },
    /// Sibling of an ancestor; `removal` 1 is a plain aunt or uncle.
    AuntOrUncle { removal: usize },
    NieceOrNephew { removal: usize },
    Cousin { degree: usize, removal: usize },
    NoRelation,
}

impl RelationTag {
    /// Derive the collateral relation from the distances to the closest
    /// common ancestor.
    pub fn from_common_ancestor(distance_a: usize, distance_b: usize) -> Self {
        let degree = distance_a.min(distance_b).saturating_sub(1);
        let removal = distance_a.abs_diff(distance_b);
        match (degree, removal) {
            (0, 0) => RelationTag::Sibling,
            (0, removal) if distance_a < distance_b => RelationTag::AuntOrUncle { removal },
            (0, removal) => RelationTag::NieceOrNephew { removal },
            (degree, removal) => RelationTag::Cousin { degree, removal },
        }
    }

    /// Cousin degree and removal, for cousin tags only.
    pub fn cousinship(&self) -> Option<(usize, usize)> {
        match self {
            RelationTag::Cousin { degree, removal } => Some((*degree, *removal)),
            _ => None,
        }
    }

    /// The tag describing `b` relative to `a` when this tag describes `a`
    /// relative to `b`.
    pub fn inverse(&self) -> Self {
        match *self {
            RelationTag::Parent => RelationTag::Child,
            RelationTag::Child => RelationTag::Parent,
            RelationTag::Grandparent => RelationTag::Grandchild,
            RelationTag::Grandchild => RelationTag::Grandparent,
            RelationTag::StepParent => RelationTag::StepChild,
            RelationTag::StepChild => RelationTag::StepParent,
            RelationTag::Ancestor { generations } => RelationTag::Descendant { generations },
            RelationTag::Descendant { generations } => RelationTag::Ancestor { generations },
            RelationTag::AuntOrUncle { removal } => RelationTag::NieceOrNephew { removal },
            RelationTag::NieceOrNephew { removal } => RelationTag::AuntOrUncle { removal },
            other => other,
        }
    }
}

impl fmt::Display for RelationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationTag::Spouse => f.write_str("spouse"),
            RelationTag::Parent => f.write_str("parent"),
            RelationTag::Child => f.write_str("child"),
            RelationTag::Sibling => f.write_str("sibling"),
            RelationTag::Grandparent => f.write_str("grandparent"),
            RelationTag::Grandchild => f.write_str("grandchild"),
            RelationTag::StepParent => f.write_str("step-parent"),
            RelationTag::StepChild => f.write_str("step-child"),
            RelationTag::HalfSibling => f.write_str("half-sibling"),
            RelationTag::StepSibling => f.write_str("step-sibling"),
            RelationTag::Ancestor { generations } => {
                write!(f, "{}grandparent", great_prefix(generations.saturating_sub(2)))
            }
            RelationTag::Descendant { generations } => {
                write!(f, "{}grandchild", great_prefix(generations.saturating_sub(2)))
            }
            RelationTag::AuntOrUncle { removal } => {
                write!(f, "{}aunt/uncle", great_prefix(removal.saturating_sub(1)))
            }
            RelationTag::NieceOrNephew { removal } => {
                write!(f, "{}niece/nephew", great_prefix(removal.saturating_sub(1)))
            }
            RelationTag::Cousin { degree, removal: 0 } => write!(f, "{} cousin", ordinal(*degree)),
            RelationTag::Cousin { degree, removal } => {
                write!(f, "{} cousin, {} removed", ordinal(*degree), ordinal(*removal))
            }
            RelationTag::NoRelation => f.write_str("no relationship found"),
        }
    }
}

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, ...
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// "" for 0, "great-" for 1, "2nd great-" for 2, ...
pub(crate) fn great_prefix(greats: usize) -> String {
    match greats {
        0 => String::new(),
        1 => "great-".to_string(),
        n => format!("{} great-", ordinal(n)),
    }
}
