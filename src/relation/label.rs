//! Sex-specific display words for relation tags.

use super::{great_prefix, RelationTag};
use crate::model::Sex;

/// Render `tag` for a subject of the given sex.
///
/// The subject is the first individual of the classified pair. Half and step
/// siblings render as plain brother or sister; the tag keeps the distinction.
/// Unknown sex, cousins and "no relationship" fall back to the neutral wording.
pub fn humanize(tag: &RelationTag, subject_sex: Sex) -> String {
    let (male, female) = match *tag {
        RelationTag::Spouse => ("husband", "wife"),
        RelationTag::Parent => ("father", "mother"),
        RelationTag::Child => ("son", "daughter"),
        RelationTag::Sibling | RelationTag::HalfSibling | RelationTag::StepSibling => {
            ("brother", "sister")
        }
        RelationTag::Grandparent => ("grandfather", "grandmother"),
        RelationTag::Grandchild => ("grandson", "granddaughter"),
        RelationTag::StepParent => ("stepfather", "stepmother"),
        RelationTag::StepChild => ("stepson", "stepdaughter"),
        RelationTag::Ancestor { generations } => {
            let greats = generations.saturating_sub(2);
            return prefixed(tag, subject_sex, greats, "grandfather", "grandmother");
        }
        RelationTag::Descendant { generations } => {
            let greats = generations.saturating_sub(2);
            return prefixed(tag, subject_sex, greats, "grandson", "granddaughter");
        }
        RelationTag::AuntOrUncle { removal } => {
            return prefixed(tag, subject_sex, removal.saturating_sub(1), "uncle", "aunt");
        }
        RelationTag::NieceOrNephew { removal } => {
            return prefixed(tag, subject_sex, removal.saturating_sub(1), "nephew", "niece");
        }
        RelationTag::Cousin { .. } | RelationTag::NoRelation => return tag.to_string(),
    };

    match subject_sex {
        Sex::Male => male.to_string(),
        Sex::Female => female.to_string(),
        Sex::Unknown => tag.to_string(),
    }
}

fn prefixed(tag: &RelationTag, sex: Sex, greats: usize, male: &str, female: &str) -> String {
    match sex {
        Sex::Male => format!("{}{}", great_prefix(greats), male),
        Sex::Female => format!("{}{}", great_prefix(greats), female),
        Sex::Unknown => tag.to_string(),
    }
}
