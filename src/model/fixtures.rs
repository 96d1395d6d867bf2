//! Reference family shared by unit tests.
//!
//! ```text
//!   I1 John ═ I2 Mary                I1 John ═ I5 Joan ═ I13 William
//!          │                                 │           │
//!    ┌─────┴──────┐                      I7 Edward   I12 Annette
//!  I3 Thomas    I4 Anne ═ I9 Richard
//!  ═ I8 Alice           │
//!     │             I997 Judith
//!  I6 Sam
//!     │
//!  I14 Kit                               I998 (unrelated)
//! ```

use super::{Dataset, FamilyUnit, Individual, Sex};

pub(crate) fn reference_individuals() -> Vec<Individual> {
    vec![
        Individual::new("I1", "John Smith", Sex::Male)
            .with_birth(Some("14 MAR 1920"), Some("New York, USA"))
            .with_death(Some("15 JUN 1995"), Some("New York, USA")),
        Individual::new("I2", "Mary Jones", Sex::Female).with_birth(Some("1925"), None),
        Individual::new("I3", "Thomas Smith", Sex::Male).with_birth(Some("1950-05-20"), None),
        Individual::new("I4", "Anne Smith", Sex::Female),
        Individual::new("I5", "Joan Hart", Sex::Female),
        Individual::new("I6", "Sam Smith", Sex::Unknown).with_birth(Some("ABT 1980"), None),
        Individual::new("I7", "Edward Smith", Sex::Male),
        Individual::new("I8", "Alice Brown", Sex::Female),
        Individual::new("I9", "Richard Quiney", Sex::Male),
        Individual::new("I12", "Annette Hart", Sex::Female),
        Individual::new("I13", "William Hart", Sex::Male),
        Individual::new("I14", "Kit Smith", Sex::Male).with_birth(Some("2 FEB 2010"), None),
        Individual::new("I997", "Judith Quiney", Sex::Female),
        Individual::new("I998", "Unrelated Stranger", Sex::Unknown),
    ]
}

pub(crate) fn reference_families() -> Vec<FamilyUnit> {
    vec![
        FamilyUnit::new("F1")
            .with_husband("I1")
            .with_wife("I2")
            .with_marriage_date("1 JAN 1950")
            .with_child("I3")
            .with_child("I4"),
        FamilyUnit::new("F2").with_husband("I1").with_wife("I5").with_child("I7"),
        FamilyUnit::new("F3").with_husband("I3").with_wife("I8").with_child("I6"),
        FamilyUnit::new("F4").with_husband("I9").with_wife("I4").with_child("I997"),
        FamilyUnit::new("F5").with_husband("I13").with_wife("I5").with_child("I12"),
        FamilyUnit::new("F6").with_wife("I6").with_child("I14"),
    ]
}

pub(crate) fn reference_dataset() -> Dataset {
    Dataset::new(reference_individuals(), reference_families())
}
