//! The standard cast.

use crate::character::{Character, Gender};

/// Every character a fresh game starts with, in roster order.
pub const CATALOG: &[Character] = &[
    Character {
        name: "Shaun Sadsarin",
        age: 23,
        gender: Gender::Male,
        traits: &["protective", "stubborn", "quick with a blade"],
        siblings: &["Addison Sadsarin"],
        likely_pairs: &["Jordan", "Dylan Vo"],
        likely_conflicts: &["Marcus Hale"],
    },
    Character {
        name: "Addison Sadsarin",
        age: 20,
        gender: Gender::Female,
        traits: &["resourceful", "sharp-tongued", "light sleeper"],
        siblings: &["Shaun Sadsarin"],
        likely_pairs: &["Ella Muy", "Kate Nguyen"],
        likely_conflicts: &["Benny Lim"],
    },
    Character {
        name: "Jordan",
        age: 22,
        gender: Gender::Male,
        traits: &["loyal", "reckless", "cracks jokes under pressure"],
        siblings: &[],
        likely_pairs: &["Shaun Sadsarin", "Nico Alvarez"],
        likely_conflicts: &["Tess Okafor"],
    },
    Character {
        name: "Ella Muy",
        age: 21,
        gender: Gender::Female,
        traits: &["calm", "observant", "trained in first aid"],
        siblings: &["Vivian Muy"],
        likely_pairs: &["Addison Sadsarin", "Priya Raman"],
        likely_conflicts: &["Marcus Hale"],
    },
    Character {
        name: "Vivian Muy",
        age: 19,
        gender: Gender::Female,
        traits: &["curious", "impulsive", "fast runner"],
        siblings: &["Ella Muy"],
        likely_pairs: &["Benny Lim"],
        likely_conflicts: &["Dylan Vo"],
    },
    Character {
        name: "Dylan Vo",
        age: 24,
        gender: Gender::Male,
        traits: &["mechanic", "pragmatic", "quietly anxious"],
        siblings: &[],
        likely_pairs: &["Shaun Sadsarin", "Tess Okafor"],
        likely_conflicts: &["Vivian Muy"],
    },
    Character {
        name: "Kate Nguyen",
        age: 22,
        gender: Gender::Female,
        traits: &["strategic", "blunt", "keeps a map of everything"],
        siblings: &[],
        likely_pairs: &["Addison Sadsarin", "Marcus Hale"],
        likely_conflicts: &["Nico Alvarez"],
    },
    Character {
        name: "Marcus Hale",
        age: 25,
        gender: Gender::Male,
        traits: &["domineering", "strong", "hoards supplies"],
        siblings: &[],
        likely_pairs: &["Kate Nguyen"],
        likely_conflicts: &["Shaun Sadsarin", "Ella Muy"],
    },
    Character {
        name: "Priya Raman",
        age: 23,
        gender: Gender::Female,
        traits: &["empathetic", "stubbornly honest", "chemistry student"],
        siblings: &[],
        likely_pairs: &["Ella Muy", "Tess Okafor"],
        likely_conflicts: &["Benny Lim"],
    },
    Character {
        name: "Nico Alvarez",
        age: 21,
        gender: Gender::Male,
        traits: &["charming", "opportunistic", "good climber"],
        siblings: &[],
        likely_pairs: &["Jordan"],
        likely_conflicts: &["Kate Nguyen"],
    },
    Character {
        name: "Tess Okafor",
        age: 24,
        gender: Gender::Female,
        traits: &["disciplined", "former lifeguard", "distrustful"],
        siblings: &[],
        likely_pairs: &["Dylan Vo", "Priya Raman"],
        likely_conflicts: &["Jordan"],
    },
    Character {
        name: "Benny Lim",
        age: 20,
        gender: Gender::Male,
        traits: &["nervous", "inventive", "talks to himself"],
        siblings: &[],
        likely_pairs: &["Vivian Muy"],
        likely_conflicts: &["Addison Sadsarin", "Priya Raman"],
    },
];
