//! Keyword vocabularies for the co-occurrence heuristics.
//!
//! Entries are single lowercase word tokens, compared against the output of
//! the tokenizer, so inflected forms are listed explicitly.

/// Words that mark a character as dead when they appear near the name.
pub const DEATH_WORDS: &[&str] = &[
    "died", "dies", "dead", "death", "killed", "slain", "bitten", "devoured", "eaten", "mauled",
    "perished", "perishes", "succumbed", "succumbs", "lifeless", "dragged", "torn", "impaled",
    "crushed", "drowned", "drowns", "executed", "murdered", "consumed", "swarmed", "overwhelmed",
    "decapitated", "disemboweled",
];

/// Words that, right before a death word, cancel it ("nearly bitten").
pub const DEATH_NEGATORS: &[&str] = &[
    "nearly", "almost", "narrowly", "not", "never", "avoids", "avoided", "escapes", "escaped",
    "dodges", "dodged", "barely",
];

/// Helpful acts.
pub const HELPFUL_WORDS: &[&str] = &[
    "helps", "helped", "helping", "saves", "saved", "rescues", "rescued", "shields", "shielded",
    "protects", "protected", "carries", "carried", "bandages", "bandaged", "heals", "healed",
    "defends", "defended", "assists", "assisted", "guides", "guided",
];

/// Resourceful acts.
pub const RESOURCEFUL_WORDS: &[&str] = &[
    "improvises", "improvised", "rigs", "rigged", "builds", "built", "crafts", "crafted",
    "fashions", "fashioned", "scavenges", "scavenged", "repairs", "repaired", "fixes", "fixed",
    "hotwires", "hotwired", "barricades", "barricaded", "devises", "devised", "jury-rigs",
    "jury-rigged", "maps", "mapped", "salvages", "salvaged",
];

/// Sinister acts.
pub const SINISTER_WORDS: &[&str] = &[
    "betrays", "betrayed", "abandons", "abandoned", "steals", "stole", "stolen", "shoves",
    "shoved", "sabotages", "sabotaged", "hoards", "hoarded", "threatens", "threatened", "lies",
    "lied", "trips", "tripped", "deceives", "deceived",
];

/// Dignified acts.
pub const DIGNIFIED_WORDS: &[&str] = &[
    "sacrifices", "sacrificed", "refuses", "refused", "honors", "honored", "forgives",
    "forgave", "apologizes", "apologized", "calmly", "composed", "bravely", "resolute",
    "steadfast", "stands", "dignity", "gracefully",
];

/// Signs of two characters bonding.
pub const BOND_WORDS: &[&str] = &[
    "together", "hug", "hugs", "hugged", "embrace", "embraces", "embraced", "comforts",
    "comforted", "trusts", "trusted", "laughs", "laughed", "shares", "shared", "reassures",
    "reassured", "thanks", "thanked", "teams", "side",
];

/// Signs of two characters clashing.
pub const CONFLICT_WORDS: &[&str] = &[
    "argue", "argues", "argued", "argument", "shouts", "shouted", "yells", "yelled", "blames",
    "blamed", "fights", "fought", "accuses", "accused", "glares", "glared", "snaps", "snapped",
    "clash", "clashes", "clashed", "resents", "resented", "confronts", "confronted",
];

/// Whether `token` is in `vocab`.
#[must_use]
pub fn contains(vocab: &[&str], token: &str) -> bool {
    vocab.contains(&token)
}
