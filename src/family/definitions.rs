//! Compiled-in family membership and descriptive text.

use crate::family::Family;

/// Member symbols declared for one family.
#[derive(Clone, Copy, Debug)]
pub struct FamilyDefinition<'a> {
    pub family: Family,
    pub members: &'a [&'a str],
}

/// Single-element dopants seen in the catalyst data, grouped by family.
pub const STANDARD_FAMILIES: [FamilyDefinition<'static>; 6] = [
    FamilyDefinition {
        family: Family::Alkali,
        members: &["K", "Li", "Cs", "Na", "Rb"],
    },
    FamilyDefinition {
        family: Family::AlkaliEarth,
        members: &["Ca", "Sr", "Ba", "Mg"],
    },
    FamilyDefinition {
        family: Family::TransitionMetal,
        members: &["Fe", "Cr", "Mn"],
    },
    FamilyDefinition {
        family: Family::Triel,
        members: &["Al"],
    },
    FamilyDefinition {
        family: Family::Halogen,
        members: &["Cl", "F", "Br"],
    },
    FamilyDefinition {
        family: Family::Lanthanide,
        members: &["Yb", "Lu", "La"],
    },
];

pub(crate) fn description(family: Family) -> &'static str {
    match family {
        Family::Alkali => {
            "Alkali metals: shiny and soft enough to cut with a knife, these metals start with \
             lithium (Li) and end with francium (Fr). They are extremely reactive and will burst \
             into flame or even explode on contact with water, so chemists store them in oils or \
             inert gases."
        }
        Family::AlkaliEarth => {
            "Alkali earth metals: each of these elements has two electrons in its outermost \
             energy level, which makes them reactive enough that they are rarely found alone in \
             nature. They are less reactive than the alkali metals; their reactions typically \
             occur more slowly and produce less heat."
        }
        Family::TransitionMetal => {
            "Transition metals: hard but malleable, shiny, and good conductors, these elements \
             are what you typically think of when you hear the word metal. Gold, silver, iron \
             and platinum all live here."
        }
        Family::Triel => {
            "Triels: these elements share some of the classic characteristics of the transition \
             metals, but they tend to be softer and conduct more poorly."
        }
        Family::Halogen => {
            "Halogens: quite chemically reactive, the halogens tend to pair up with alkali metals \
             to produce salts. Table salt, for example, is a marriage between the alkali metal \
             sodium and the halogen chlorine."
        }
        Family::Lanthanide => {
            "Lanthanides: the elements in this group have a silvery white color and tarnish on \
             contact with air."
        }
    }
}
