//! Bastion events
//!
//! A d100 roll is mapped through a weighted cumulative table to an event
//! template. Some templates carry a sub-table that is resolved with a second
//! die. Resolution is a pure function of the two rolls; `roll_event` only
//! draws the dice.

use crate::identity::EventId;
use crate::rng::GameRng;
use crate::turn::Turn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Die used for the primary event roll
pub const EVENT_DIE: u32 = 100;

/// Kind of a logged bastion event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    AllIsWell,
    Attack,
    CriminalHireling,
    ExtraordinaryOpportunity,
    FriendlyVisitors,
    Guest,
    LostHirelings,
    MagicalDiscovery,
    Refugees,
    RequestForAid,
    Treasure,
    /// Not on the random table: logged when an order finishes
    OrderCompleted,
}

impl EventKind {
    /// Events that need no follow-up from the players
    pub fn auto_resolves(&self) -> bool {
        matches!(self, EventKind::AllIsWell)
    }
}

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
}

/// Text available in every supported language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub fr: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, fr: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            fr: fr.into(),
        }
    }

    /// Text in the requested language
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Fr => &self.fr,
        }
    }
}

/// The outcome of a table lookup, before it is logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledEvent {
    pub kind: EventKind,
    pub roll: u32,
    pub sub_roll: Option<u32>,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub mechanics: Option<String>,
}

/// Resolve a primary d100 roll and an optional sub-table roll
///
/// Out-of-range rolls are clamped to the die. A missing secondary roll on a
/// template with a sub-table yields the template's generic text.
pub fn resolve_event(primary: u32, secondary: Option<u32>) -> RolledEvent {
    let roll = primary.clamp(1, EVENT_DIE);
    let template = pick_weighted(EVENT_TABLE, |t| t.weight, roll);

    let sub = template
        .sub_table
        .zip(secondary)
        .map(|(table, sub_roll)| {
            let sub_roll = sub_roll.clamp(1, table.die);
            (sub_roll, pick_weighted(table.entries, |e| e.weight, sub_roll))
        });

    match sub {
        Some((sub_roll, entry)) => RolledEvent {
            kind: template.kind,
            roll,
            sub_roll: Some(sub_roll),
            title: LocalizedText::new(
                format!("{}: {}", template.title.0, entry.title.0),
                format!("{} : {}", template.title.1, entry.title.1),
            ),
            description: entry.description.into(),
            mechanics: entry.mechanics.or(template.mechanics).map(str::to_string),
        },
        None => RolledEvent {
            kind: template.kind,
            roll,
            sub_roll: None,
            title: template.title.into(),
            description: template.description.into(),
            mechanics: template.mechanics.map(str::to_string),
        },
    }
}

/// Roll on the event table, including a sub-table roll when one applies
pub fn roll_event(rng: &mut GameRng) -> RolledEvent {
    let primary = rng.roll_die(EVENT_DIE);
    let secondary = sub_table_die(primary).map(|die| rng.roll_die(die));
    resolve_event(primary, secondary)
}

/// Die rolled for the sub-table reached by `primary`, if it has one
pub fn sub_table_die(primary: u32) -> Option<u32> {
    event_template(primary).sub_table.map(|table| table.die)
}

fn event_template(primary: u32) -> &'static EventTemplate {
    pick_weighted(EVENT_TABLE, |t| t.weight, primary.clamp(1, EVENT_DIE))
}

/// Walk the cumulative weights until `roll` falls inside an entry
fn pick_weighted<T>(entries: &[T], weight: impl Fn(&T) -> u32, roll: u32) -> &T {
    let mut upper = 0;
    for entry in entries {
        upper += weight(entry);
        if roll <= upper {
            return entry;
        }
    }
    // Tables are never empty and rolls are clamped to the table total
    &entries[entries.len() - 1]
}

/// An entry in the bastion's event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BastionEvent {
    pub id: EventId,
    pub turn: Turn,
    /// Primary die roll; zero for events not drawn from the table
    pub roll: u32,
    pub sub_roll: Option<u32>,
    pub kind: EventKind,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub mechanics: Option<String>,
    pub resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl BastionEvent {
    /// Log a table result; all-is-well results are resolved immediately
    pub fn from_roll(id: EventId, turn: Turn, rolled: RolledEvent, now: DateTime<Utc>) -> Self {
        let resolved = rolled.kind.auto_resolves();
        Self {
            id,
            turn,
            roll: rolled.roll,
            sub_roll: rolled.sub_roll,
            kind: rolled.kind,
            title: rolled.title,
            description: rolled.description,
            mechanics: rolled.mechanics,
            resolved,
            resolved_at: resolved.then_some(now),
            created_at: now,
        }
    }

    /// Log the completion of a facility order
    pub fn order_completed(
        id: EventId,
        turn: Turn,
        facility: &str,
        order: &str,
        mechanics: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            turn,
            roll: 0,
            sub_roll: None,
            kind: EventKind::OrderCompleted,
            title: LocalizedText::new(
                format!("Order completed: {}", facility),
                format!("Ordre terminé : {}", facility),
            ),
            description: LocalizedText::new(
                format!("{} has finished: {}.", facility, order),
                format!("{} a terminé : {}.", facility, order),
            ),
            mechanics,
            resolved: false,
            resolved_at: None,
            created_at: now,
        }
    }

    /// Mark the event as dealt with; resolving twice keeps the first stamp
    pub fn resolve(&mut self, now: DateTime<Utc>) {
        if !self.resolved {
            self.resolved = true;
            self.resolved_at = Some(now);
        }
    }
}

type StaticText = (&'static str, &'static str);

impl From<StaticText> for LocalizedText {
    fn from((en, fr): StaticText) -> Self {
        LocalizedText::new(en, fr)
    }
}

struct EventTemplate {
    kind: EventKind,
    weight: u32,
    title: StaticText,
    description: StaticText,
    mechanics: Option<&'static str>,
    sub_table: Option<&'static SubTable>,
}

struct SubTable {
    die: u32,
    entries: &'static [SubEntry],
}

struct SubEntry {
    weight: u32,
    title: StaticText,
    description: StaticText,
    mechanics: Option<&'static str>,
}

static EVENT_TABLE: &[EventTemplate] = &[
    EventTemplate {
        kind: EventKind::AllIsWell,
        weight: 50,
        title: ("All Is Well", "Tout va bien"),
        description: (
            "Nothing of note disturbs the bastion this turn.",
            "Rien de notable ne trouble le bastion ce tour-ci.",
        ),
        mechanics: None,
        sub_table: Some(&ALL_IS_WELL),
    },
    EventTemplate {
        kind: EventKind::Attack,
        weight: 5,
        title: ("Attack", "Attaque"),
        description: (
            "A hostile force attacks the bastion but is defeated.",
            "Une force hostile attaque le bastion mais est repoussée.",
        ),
        mechanics: Some(
            "Roll 6d6; one defender dies for each 1. With no defenders, a random facility is shut down next turn.",
        ),
        sub_table: None,
    },
    EventTemplate {
        kind: EventKind::CriminalHireling,
        weight: 3,
        title: ("Criminal Hireling", "Employé criminel"),
        description: (
            "One of the bastion's hirelings has a criminal past that has caught up with them.",
            "Le passé criminel d'un employé du bastion le rattrape.",
        ),
        mechanics: Some("Pay a 1d6 x 100 gp bribe or lose the hireling."),
        sub_table: None,
    },
    EventTemplate {
        kind: EventKind::ExtraordinaryOpportunity,
        weight: 5,
        title: ("Extraordinary Opportunity", "Occasion extraordinaire"),
        description: (
            "The bastion is offered a chance to host a festival, fund research or appease a noble.",
            "On propose au bastion d'accueillir une fête, de financer des recherches ou d'apaiser un noble.",
        ),
        mechanics: Some(
            "Spend 500 gp to take the opportunity; otherwise roll again on this table.",
        ),
        sub_table: None,
    },
    EventTemplate {
        kind: EventKind::FriendlyVisitors,
        weight: 9,
        title: ("Friendly Visitors", "Visiteurs amicaux"),
        description: (
            "Friendly visitors come to use one of the bastion's facilities.",
            "Des visiteurs amicaux viennent profiter d'une installation du bastion.",
        ),
        mechanics: Some("The visitors pay 1d6 x 100 gp."),
        sub_table: None,
    },
    EventTemplate {
        kind: EventKind::Guest,
        weight: 4,
        title: ("Guest", "Invité"),
        description: (
            "A guest arrives and asks to stay at the bastion.",
            "Un invité arrive et demande à séjourner au bastion.",
        ),
        mechanics: None,
        sub_table: Some(&GUEST),
    },
    EventTemplate {
        kind: EventKind::LostHirelings,
        weight: 3,
        title: ("Lost Hirelings", "Employés perdus"),
        description: (
            "A facility's hirelings vanish or quit.",
            "Les employés d'une installation disparaissent ou démissionnent.",
        ),
        mechanics: Some(
            "One random facility cannot be used next turn; its hirelings are replaced afterwards.",
        ),
        sub_table: None,
    },
    EventTemplate {
        kind: EventKind::MagicalDiscovery,
        weight: 4,
        title: ("Magical Discovery", "Découverte magique"),
        description: (
            "The hirelings discover or accidentally create an uncommon magic item.",
            "Les employés découvrent ou créent par accident un objet magique peu commun.",
        ),
        mechanics: Some("Gain an uncommon potion or scroll of the owners' choice."),
        sub_table: None,
    },
    EventTemplate {
        kind: EventKind::Refugees,
        weight: 8,
        title: ("Refugees", "Réfugiés"),
        description: (
            "A group of 2d4 refugees seeks shelter in the bastion.",
            "Un groupe de 2d4 réfugiés cherche abri au bastion.",
        ),
        mechanics: Some("The refugees offer 1d6 x 100 gp for their keep."),
        sub_table: None,
    },
    EventTemplate {
        kind: EventKind::RequestForAid,
        weight: 7,
        title: ("Request for Aid", "Appel à l'aide"),
        description: (
            "A nearby settlement asks the bastion for help.",
            "Une localité voisine demande l'aide du bastion.",
        ),
        mechanics: Some(
            "Send defenders and roll 1d6 per defender: 10+ total earns 1d6 x 100 gp, otherwise half the reward and one defender dies.",
        ),
        sub_table: None,
    },
    EventTemplate {
        kind: EventKind::Treasure,
        weight: 2,
        title: ("Treasure", "Trésor"),
        description: (
            "The bastion acquires an object of value.",
            "Le bastion acquiert un objet de valeur.",
        ),
        mechanics: None,
        sub_table: Some(&TREASURE),
    },
];

static ALL_IS_WELL: SubTable = SubTable {
    die: 8,
    entries: &[
        SubEntry {
            weight: 1,
            title: ("Accident Report", "Rapport d'accident"),
            description: (
                "An accident report is filed, but nobody was hurt.",
                "Un rapport d'accident est rédigé, mais personne n'a été blessé.",
            ),
            mechanics: None,
        },
        SubEntry {
            weight: 1,
            title: ("Letter of Thanks", "Lettre de remerciement"),
            description: (
                "A grateful neighbor sends a letter of thanks.",
                "Un voisin reconnaissant envoie une lettre de remerciement.",
            ),
            mechanics: None,
        },
        SubEntry {
            weight: 1,
            title: ("Wandering Livestock", "Bétail égaré"),
            description: (
                "A neighbor's livestock wanders into the courtyard.",
                "Le bétail d'un voisin s'égare dans la cour.",
            ),
            mechanics: None,
        },
        SubEntry {
            weight: 1,
            title: ("Peddlers", "Colporteurs"),
            description: (
                "Peddlers set up at the gate and sell trinkets.",
                "Des colporteurs s'installent à la porte et vendent des babioles.",
            ),
            mechanics: None,
        },
        SubEntry {
            weight: 1,
            title: ("Celebration", "Célébration"),
            description: (
                "A hireling celebrates a birthday with the staff.",
                "Un employé fête son anniversaire avec le personnel.",
            ),
            mechanics: None,
        },
        SubEntry {
            weight: 1,
            title: ("Ballad", "Ballade"),
            description: (
                "A traveling bard composes a ballad about the bastion.",
                "Un barde itinérant compose une ballade sur le bastion.",
            ),
            mechanics: None,
        },
        SubEntry {
            weight: 1,
            title: ("False Rumors", "Fausses rumeurs"),
            description: (
                "Rumors of a monster nearby turn out to be false.",
                "Des rumeurs de monstre dans les environs se révèlent fausses.",
            ),
            mechanics: None,
        },
        SubEntry {
            weight: 1,
            title: ("Quiet Week", "Semaine paisible"),
            description: (
                "A peaceful week passes without incident.",
                "Une semaine paisible passe sans incident.",
            ),
            mechanics: None,
        },
    ],
};

static GUEST: SubTable = SubTable {
    die: 4,
    entries: &[
        SubEntry {
            weight: 1,
            title: ("Person of Renown", "Personnalité renommée"),
            description: (
                "A person of renown stays for a week.",
                "Une personnalité renommée séjourne une semaine.",
            ),
            mechanics: None,
        },
        SubEntry {
            weight: 1,
            title: ("Foreign Dignitary", "Dignitaire étranger"),
            description: (
                "A foreign dignitary asks for a week of sanctuary.",
                "Un dignitaire étranger demande asile pour une semaine.",
            ),
            mechanics: Some("The dignitary leaves a gift worth 1d6 x 100 gp."),
        },
        SubEntry {
            weight: 1,
            title: ("Fugitive", "Fugitif"),
            description: (
                "Someone hiding from enemies begs for shelter.",
                "Une personne poursuivie par ses ennemis implore un abri.",
            ),
            mechanics: None,
        },
        SubEntry {
            weight: 1,
            title: ("Mercenary", "Mercenaire"),
            description: (
                "A mercenary offers to defend the bastion for free.",
                "Un mercenaire propose de défendre le bastion gratuitement.",
            ),
            mechanics: Some("Add a temporary mercenary defender (source: guest)."),
        },
    ],
};

static TREASURE: SubTable = SubTable {
    die: 100,
    entries: &[
        SubEntry {
            weight: 40,
            title: ("Art Object", "Objet d'art"),
            description: ("An art object worth 25 gp.", "Un objet d'art valant 25 po."),
            mechanics: None,
        },
        SubEntry {
            weight: 23,
            title: ("Fine Art Object", "Bel objet d'art"),
            description: ("An art object worth 250 gp.", "Un objet d'art valant 250 po."),
            mechanics: None,
        },
        SubEntry {
            weight: 10,
            title: ("Precious Art Object", "Objet d'art précieux"),
            description: ("An art object worth 750 gp.", "Un objet d'art valant 750 po."),
            mechanics: None,
        },
        SubEntry {
            weight: 2,
            title: ("Masterwork", "Chef-d'œuvre"),
            description: ("An art object worth 2,500 gp.", "Un objet d'art valant 2 500 po."),
            mechanics: None,
        },
        SubEntry {
            weight: 15,
            title: ("Common Magic Item", "Objet magique commun"),
            description: (
                "A common magic item of the owners' choice.",
                "Un objet magique commun au choix des propriétaires.",
            ),
            mechanics: None,
        },
        SubEntry {
            weight: 8,
            title: ("Uncommon Magic Item", "Objet magique peu commun"),
            description: (
                "An uncommon magic item of the owners' choice.",
                "Un objet magique peu commun au choix des propriétaires.",
            ),
            mechanics: None,
        },
        SubEntry {
            weight: 2,
            title: ("Rare Magic Item", "Objet magique rare"),
            description: (
                "A rare magic item of the owners' choice.",
                "Un objet magique rare au choix des propriétaires.",
            ),
            mechanics: None,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_sum_to_their_die() {
        let total: u32 = EVENT_TABLE.iter().map(|t| t.weight).sum();
        assert_eq!(total, EVENT_DIE);

        for table in [&ALL_IS_WELL, &GUEST, &TREASURE] {
            let total: u32 = table.entries.iter().map(|e| e.weight).sum();
            assert_eq!(total, table.die);
        }
    }

    #[test]
    fn test_primary_boundaries() {
        assert_eq!(resolve_event(1, None).kind, EventKind::AllIsWell);
        assert_eq!(resolve_event(50, None).kind, EventKind::AllIsWell);
        assert_eq!(resolve_event(51, None).kind, EventKind::Attack);
        assert_eq!(resolve_event(55, None).kind, EventKind::Attack);
        assert_eq!(resolve_event(56, None).kind, EventKind::CriminalHireling);
        assert_eq!(resolve_event(64, None).kind, EventKind::FriendlyVisitors);
        assert_eq!(resolve_event(73, None).kind, EventKind::Guest);
        assert_eq!(resolve_event(84, None).kind, EventKind::Refugees);
        assert_eq!(resolve_event(98, None).kind, EventKind::RequestForAid);
        assert_eq!(resolve_event(99, None).kind, EventKind::Treasure);
        assert_eq!(resolve_event(100, None).kind, EventKind::Treasure);
    }

    #[test]
    fn test_out_of_range_rolls_clamp() {
        let low = resolve_event(0, None);
        assert_eq!(low.roll, 1);
        assert_eq!(low.kind, EventKind::AllIsWell);

        let high = resolve_event(250, Some(500));
        assert_eq!(high.roll, 100);
        assert_eq!(high.kind, EventKind::Treasure);
        assert_eq!(high.sub_roll, Some(100));
        assert_eq!(high.title.en, "Treasure: Rare Magic Item");
    }

    #[test]
    fn test_sub_table_resolution() {
        let guest = resolve_event(76, Some(4));
        assert_eq!(guest.kind, EventKind::Guest);
        assert_eq!(guest.sub_roll, Some(4));
        assert_eq!(guest.title.en, "Guest: Mercenary");
        assert_eq!(guest.title.get(Language::Fr), "Invité : Mercenaire");
        assert!(guest.mechanics.unwrap().contains("mercenary"));

        let treasure = resolve_event(99, Some(41));
        assert_eq!(treasure.description.en, "An art object worth 250 gp.");
    }

    #[test]
    fn test_sub_table_ignored_without_one() {
        let attack = resolve_event(52, Some(3));
        assert_eq!(attack.sub_roll, None);
        assert_eq!(attack.title.en, "Attack");
        assert!(attack.mechanics.is_some());
    }

    #[test]
    fn test_missing_secondary_uses_generic_text() {
        let well = resolve_event(10, None);
        assert_eq!(well.sub_roll, None);
        assert_eq!(well.title.en, "All Is Well");
    }

    #[test]
    fn test_roll_event_draws_sub_roll_when_needed() {
        let mut rng = GameRng::new(2024);
        for _ in 0..500 {
            let event = roll_event(&mut rng);
            assert!((1..=EVENT_DIE).contains(&event.roll));
            match sub_table_die(event.roll) {
                Some(die) => {
                    let sub = event.sub_roll.expect("sub-table roll");
                    assert!((1..=die).contains(&sub));
                }
                None => assert_eq!(event.sub_roll, None),
            }
        }
    }

    #[test]
    fn test_all_is_well_auto_resolves() {
        let now = Utc::now();
        let well = BastionEvent::from_roll(EventId::new(1), 3, resolve_event(5, Some(2)), now);
        assert!(well.resolved);
        assert_eq!(well.resolved_at, Some(now));

        let mut attack = BastionEvent::from_roll(EventId::new(2), 3, resolve_event(53, None), now);
        assert!(!attack.resolved);
        attack.resolve(now);
        assert!(attack.resolved);
    }
}
