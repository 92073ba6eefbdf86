//! Facility catalog
//!
//! Static rules data: which facilities exist, how big they are, the level
//! an owner needs to build them, and the orders they accept.

use crate::dice::DiceExpr;
use crate::error::Error;
use crate::order::{OrderOption, OrderType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest level at which a character can own a bastion
pub const MIN_OWNER_LEVEL: u8 = 5;

/// Highest character level
pub const MAX_OWNER_LEVEL: u8 = 20;

/// Defenders gained when a recruit order completes
pub const RECRUIT_DICE: DiceExpr = DiceExpr::new(1, 4);

/// Level breakpoints and the facility slots they grant
const FACILITY_SLOTS: &[(u8, usize)] = &[(5, 2), (9, 4), (13, 5), (17, 6)];

/// Maximum number of facilities an owner of `level` may hold
pub fn max_facilities_for_level(level: u8) -> usize {
    FACILITY_SLOTS
        .iter()
        .rev()
        .find(|(min_level, _)| level >= *min_level)
        .map(|(_, slots)| *slots)
        .unwrap_or(0)
}

/// Clamp a character level into the range a bastion owner may have
pub fn clamp_owner_level(level: u8) -> u8 {
    level.clamp(MIN_OWNER_LEVEL, MAX_OWNER_LEVEL)
}

/// Facility footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilitySize {
    Cramped,
    Roomy,
    Vast,
}

/// Every facility kind a bastion can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityType {
    ArcaneStudy,
    Armory,
    Barrack,
    Garden,
    Library,
    Sanctuary,
    Smithy,
    Storehouse,
    Workshop,
    Greenhouse,
    Laboratory,
    Scriptorium,
    TrainingArea,
    TrophyRoom,
    Observatory,
    Pub,
    Guildhall,
    WarRoom,
}

impl FacilityType {
    pub const ALL: [FacilityType; 18] = [
        FacilityType::ArcaneStudy,
        FacilityType::Armory,
        FacilityType::Barrack,
        FacilityType::Garden,
        FacilityType::Library,
        FacilityType::Sanctuary,
        FacilityType::Smithy,
        FacilityType::Storehouse,
        FacilityType::Workshop,
        FacilityType::Greenhouse,
        FacilityType::Laboratory,
        FacilityType::Scriptorium,
        FacilityType::TrainingArea,
        FacilityType::TrophyRoom,
        FacilityType::Observatory,
        FacilityType::Pub,
        FacilityType::Guildhall,
        FacilityType::WarRoom,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        self.rules().name
    }

    fn rules(&self) -> &'static FacilityRules {
        // FACILITY_RULES is laid out in the same order as ALL
        &FACILITY_RULES[*self as usize]
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FacilityType {
    type Err = Error;

    /// Accepts the display name or the variant name, ignoring case, spaces
    /// and punctuation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        FacilityType::ALL
            .into_iter()
            .find(|ty| normalize(ty.name()) == wanted || normalize(&format!("{:?}", ty)) == wanted)
            .ok_or_else(|| Error::UnknownFacility(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Guild a guildhall is dedicated to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuildType {
    Adventurers,
    Bakers,
    Brewers,
    Carpenters,
    Cobblers,
    Masons,
    Shipbuilders,
    Thieves,
}

/// Full definition of a facility kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityDefinition {
    pub facility_type: FacilityType,
    pub name: String,
    pub size: FacilitySize,
    pub min_level: u8,
    pub order_type: OrderType,
    /// Whether building it requires a guild subtype
    pub requires_guild: bool,
    pub options: Vec<OrderOption>,
}

impl FacilityDefinition {
    /// Whether an option can be run by this facility
    pub fn accepts(&self, option: &OrderOption) -> bool {
        option.order_type() == self.order_type
    }
}

/// Look up the definition of a facility kind
pub fn facility_definition(facility_type: FacilityType) -> FacilityDefinition {
    let rules = facility_type.rules();
    FacilityDefinition {
        facility_type,
        name: rules.name.to_string(),
        size: rules.size,
        min_level: rules.min_level,
        order_type: rules.order_type,
        requires_guild: facility_type == FacilityType::Guildhall,
        options: rules
            .options
            .iter()
            .map(|&(label, cost, turns)| make_option(rules.order_type, label, cost, turns))
            .collect(),
    }
}

/// Look up a facility definition by name; unknown names yield `None`
pub fn facility_definition_by_name(name: &str) -> Option<FacilityDefinition> {
    name.parse::<FacilityType>().ok().map(facility_definition)
}

/// All facility definitions unlocked at `level`
pub fn facilities_available_at(level: u8) -> Vec<FacilityDefinition> {
    FacilityType::ALL
        .into_iter()
        .map(facility_definition)
        .filter(|def| def.min_level <= level)
        .collect()
}

fn make_option(order_type: OrderType, label: &str, cost: i64, turns: u32) -> OrderOption {
    let label = label.to_string();
    match order_type {
        OrderType::Craft => OrderOption::Craft {
            item: label,
            cost,
            turns,
        },
        OrderType::Harvest => OrderOption::Harvest {
            product: label,
            cost,
            turns,
        },
        OrderType::Trade => OrderOption::Trade {
            goods: label,
            cost,
            turns,
        },
        OrderType::Research => OrderOption::Research {
            topic: label,
            turns,
        },
        OrderType::Empower => OrderOption::Empower {
            benefit: label,
            turns,
        },
        OrderType::Recruit => OrderOption::Recruit {
            unit: label,
            cost,
            turns,
        },
    }
}

struct FacilityRules {
    name: &'static str,
    size: FacilitySize,
    min_level: u8,
    order_type: OrderType,
    /// (label, gold cost, turns)
    options: &'static [(&'static str, i64, u32)],
}

static FACILITY_RULES: [FacilityRules; 18] = [
    FacilityRules {
        name: "Arcane Study",
        size: FacilitySize::Roomy,
        min_level: 5,
        order_type: OrderType::Craft,
        options: &[
            ("Arcane Focus", 0, 1),
            ("Blank Book", 10, 1),
            ("Common Magic Item", 50, 3),
        ],
    },
    FacilityRules {
        name: "Armory",
        size: FacilitySize::Roomy,
        min_level: 5,
        order_type: OrderType::Trade,
        options: &[("Stock Armory", 100, 1)],
    },
    FacilityRules {
        name: "Barrack",
        size: FacilitySize::Roomy,
        min_level: 5,
        order_type: OrderType::Recruit,
        options: &[("Bastion Defenders", 0, 1)],
    },
    FacilityRules {
        name: "Garden",
        size: FacilitySize::Roomy,
        min_level: 5,
        order_type: OrderType::Harvest,
        options: &[
            ("Decorative Flowers", 0, 1),
            ("Herbs", 0, 1),
            ("Food Rations", 0, 1),
            ("Poisonous Plants", 0, 1),
        ],
    },
    FacilityRules {
        name: "Library",
        size: FacilitySize::Roomy,
        min_level: 5,
        order_type: OrderType::Research,
        options: &[("Topical Lore", 0, 1)],
    },
    FacilityRules {
        name: "Sanctuary",
        size: FacilitySize::Cramped,
        min_level: 5,
        order_type: OrderType::Craft,
        options: &[("Sacred Focus", 0, 1)],
    },
    FacilityRules {
        name: "Smithy",
        size: FacilitySize::Roomy,
        min_level: 5,
        order_type: OrderType::Craft,
        options: &[
            ("Smith's Tools Item", 0, 1),
            ("Magic Weapon or Armor", 100, 3),
        ],
    },
    FacilityRules {
        name: "Storehouse",
        size: FacilitySize::Roomy,
        min_level: 5,
        order_type: OrderType::Trade,
        options: &[("Procure Goods", 500, 1), ("Sell Goods", 0, 1)],
    },
    FacilityRules {
        name: "Workshop",
        size: FacilitySize::Roomy,
        min_level: 5,
        order_type: OrderType::Craft,
        options: &[("Adventuring Gear", 0, 1), ("Magic Implement", 50, 3)],
    },
    FacilityRules {
        name: "Greenhouse",
        size: FacilitySize::Roomy,
        min_level: 9,
        order_type: OrderType::Harvest,
        options: &[("Healing Herbs", 0, 1), ("Poison", 0, 1)],
    },
    FacilityRules {
        name: "Laboratory",
        size: FacilitySize::Roomy,
        min_level: 9,
        order_type: OrderType::Craft,
        options: &[("Alchemist's Supplies Item", 0, 1), ("Poison", 50, 1)],
    },
    FacilityRules {
        name: "Scriptorium",
        size: FacilitySize::Roomy,
        min_level: 9,
        order_type: OrderType::Craft,
        options: &[
            ("Book Replica", 10, 1),
            ("Spell Scroll", 25, 1),
            ("Paperwork", 1, 1),
        ],
    },
    FacilityRules {
        name: "Training Area",
        size: FacilitySize::Vast,
        min_level: 9,
        order_type: OrderType::Empower,
        options: &[
            ("Battle Expert", 0, 1),
            ("Skills Expert", 0, 1),
            ("Tools Expert", 0, 1),
        ],
    },
    FacilityRules {
        name: "Trophy Room",
        size: FacilitySize::Roomy,
        min_level: 9,
        order_type: OrderType::Research,
        options: &[("Lore", 0, 1), ("Trinket Trophy", 0, 1)],
    },
    FacilityRules {
        name: "Observatory",
        size: FacilitySize::Cramped,
        min_level: 13,
        order_type: OrderType::Empower,
        options: &[("Eldritch Discovery", 0, 1)],
    },
    FacilityRules {
        name: "Pub",
        size: FacilitySize::Roomy,
        min_level: 13,
        order_type: OrderType::Research,
        options: &[("Information Gathering", 0, 1)],
    },
    FacilityRules {
        name: "Guildhall",
        size: FacilitySize::Vast,
        min_level: 17,
        order_type: OrderType::Recruit,
        options: &[("Guild Assignment", 0, 1)],
    },
    FacilityRules {
        name: "War Room",
        size: FacilitySize::Vast,
        min_level: 17,
        order_type: OrderType::Recruit,
        options: &[("Lieutenant", 0, 1), ("Soldiers", 0, 1)],
    },
];
