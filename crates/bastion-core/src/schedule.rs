//! Order lifecycle and turn advancement

use crate::bastion::Bastion;
use crate::catalog::{facility_definition, FacilityType, RECRUIT_DICE};
use crate::error::{Error, Result};
use crate::events::BastionEvent;
use crate::identity::{DefenderId, EventId, FacilityId, OrderId};
use crate::order::{Order, OrderOption, OrderType};
use crate::records::{Defender, DefenderSource, DefenderType, NewDefender};
use crate::rng::GameRng;
use crate::turn::{CompletionClock, Turn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened when an order finished
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCompletion {
    pub facility_id: FacilityId,
    /// The archived order, now completed
    pub order: Order,
    /// Defenders spawned by a recruit order
    pub recruited_defenders: Vec<Defender>,
    /// Log entry announcing the completion
    pub event_id: EventId,
}

/// Result of advancing the bastion by one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: Turn,
    pub completions: Vec<OrderCompletion>,
}

impl Bastion {
    /// Put an order into a facility's slot, replacing whatever was there
    ///
    /// No affordability or busy check is made; use [`Bastion::start_order`]
    /// for a priced, validated start.
    pub fn assign_order(&mut self, facility_id: FacilityId, order: Order) -> Result<()> {
        let facility = self
            .facilities
            .get_mut(&facility_id)
            .ok_or(Error::FacilityNotFound(facility_id))?;
        facility.current_order = Some(order);
        Ok(())
    }

    /// Start an order from an option, paying its cost from the ledger
    pub fn start_order(
        &mut self,
        facility_id: FacilityId,
        option: OrderOption,
        description: Option<String>,
        now: DateTime<Utc>,
        turn_length_days: u32,
    ) -> Result<&Order> {
        let facility = self
            .facilities
            .get(&facility_id)
            .ok_or(Error::FacilityNotFound(facility_id))?;
        if facility.is_busy() {
            return Err(Error::OrderInProgress(facility_id));
        }

        let definition = facility_definition(facility.facility_type);
        if !definition.accepts(&option) {
            return Err(Error::OrderTypeMismatch {
                expected: definition.order_type,
                got: option.order_type(),
            });
        }

        let cost = option.cost();
        if cost < 0 {
            return Err(Error::InvalidOrder(format!(
                "{} has a negative cost of {}",
                option.label(),
                cost
            )));
        }
        if !self.can_afford(cost) {
            return Err(Error::InsufficientGold {
                cost,
                available: self.gold,
            });
        }

        let reason = format!("{} order: {}", facility.display_name(), option.label());
        // The id is only allocated once the order is known to be valid
        let mut order = Order::from_option(
            OrderId::new(0),
            option,
            description,
            self.current_turn(),
            now,
            turn_length_days,
        )?;
        order.id = OrderId::new(self.allocate_id());
        if cost != 0 {
            self.add_gold_transaction(-cost, reason, now)?;
        }

        let facility = self
            .facilities
            .get_mut(&facility_id)
            .ok_or(Error::FacilityNotFound(facility_id))?;
        Ok(&*facility.current_order.insert(order))
    }

    /// Finish a facility's current order
    ///
    /// The order is archived to the facility's history, the slot is cleared,
    /// a completion event is logged and recruit orders spawn 1d4 defenders.
    pub fn complete_order(
        &mut self,
        facility_id: FacilityId,
        result: Option<String>,
        rng: &mut GameRng,
        now: DateTime<Utc>,
    ) -> Result<OrderCompletion> {
        let facility = self
            .facilities
            .get_mut(&facility_id)
            .ok_or(Error::FacilityNotFound(facility_id))?;
        let mut order = facility
            .current_order
            .take()
            .ok_or(Error::NoActiveOrder(facility_id))?;
        order.complete(result, now);
        facility.order_history.push(order.clone());

        let facility_name = facility.display_name().to_string();
        let facility_type = facility.facility_type;

        let recruited_defenders = match order.order_type {
            OrderType::Recruit => self.recruit_defenders(&order, facility_type, rng, now),
            OrderType::Craft
            | OrderType::Trade
            | OrderType::Research
            | OrderType::Harvest
            | OrderType::Empower => Vec::new(),
        };

        let mechanics = (!recruited_defenders.is_empty())
            .then(|| format!("{} defender(s) recruited.", recruited_defenders.len()));
        let event_id = EventId::new(self.allocate_id());
        let event = BastionEvent::order_completed(
            event_id,
            self.current_turn(),
            &facility_name,
            &order.description,
            mechanics,
            now,
        );
        self.push_event(event);

        Ok(OrderCompletion {
            facility_id,
            order,
            recruited_defenders,
            event_id,
        })
    }

    fn recruit_defenders(
        &mut self,
        order: &Order,
        facility_type: FacilityType,
        rng: &mut GameRng,
        now: DateTime<Utc>,
    ) -> Vec<Defender> {
        let count = RECRUIT_DICE.roll(rng).total.max(0) as usize;
        let unit = match &order.option {
            Some(OrderOption::Recruit { unit, .. }) => unit.clone(),
            _ => "Defender".to_string(),
        };
        let source = match facility_type {
            FacilityType::Barrack => DefenderSource::Barracks,
            _ => DefenderSource::Other,
        };

        (0..count)
            .map(|_| {
                // Numbered by id so names stay unique after casualties
                let id = DefenderId::new(self.allocate_id());
                let new = NewDefender {
                    name: format!("{} #{}", unit, id.raw()),
                    defender_type: DefenderType::Hired,
                    source,
                    monthly_cost: None,
                    notes: None,
                    temporary: false,
                };
                self.insert_defender(id, new, now).clone()
            })
            .collect()
    }

    /// Move to the next turn and complete every order that has come due
    pub fn advance_turn(
        &mut self,
        completion_clock: CompletionClock,
        rng: &mut GameRng,
        now: DateTime<Utc>,
    ) -> TurnReport {
        let turn = self.clock.advance(now);

        let due: Vec<FacilityId> = self
            .facilities
            .values()
            .filter(|f| {
                f.current_order
                    .as_ref()
                    .is_some_and(|o| o.is_due(completion_clock, turn, now))
            })
            .map(|f| f.id)
            .collect();

        let completions = due
            .into_iter()
            .filter_map(|id| self.complete_order(id, None, rng, now).ok())
            .collect();

        TurnReport { turn, completions }
    }

    /// In-progress orders across the bastion
    pub fn active_orders(&self) -> impl Iterator<Item = (FacilityId, &Order)> {
        self.facilities.values().filter_map(|f| {
            f.current_order
                .as_ref()
                .filter(|o| o.is_in_progress())
                .map(|o| (f.id, o))
        })
    }
}
