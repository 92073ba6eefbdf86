//! Order and turn operations

use crate::error::Result;
use crate::service::BastionService;
use bastion_core::{FacilityId, Order, OrderCompletion, OrderOption, TurnReport};
use tracing::info;

impl BastionService {
    /// Put a ready-made order into a facility's slot
    ///
    /// Overwrites any order already there. `false` if the facility is
    /// unknown.
    pub fn assign_order(&mut self, facility_id: FacilityId, order: Order) -> Result<bool> {
        let assigned = self.apply("assign_order", |b, _, _| b.assign_order(facility_id, order))?;
        Ok(assigned.is_some())
    }

    /// Start a catalog order, paying its cost
    ///
    /// `None` if the facility is unknown or busy, the option belongs to
    /// another order type, the bastion cannot pay, or the option has a
    /// negative cost or a duration past the end of the calendar.
    pub fn start_order(
        &mut self,
        facility_id: FacilityId,
        option: OrderOption,
        description: Option<String>,
    ) -> Result<Option<Order>> {
        let turn_length_days = self.config().turn_length_days;
        self.apply("start_order", |b, _, now| {
            b.start_order(facility_id, option, description, now, turn_length_days)
                .cloned()
        })
    }

    /// Finish a facility's current order now
    pub fn complete_order(
        &mut self,
        facility_id: FacilityId,
        result: Option<String>,
    ) -> Result<Option<OrderCompletion>> {
        self.apply("complete_order", |b, rng, now| b.complete_order(facility_id, result, rng, now))
    }

    /// Advance to the next turn, completing every order that has come due
    pub fn advance_turn(&mut self) -> Result<TurnReport> {
        let clock = self.config().completion_clock;
        let report = self.update("advance_turn", |b, rng, now| b.advance_turn(clock, rng, now))?;
        info!(
            turn = report.turn,
            completed = report.completions.len(),
            "turn advanced"
        );
        Ok(report)
    }

    /// In-progress orders with the facility running each
    pub fn active_orders(&self) -> Result<Vec<(FacilityId, Order)>> {
        let bastion = self.get_or_create_bastion()?;
        Ok(bastion
            .active_orders()
            .map(|(id, order)| (id, order.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{BastionConfig, BastionService};
    use bastion_core::{
        facility_definition, CompletionClock, EventKind, FacilityId, FacilityType, NewFacility,
        OrderOption, OrderStatus,
    };

    fn service(clock: CompletionClock) -> BastionService {
        let config = BastionConfig {
            completion_clock: clock,
            ..BastionConfig::default().with_seed(11)
        };
        BastionService::in_memory(config).unwrap()
    }

    fn facility(service: &mut BastionService, ty: FacilityType) -> FacilityId {
        let owner = service.add_owner("Aria", 9, None).unwrap().id;
        service
            .add_facility(NewFacility::new(owner, ty))
            .unwrap()
            .unwrap()
            .id
    }

    fn option(ty: FacilityType, index: usize) -> OrderOption {
        facility_definition(ty).options[index].clone()
    }

    #[test]
    fn test_start_order_pays_from_ledger() {
        let mut service = service(CompletionClock::WallClock);
        let smithy = facility(&mut service, FacilityType::Smithy);
        service
            .add_gold_transaction(150, "Dragon hoard")
            .unwrap()
            .unwrap();

        let order = service
            .start_order(smithy, option(FacilityType::Smithy, 1), None)
            .unwrap()
            .unwrap();
        assert_eq!(order.gold_cost, 100);
        assert_eq!(order.turns_required, 3);
        assert_eq!(order.description, "Magic Weapon or Armor");

        let bastion = service.get_or_create_bastion().unwrap();
        assert_eq!(bastion.gold, 50);
        assert_eq!(bastion.ledger.last().unwrap().amount, -100);
    }

    #[test]
    fn test_start_order_rejections() {
        let mut service = service(CompletionClock::WallClock);
        let smithy = facility(&mut service, FacilityType::Smithy);

        // Too expensive with an empty treasury
        let broke = service
            .start_order(smithy, option(FacilityType::Smithy, 1), None)
            .unwrap();
        assert!(broke.is_none());

        // Garden options cannot run in a smithy
        let wrong = service
            .start_order(smithy, option(FacilityType::Garden, 0), None)
            .unwrap();
        assert!(wrong.is_none());

        service
            .start_order(smithy, option(FacilityType::Smithy, 0), None)
            .unwrap()
            .unwrap();
        let busy = service
            .start_order(smithy, option(FacilityType::Smithy, 0), None)
            .unwrap();
        assert!(busy.is_none());

        let missing = service
            .start_order(FacilityId::new(999), option(FacilityType::Smithy, 0), None)
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_malformed_custom_options_are_rejected() {
        let mut service = service(CompletionClock::WallClock);
        let smithy = facility(&mut service, FacilityType::Smithy);
        let before = service.get_or_create_bastion().unwrap();

        let refund = OrderOption::Craft {
            item: "Refund".to_string(),
            cost: -500,
            turns: 1,
        };
        assert!(service.start_order(smithy, refund, None).unwrap().is_none());

        let endless = OrderOption::Craft {
            item: "Perpetual engine".to_string(),
            cost: 0,
            turns: u32::MAX,
        };
        assert!(service.start_order(smithy, endless, None).unwrap().is_none());

        let after = service.get_or_create_bastion().unwrap();
        assert_eq!(after, before);
        assert_eq!(after.gold, 0);
    }

    #[test]
    fn test_assign_overwrites() {
        let mut service = service(CompletionClock::WallClock);
        let smithy = facility(&mut service, FacilityType::Smithy);
        let first = service
            .start_order(smithy, option(FacilityType::Smithy, 0), Some("Nails".to_string()))
            .unwrap()
            .unwrap();

        let mut replacement = first.clone();
        replacement.description = "Horseshoes".to_string();
        assert!(service.assign_order(smithy, replacement).unwrap());
        assert!(!service.assign_order(FacilityId::new(999), first).unwrap());

        let active = service.active_orders().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].0, smithy);
        assert_eq!(active[0].1.description, "Horseshoes");
    }

    #[test]
    fn test_complete_recruit_order() {
        let mut service = service(CompletionClock::WallClock);
        let barrack = facility(&mut service, FacilityType::Barrack);
        service
            .start_order(barrack, option(FacilityType::Barrack, 0), None)
            .unwrap()
            .unwrap();

        let completion = service
            .complete_order(barrack, Some("Fresh recruits".to_string()))
            .unwrap()
            .unwrap();
        let recruited = completion.recruited_defenders.len();
        assert!((1..=4).contains(&recruited));
        assert_eq!(completion.order.status, OrderStatus::Completed);

        let bastion = service.get_or_create_bastion().unwrap();
        assert_eq!(bastion.defenders.len(), recruited);
        let facility = &bastion.facilities[&barrack];
        assert!(facility.current_order.is_none());
        assert_eq!(facility.order_history.len(), 1);
        let event = bastion.events.last().unwrap();
        assert_eq!(event.kind, EventKind::OrderCompleted);
        assert!(!event.resolved);

        assert!(service.complete_order(barrack, None).unwrap().is_none());
    }

    #[test]
    fn test_advance_turn_by_turn_count() {
        let mut service = service(CompletionClock::TurnCount);
        let garden = facility(&mut service, FacilityType::Garden);
        service
            .start_order(garden, option(FacilityType::Garden, 1), None)
            .unwrap()
            .unwrap();

        let report = service.advance_turn().unwrap();
        assert_eq!(report.turn, 2);
        assert_eq!(report.completions.len(), 1);
        assert_eq!(report.completions[0].facility_id, garden);

        let bastion = service.get_or_create_bastion().unwrap();
        assert_eq!(bastion.current_turn(), 2);
        assert!(service.active_orders().unwrap().is_empty());
    }

    #[test]
    fn test_advance_turn_by_wall_clock() {
        let mut service = service(CompletionClock::WallClock);
        let garden = facility(&mut service, FacilityType::Garden);
        service
            .start_order(garden, option(FacilityType::Garden, 1), None)
            .unwrap()
            .unwrap();

        // A week has not passed in real time
        let report = service.advance_turn().unwrap();
        assert_eq!(report.turn, 2);
        assert!(report.completions.is_empty());
        assert_eq!(service.active_orders().unwrap().len(), 1);
    }
}
