use super::orders::*;
use crate::cluster::registry::*;
use crate::features::*;
use crate::turn::*;
use log::*;
use specs::prelude::*;

pub struct UnitOrderSystem;

impl<'a> System<'a> for UnitOrderSystem {
    type SystemData = (
        ReadExpect<'a, TurnContext>,
        Read<'a, Features>,
        Read<'a, ClusterRegistry>,
        Write<'a, TurnOutput>,
    );

    fn run(&mut self, (context, features, registry, mut output): Self::SystemData) {
        let orders = extract_orders(&registry, &context, features.actions.build_cargo);
        let actions = resolve_orders(&orders, &context);

        debug!("Turn {} - Orders: {} - Actions: {}", context.turn(), orders.len(), actions.len());

        output.orders = orders;
        output.actions = actions;
    }
}
