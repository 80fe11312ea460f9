//! Fight-mode derivation on the world-state singleton.

use log::info;

use hollowfang_core::components::{Enemy, WorldState};
use hollowfang_core::enums::AiState;
use hollowfang_core::events::GameEvent;

use crate::context::FrameContext;
use crate::store::EntityStore;

/// Set `is_in_fight_mode` to whether any enemy is chasing or attacking.
pub fn run(store: &mut EntityStore, ctx: &FrameContext, events: &mut Vec<GameEvent>) {
    let (Some(_player), Some(world_state)) = (ctx.player, ctx.world_state) else {
        return;
    };

    let in_fight = {
        let mut query = store.query::<(&Enemy, &AiState)>();
        let engaged = query.iter().any(|(_, (_, state))| state.is_engaged());
        engaged
    };

    let Some(mut state) = store.get_mut::<WorldState>(world_state) else {
        return;
    };
    if state.is_in_fight_mode != in_fight {
        state.is_in_fight_mode = in_fight;
        info!("Fight mode {}", if in_fight { "on" } else { "off" });
        events.push(GameEvent::FightModeChanged { in_fight });
    }
}
