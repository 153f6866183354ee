use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::cards::CardIndex;
use crate::registry::{ChannelId, GuildId, UserId};

/// Persisted piles for one player. Order within each list is meaningful:
/// deck front is the next draw, discard front is the most recent discard,
/// hand order is draw order.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub hand: Vec<CardIndex>,
    pub discard: Vec<CardIndex>,
    pub deck: Vec<CardIndex>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GuildSnapshot {
    pub tabletop_channel: Option<ChannelId>,
    pub players: HashMap<UserId, PlayerSnapshot>,
}

/// Full registry image written to durable storage. Map key order is not
/// semantically significant; pile order is. Loading a snapshot and saving
/// it again without intervening commands yields an equal snapshot.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub guilds: HashMap<GuildId, GuildSnapshot>,
}
