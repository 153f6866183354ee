use std::collections::HashMap;

use crate::cards::CardIndex;
use crate::errors::SnapshotError;
use crate::player::{Pile, Player};
use crate::snapshot::{GuildSnapshot, RegistrySnapshot};

/// Chat-server identifier (platform snowflake, opaque here).
pub type GuildId = u64;
/// User identifier within a guild.
pub type UserId = u64;
/// Channel identifier, used for the designated tabletop channel.
pub type ChannelId = u64;

/// Per-server game state: one player per known user plus an optional
/// tabletop channel for play announcements.
#[derive(Debug, Default, PartialEq)]
pub struct Guild {
    tabletop_channel: Option<ChannelId>,
    players: HashMap<UserId, Player>,
}

impl Guild {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guild pre-seeded with a fresh player for every known member.
    pub fn with_members(card_count: usize, members: &[UserId]) -> Self {
        let players = members
            .iter()
            .map(|&id| (id, Player::new(card_count)))
            .collect();
        Self {
            tabletop_channel: None,
            players,
        }
    }

    pub(crate) fn from_parts(
        tabletop_channel: Option<ChannelId>,
        players: HashMap<UserId, Player>,
    ) -> Self {
        Self {
            tabletop_channel,
            players,
        }
    }

    /// The existing player, or a fresh shuffled one stored on first contact.
    pub fn find_player(&mut self, card_count: usize, user: UserId) -> &mut Player {
        self.players
            .entry(user)
            .or_insert_with(|| Player::new(card_count))
    }

    pub fn player(&self, user: UserId) -> Option<&Player> {
        self.players.get(&user)
    }

    pub fn players(&self) -> impl Iterator<Item = (&UserId, &Player)> {
        self.players.iter()
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn tabletop_channel(&self) -> Option<ChannelId> {
        self.tabletop_channel
    }

    pub fn set_tabletop_channel(&mut self, channel: ChannelId) {
        self.tabletop_channel = Some(channel);
    }
}

/// Top-level game state: every guild this process has seen, keyed by id.
///
/// All mutation goes through `&mut self`; callers dispatching commands
/// concurrently serialize access through a single owner so no two commands
/// interleave a read-modify-write on the same piles.
#[derive(Debug, PartialEq)]
pub struct Registry {
    card_count: usize,
    guilds: HashMap<GuildId, Guild>,
}

impl Registry {
    pub fn new(card_count: usize) -> Self {
        Self {
            card_count,
            guilds: HashMap::new(),
        }
    }

    /// The existing guild, or one created pre-seeded with a player for every
    /// id in `members`.
    pub fn resolve_guild(&mut self, guild: GuildId, members: &[UserId]) -> &mut Guild {
        let card_count = self.card_count;
        self.guilds
            .entry(guild)
            .or_insert_with(|| Guild::with_members(card_count, members))
    }

    /// The addressed player, created on first contact. Idempotent.
    pub fn resolve_player(
        &mut self,
        guild: GuildId,
        user: UserId,
        members: &[UserId],
    ) -> &mut Player {
        let card_count = self.card_count;
        self.resolve_guild(guild, members).find_player(card_count, user)
    }

    pub fn guild(&self, guild: GuildId) -> Option<&Guild> {
        self.guilds.get(&guild)
    }

    pub fn set_tabletop(&mut self, guild: GuildId, members: &[UserId], channel: ChannelId) {
        self.resolve_guild(guild, members).set_tabletop_channel(channel);
    }

    /// Reshuffle one player's cards back into their deck.
    pub fn reset_player(&mut self, guild: GuildId, user: UserId, members: &[UserId]) {
        self.resolve_player(guild, user, members).shuffle_all();
    }

    /// Reshuffle every player in the guild.
    pub fn reset_all(&mut self, guild: GuildId, members: &[UserId]) {
        for player in self.resolve_guild(guild, members).players_mut() {
            player.shuffle_all();
        }
    }

    /// Administrative card move; see [`Player::move_card`].
    pub fn move_card(
        &mut self,
        guild: GuildId,
        user: UserId,
        members: &[UserId],
        card: CardIndex,
        destination: Pile,
    ) -> bool {
        self.resolve_player(guild, user, members)
            .move_card(card, destination)
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }

    /// Full image of the registry for persistence. Cheap enough to build
    /// under the mutation lock; serialization happens outside it.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let guilds = self
            .guilds
            .iter()
            .map(|(&id, guild)| {
                let players = guild
                    .players()
                    .map(|(&user, player)| (user, player.snapshot()))
                    .collect();
                (
                    id,
                    GuildSnapshot {
                        tabletop_channel: guild.tabletop_channel(),
                        players,
                    },
                )
            })
            .collect();
        RegistrySnapshot { guilds }
    }

    /// Rebuild the registry from a persisted snapshot. Any player whose
    /// piles no longer partition the catalog rejects the whole restore;
    /// the caller decides whether to fall back to an empty registry.
    pub fn from_snapshot(
        snapshot: &RegistrySnapshot,
        card_count: usize,
    ) -> Result<Self, SnapshotError> {
        let mut guilds = HashMap::with_capacity(snapshot.guilds.len());
        for (&guild_id, guild_snap) in &snapshot.guilds {
            let mut players = HashMap::with_capacity(guild_snap.players.len());
            for (&user, player_snap) in &guild_snap.players {
                players.insert(user, Player::from_snapshot(player_snap, card_count)?);
            }
            guilds.insert(
                guild_id,
                Guild::from_parts(guild_snap.tabletop_channel, players),
            );
        }
        Ok(Self { card_count, guilds })
    }
}
