use serde::{Deserialize, Serialize};

use fateweaver_engine::cards::{Card, CardIndex, Catalog};
use fateweaver_engine::player::Pile;
use fateweaver_engine::registry::{ChannelId, GuildId, Registry, UserId};

use crate::errors::{CommandError, SearchScope};

/// Most cards a single draw command will deal.
pub const MAX_DRAW: u32 = 5;

/// A validated inbound command. Argument parsing and permission checks
/// happen upstream at the platform boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Draw { count: u32 },
    ShowHand,
    Play { keyword: String },
    Discard { keyword: String },
    Redraw { keyword: String },
    Shuffle,
    View { keyword: String },
    SetTabletop { channel: ChannelId },
    ResetPlayer { user: Option<UserId> },
    PeekHand { user: UserId },
    RestoreCard { user: UserId, destination: String, keyword: String },
    DeckShuffle { user: UserId },
}

/// Which state transition surfaced a displayed card.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    Draw,
    Play,
    Discard,
    Redraw,
    View,
}

/// A card ready for display, tagged with the action that surfaced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub action: CardAction,
    pub card: Card,
}

/// What the boundary layer renders back to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Reply {
    /// Cards surfaced to the invoking channel, in the order produced.
    Cards { views: Vec<CardView> },
    /// A played card: announced on the tabletop channel, confirmed privately.
    Played {
        view: CardView,
        tabletop: ChannelId,
        confirmation: String,
    },
    Message { text: String },
    /// Self inspection: sorted hand and discard plus the undrawn count.
    HandReport {
        hand: Vec<Card>,
        discard: Vec<Card>,
        deck_remaining: usize,
    },
    /// Admin inspection: every pile of the addressed player, sorted.
    PileReport {
        user: UserId,
        hand: Vec<Card>,
        discard: Vec<Card>,
        deck: Vec<Card>,
    },
}

/// Validated platform context accompanying every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandContext {
    pub guild_id: GuildId,
    pub user_id: UserId,
    /// Known guild members; used to pre-seed a guild on first contact.
    pub member_ids: Vec<UserId>,
}

/// Run one validated command against the registry. Pure and synchronous;
/// the owning service serializes calls through its registry lock.
pub fn handle(
    registry: &mut Registry,
    catalog: &Catalog,
    ctx: &CommandContext,
    command: Command,
) -> Result<Reply, CommandError> {
    match command {
        Command::Draw { count } => draw(registry, catalog, ctx, count),
        Command::ShowHand => show_hand(registry, catalog, ctx),
        Command::Play { keyword } => play(registry, catalog, ctx, &keyword),
        Command::Discard { keyword } => discard(registry, catalog, ctx, &keyword),
        Command::Redraw { keyword } => redraw(registry, catalog, ctx, &keyword),
        Command::Shuffle => {
            registry.reset_player(ctx.guild_id, ctx.user_id, &ctx.member_ids);
            Ok(message(
                "All of your cards have been reshuffled into the deck.",
            ))
        }
        Command::View { keyword } => view(catalog, &keyword),
        Command::SetTabletop { channel } => {
            registry.set_tabletop(ctx.guild_id, &ctx.member_ids, channel);
            Ok(message("Tabletop channel set."))
        }
        Command::ResetPlayer { user } => reset(registry, ctx, user),
        Command::PeekHand { user } => peek(registry, catalog, ctx, user),
        Command::RestoreCard {
            user,
            destination,
            keyword,
        } => restore(registry, catalog, ctx, user, &destination, &keyword),
        Command::DeckShuffle { user } => {
            registry
                .resolve_player(ctx.guild_id, user, &ctx.member_ids)
                .shuffle_deck();
            Ok(message("Deck shuffled."))
        }
    }
}

fn draw(
    registry: &mut Registry,
    catalog: &Catalog,
    ctx: &CommandContext,
    count: u32,
) -> Result<Reply, CommandError> {
    let count = count.clamp(1, MAX_DRAW);
    let player = registry.resolve_player(ctx.guild_id, ctx.user_id, &ctx.member_ids);

    let mut drawn = Vec::new();
    for _ in 0..count {
        match player.draw() {
            Some(idx) => drawn.push(idx),
            // Deck ran dry mid-draw; report what was dealt so far.
            None => break,
        }
    }
    if drawn.is_empty() {
        return Err(CommandError::EmptyDeck);
    }

    let views = drawn
        .into_iter()
        .map(|idx| card_view(catalog, idx, CardAction::Draw))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Reply::Cards { views })
}

fn show_hand(
    registry: &mut Registry,
    catalog: &Catalog,
    ctx: &CommandContext,
) -> Result<Reply, CommandError> {
    let player = registry.resolve_player(ctx.guild_id, ctx.user_id, &ctx.member_ids);
    Ok(Reply::HandReport {
        hand: sorted_cards(catalog, player.hand())?,
        discard: sorted_cards(catalog, player.discard())?,
        deck_remaining: player.deck_remaining(),
    })
}

fn play(
    registry: &mut Registry,
    catalog: &Catalog,
    ctx: &CommandContext,
    keyword: &str,
) -> Result<Reply, CommandError> {
    let tabletop = require_tabletop(registry, ctx)?;
    let player = registry.resolve_player(ctx.guild_id, ctx.user_id, &ctx.member_ids);
    let idx = player
        .play(catalog, keyword)
        .ok_or_else(|| not_found(keyword, SearchScope::Hand))?;
    let view = card_view(catalog, idx, CardAction::Play)?;
    let confirmation = format!("You played {}.", view.card.name);
    Ok(Reply::Played {
        view,
        tabletop,
        confirmation,
    })
}

fn discard(
    registry: &mut Registry,
    catalog: &Catalog,
    ctx: &CommandContext,
    keyword: &str,
) -> Result<Reply, CommandError> {
    // Same transition as play; only the announcement differs.
    require_tabletop(registry, ctx)?;
    let player = registry.resolve_player(ctx.guild_id, ctx.user_id, &ctx.member_ids);
    let idx = player
        .play(catalog, keyword)
        .ok_or_else(|| not_found(keyword, SearchScope::Hand))?;
    let view = card_view(catalog, idx, CardAction::Discard)?;
    Ok(Reply::Cards { views: vec![view] })
}

fn redraw(
    registry: &mut Registry,
    catalog: &Catalog,
    ctx: &CommandContext,
    keyword: &str,
) -> Result<Reply, CommandError> {
    require_tabletop(registry, ctx)?;
    let player = registry.resolve_player(ctx.guild_id, ctx.user_id, &ctx.member_ids);
    let idx = player
        .redraw(catalog, keyword)
        .ok_or_else(|| not_found(keyword, SearchScope::Discard))?;
    let view = card_view(catalog, idx, CardAction::Redraw)?;
    Ok(Reply::Cards { views: vec![view] })
}

fn view(catalog: &Catalog, keyword: &str) -> Result<Reply, CommandError> {
    let idx = catalog
        .find(keyword)
        .ok_or_else(|| not_found(keyword, SearchScope::Catalog))?;
    let view = card_view(catalog, idx, CardAction::View)?;
    Ok(Reply::Cards { views: vec![view] })
}

fn reset(
    registry: &mut Registry,
    ctx: &CommandContext,
    user: Option<UserId>,
) -> Result<Reply, CommandError> {
    match user {
        Some(user) => {
            registry.reset_player(ctx.guild_id, user, &ctx.member_ids);
            Ok(message(format!("Player {user} reset.")))
        }
        None => {
            registry.reset_all(ctx.guild_id, &ctx.member_ids);
            Ok(message("All players reset."))
        }
    }
}

fn peek(
    registry: &mut Registry,
    catalog: &Catalog,
    ctx: &CommandContext,
    user: UserId,
) -> Result<Reply, CommandError> {
    let player = registry.resolve_player(ctx.guild_id, user, &ctx.member_ids);
    Ok(Reply::PileReport {
        user,
        hand: sorted_cards(catalog, player.hand())?,
        discard: sorted_cards(catalog, player.discard())?,
        deck: sorted_cards(catalog, &player.deck_cards())?,
    })
}

fn restore(
    registry: &mut Registry,
    catalog: &Catalog,
    ctx: &CommandContext,
    user: UserId,
    destination: &str,
    keyword: &str,
) -> Result<Reply, CommandError> {
    let pile: Pile = destination
        .parse()
        .map_err(|_| CommandError::InvalidDestination(destination.to_string()))?;
    let idx = catalog
        .find(keyword)
        .ok_or_else(|| not_found(keyword, SearchScope::Catalog))?;
    let name = catalog.get(idx)?.name.clone();

    if registry.move_card(ctx.guild_id, user, &ctx.member_ids, idx, pile) {
        Ok(message(format!("Restored {name} to {pile}.")))
    } else {
        Ok(message(format!("{name} is not in any pile; nothing moved.")))
    }
}

fn require_tabletop(
    registry: &mut Registry,
    ctx: &CommandContext,
) -> Result<ChannelId, CommandError> {
    registry
        .resolve_guild(ctx.guild_id, &ctx.member_ids)
        .tabletop_channel()
        .ok_or(CommandError::TabletopNotSet)
}

fn card_view(
    catalog: &Catalog,
    idx: CardIndex,
    action: CardAction,
) -> Result<CardView, CommandError> {
    Ok(CardView {
        action,
        card: catalog.get(idx)?.clone(),
    })
}

// Presentation-only: the sort never feeds back into matching order.
fn sorted_cards(catalog: &Catalog, indices: &[CardIndex]) -> Result<Vec<Card>, CommandError> {
    let mut cards = indices
        .iter()
        .map(|&idx| catalog.get(idx).cloned())
        .collect::<Result<Vec<_>, _>>()?;
    cards.sort_by_key(|card| card.id);
    Ok(cards)
}

fn not_found(keyword: &str, scope: SearchScope) -> CommandError {
    CommandError::NotFound {
        keyword: keyword.to_string(),
        scope,
    }
}

fn message(text: impl Into<String>) -> Reply {
    Reply::Message { text: text.into() }
}
