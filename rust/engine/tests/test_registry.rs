use fateweaver_engine::player::Pile;
use fateweaver_engine::registry::Registry;

const GUILD: u64 = 100;
const ALICE: u64 = 1;
const BOB: u64 = 2;

#[test]
fn resolve_guild_seeds_a_player_per_member() {
    let mut registry = Registry::new(22);
    let guild = registry.resolve_guild(GUILD, &[ALICE, BOB]);
    assert_eq!(guild.player_count(), 2);
    assert_eq!(guild.player(ALICE).unwrap().deck_remaining(), 22);
}

#[test]
fn resolve_player_is_idempotent() {
    let mut registry = Registry::new(22);

    registry.resolve_player(GUILD, ALICE, &[]).draw();
    let hand_len = registry.resolve_player(GUILD, ALICE, &[]).hand().len();
    assert_eq!(hand_len, 1, "second resolve returns the same player");
    assert_eq!(registry.guild(GUILD).unwrap().player_count(), 1);
}

#[test]
fn late_joiner_gets_a_player_on_first_contact() {
    let mut registry = Registry::new(22);
    registry.resolve_guild(GUILD, &[ALICE]);

    registry.resolve_player(GUILD, BOB, &[ALICE]);
    assert_eq!(registry.guild(GUILD).unwrap().player_count(), 2);
}

#[test]
fn tabletop_channel_is_recorded() {
    let mut registry = Registry::new(22);
    assert_eq!(
        registry.resolve_guild(GUILD, &[]).tabletop_channel(),
        None
    );

    registry.set_tabletop(GUILD, &[], 555);
    assert_eq!(
        registry.guild(GUILD).unwrap().tabletop_channel(),
        Some(555)
    );
}

#[test]
fn reset_player_pools_cards_back_into_the_deck() {
    let mut registry = Registry::new(22);
    let player = registry.resolve_player(GUILD, ALICE, &[]);
    player.draw();
    player.draw();
    assert_eq!(player.hand().len(), 2);

    registry.reset_player(GUILD, ALICE, &[]);
    let player = registry.resolve_player(GUILD, ALICE, &[]);
    assert!(player.hand().is_empty());
    assert_eq!(player.deck_remaining(), 22);
}

#[test]
fn reset_all_touches_every_player() {
    let mut registry = Registry::new(22);
    registry.resolve_player(GUILD, ALICE, &[]).draw();
    registry.resolve_player(GUILD, BOB, &[]).draw();

    registry.reset_all(GUILD, &[]);

    for user in [ALICE, BOB] {
        let player = registry.resolve_player(GUILD, user, &[]);
        assert!(player.hand().is_empty());
        assert_eq!(player.deck_remaining(), 22);
    }
}

#[test]
fn move_card_is_scoped_to_the_addressed_player() {
    let mut registry = Registry::new(22);
    let drawn = registry
        .resolve_player(GUILD, ALICE, &[])
        .draw()
        .expect("fresh deck");

    assert!(registry.move_card(GUILD, ALICE, &[], drawn, Pile::Discard));
    assert_eq!(
        registry.resolve_player(GUILD, ALICE, &[]).discard(),
        &[drawn]
    );

    // Bob never drew; the same index lives in his deck, untouched by Alice's move.
    let bob = registry.resolve_player(GUILD, BOB, &[]);
    assert_eq!(bob.deck_remaining(), 22);
}

#[test]
fn guilds_are_partitioned_by_id() {
    let mut registry = Registry::new(22);
    registry.resolve_player(GUILD, ALICE, &[]).draw();
    registry.resolve_player(GUILD + 1, ALICE, &[]);

    assert_eq!(registry.guild_count(), 2);
    assert_eq!(
        registry
            .guild(GUILD + 1)
            .unwrap()
            .player(ALICE)
            .unwrap()
            .hand()
            .len(),
        0,
        "the same user id in another guild has independent piles"
    );
}
