//! End-to-end scenarios: spawn, collect, fail, get hurt, win, lose.

use super::*;

#[test]
fn spawn_room_entry_issues_a_request_on_the_first_tick() {
    let mut game = new_game(1, 7);
    let ticket = game.advance().expect("player spawns on the first room");

    assert_eq!(ticket.room, game.state.room_order[0]);
    assert_eq!(ticket.endpoint.id, "ep-0");
    let pending = game.state.pending_request.expect("pending slot is set at issuance");
    assert_eq!(pending.room, ticket.room);
    assert!(pending.loading);
    assert!(game.drain_cues().contains(&AudioCue::EnterRoom));
}

#[test]
fn single_success_sets_victory_and_scores_150() {
    let mut game = new_game(1, 7);
    let ticket = game.advance().expect("spawn entry");

    game.resolve_request(Resolution { room: ticket.room, outcome: success_outcome() });

    assert!(game.state.victory);
    assert!(!game.state.game_over);
    assert_eq!(game.state.score, 150, "100 base + 50 time bonus at combo 1x");
    assert_eq!(game.state.player.combo, 1);
    assert_eq!(game.state.player.collected, 1);
    assert_eq!(game.state.pending_request, None);
    let room = &game.state.rooms[ticket.room];
    assert!(room.visited);
    assert!(!room.has_collectible);
    let cues = game.drain_cues();
    assert!(cues.contains(&AudioCue::Success));
    assert!(cues.contains(&AudioCue::Victory));
}

#[test]
fn single_404_spawns_a_ghost_and_keeps_the_run_alive() {
    let mut game = new_game(1, 7);
    let ticket = game.advance().expect("spawn entry");

    game.resolve_request(Resolution { room: ticket.room, outcome: failure_outcome(404) });

    let room = &game.state.rooms[ticket.room];
    assert!(room.visited);
    let monster = room.monster.as_ref().expect("a failure spawns a monster");
    assert_eq!(monster.kind, MonsterKind::Ghost);
    assert_eq!(monster.error, ErrorCode::Status(404));
    assert!(monster.active);
    assert!((monster.speed - 1.2).abs() < 1e-6, "404 speed at difficulty 1.0");
    assert_eq!(monster.pos, Vec2::from(room.cell));

    assert!(!game.state.game_over);
    assert!(!game.state.victory);
    assert_eq!(game.state.score, 0);
    assert_eq!(game.state.player.combo, 0);
    assert_eq!(game.state.pending_request, None);
    let cues = game.drain_cues();
    assert!(cues.contains(&AudioCue::Error));
    assert!(cues.contains(&AudioCue::Monster));
}

#[test]
fn timeout_spawns_a_slow_wraith() {
    let mut game = new_game(1, 7);
    let ticket = game.advance().expect("spawn entry");

    game.resolve_request(Resolution { room: ticket.room, outcome: timeout_outcome() });

    let monster = game.state.rooms[ticket.room].monster.as_ref().expect("monster");
    assert_eq!(monster.kind, MonsterKind::Wraith);
    assert_eq!(monster.error, ErrorCode::Timeout);
    assert!((monster.speed - 0.5).abs() < 1e-6);
}

#[test]
fn server_errors_spawn_fast_demons_scaled_by_difficulty() {
    let mut game = new_game(1, 7);
    let ticket = game.advance().expect("spawn entry");
    // Past the first difficulty step the spawn speed scales up.
    advance_for(&mut game, 31_000);
    assert!((game.state.difficulty - 1.2).abs() < 1e-6);

    game.resolve_request(Resolution { room: ticket.room, outcome: failure_outcome(503) });

    let monster = game.state.rooms[ticket.room].monster.as_ref().expect("monster");
    assert_eq!(monster.kind, MonsterKind::Demon);
    assert!((monster.speed - 1.5 * 1.2).abs() < 1e-6);
}

#[test]
fn three_unprotected_hits_end_the_run_on_the_third() {
    let mut game = new_game(1, 7);
    game.state.player.combo = 3;

    game.take_damage();
    assert_eq!(game.state.player.lives, 2);
    assert_eq!(game.state.player.combo, 0, "first hit resets the combo");
    assert!(game.state.player.invincible);
    assert!(!game.state.game_over);
    assert_eq!(game.state.screen_shake, SHAKE_HIT);

    advance_for(&mut game, INVINCIBILITY_MS + TICK_MS);
    assert!(!game.state.player.invincible, "invincibility expires with its deadline");
    game.take_damage();
    assert_eq!(game.state.player.lives, 1);

    advance_for(&mut game, INVINCIBILITY_MS + TICK_MS);
    game.take_damage();
    assert_eq!(game.state.player.lives, 0);
    assert!(game.state.game_over);
    assert!(!game.state.victory);
    assert_eq!(game.state.screen_shake, SHAKE_GAME_OVER);
    assert_eq!(game.events().last(), Some(&GameEvent::GameOver));
}

#[test]
fn consecutive_collections_within_the_window_stack_the_combo() {
    let mut game = new_game(2, 7);
    let first = game.advance().expect("spawn entry");
    game.resolve_request(Resolution { room: first.room, outcome: success_outcome() });
    assert_eq!(game.state.player.combo, 1);
    assert_eq!(game.state.score, 150);

    let second_room = game.state.room_order[1];
    teleport_to_room(&mut game, second_room);
    let second = advance_until_ticket(&mut game, 4);
    assert_eq!(second.room, second_room);
    game.resolve_request(Resolution { room: second.room, outcome: success_outcome() });

    assert_eq!(game.state.player.combo, 2);
    let second_points = game
        .events()
        .iter()
        .rev()
        .find_map(|event| match event {
            GameEvent::Collected { points, combo, .. } if *combo == 2 => Some(*points),
            _ => None,
        })
        .expect("second collection recorded");
    assert_eq!(second_points, 300, "(100 + 50) * 2x combo");
    assert!(second_points > 2 * BASE_SCORE);
    assert_eq!(game.state.score, 450);
    assert!(game.state.victory, "both collectibles cleared");
}

#[test]
fn collection_outside_the_window_restarts_the_combo_at_one() {
    let mut game = new_game(2, 7);
    let first = game.advance().expect("spawn entry");
    game.resolve_request(Resolution { room: first.room, outcome: success_outcome() });

    advance_for(&mut game, COMBO_WINDOW_MS + TICK_MS);
    let second_room = game.state.room_order[1];
    teleport_to_room(&mut game, second_room);
    let second = advance_until_ticket(&mut game, 4);
    game.resolve_request(Resolution { room: second.room, outcome: success_outcome() });

    assert_eq!(game.state.player.combo, 1);
}

#[test]
fn failure_resets_the_combo_to_zero() {
    let mut game = new_game(2, 7);
    let first = game.advance().expect("spawn entry");
    game.resolve_request(Resolution { room: first.room, outcome: success_outcome() });
    assert_eq!(game.state.player.combo, 1);

    let second_room = game.state.room_order[1];
    teleport_to_room(&mut game, second_room);
    let second = advance_until_ticket(&mut game, 4);
    game.resolve_request(Resolution { room: second.room, outcome: failure_outcome(500) });

    assert_eq!(game.state.player.combo, 0);
}

#[test]
fn deferred_power_up_grant_lands_on_a_later_tick() {
    let mut game = new_game(1, 7);
    game.pending_power_up =
        Some(PendingGrant { kind: PowerUp::Shield, grant_at_ms: game.now_ms + 50 });

    game.advance();
    assert_eq!(game.state.player.power_up, None, "grant delay has not elapsed");
    game.advance();
    assert_eq!(game.state.player.power_up, Some(PowerUp::Shield));
    assert!(game.state.player.invincible);
}

#[test]
fn power_up_effects_apply_immediately() {
    let mut game = new_game(1, 7);

    game.activate_power_up(PowerUp::Freeze);
    assert!(game.state.monsters_frozen);
    assert_eq!(game.state.freeze_until_ms, game.now_ms + FREEZE_MS);

    game.activate_power_up(PowerUp::Reveal);
    assert!(game.state.flashlight_forced);
    assert!(game.state.effective_flashlight());
    assert!(!game.state.player.flashlight_on, "reveal never touches the toggle itself");

    game.activate_power_up(PowerUp::Shield);
    assert!(game.state.player.invincible);
}
