use super::*;

fn player(name: &str) -> Player {
    Player::from_full_name(name)
}

fn record(tournament: &str, a: &str, b: &str, delta: f64) -> MatchRecord {
    MatchRecord {
        tournament: tournament.to_string(),
        player: player(a),
        rating: 1000.0,
        delta,
        score: 2,
        opponent_score: 0,
        opponent: player(b),
        opponent_rating: 1000.0,
        opponent_delta: -delta,
    }
}

fn close(history: &mut History, pending: TournamentHistory) {
    let ratings = vec![Rating {
        player: player("A One"),
        value: 1000.0,
    }];
    history.record_tournament(pending, ratings);
}

#[test]
fn test_mirrored_swaps_sides() {
    let r = record("cup", "A One", "B Two", 16.0);
    let m = r.mirrored();
    assert_eq!(m.player, player("B Two"));
    assert_eq!(m.opponent, player("A One"));
    assert_eq!(m.delta, -16.0);
    assert_eq!(m.score, 0);
    assert_eq!(m.opponent_score, 2);
    assert_eq!(m.mirrored(), r);
}

#[test]
fn test_records_grouped_by_tournament() {
    let mut history = History::new();

    let mut first = TournamentHistory::new("t1");
    first.add_record(record("t1", "A One", "B Two", 16.0));
    first.add_record(record("t1", "A One", "C Three", 4.0));
    close(&mut history, first);

    let mut second = TournamentHistory::new("t2");
    second.add_record(record("t2", "A One", "B Two", -3.0));
    close(&mut history, second);

    let a = history.player(&player("A One")).unwrap();
    assert_eq!(a.tournaments.len(), 2);
    assert_eq!(a.tournaments[0].tournament, "t1");
    assert_eq!(a.tournaments[0].records.len(), 2);
    assert_eq!(a.tournaments[1].tournament, "t2");
    assert_eq!(a.match_count(), 3);
}

#[test]
fn test_entries_in_close_order() {
    let mut history = History::new();
    assert!(history.is_empty());
    assert!(history.final_ratings().is_none());

    close(&mut history, TournamentHistory::new("t1"));
    close(&mut history, TournamentHistory::new("t2"));

    let names: Vec<&str> = history.entries().iter().map(|e| e.tournament.as_str()).collect();
    assert_eq!(names, vec!["t1", "t2"]);
    assert_eq!(history.len(), 2);
    assert_eq!(history.final_ratings().unwrap().len(), 1);
}

#[test]
fn test_players_in_first_match_order() {
    let mut history = History::new();
    let mut pending = TournamentHistory::new("t1");
    pending.add_record(record("t1", "Zed Z", "Amy A", 1.0));
    pending.add_record(record("t1", "Amy A", "Zed Z", -1.0));
    close(&mut history, pending);

    let names: Vec<String> = history.players().iter().map(|p| p.player.to_string()).collect();
    assert_eq!(names, vec!["Zed Z", "Amy A"]);
    assert!(history.has_matches(&player("Amy A")));
    assert!(!history.has_matches(&player("Nobody N")));
}
