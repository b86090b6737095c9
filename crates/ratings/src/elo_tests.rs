use super::*;

fn player(name: &str) -> Player {
    Player::from_full_name(name)
}

#[test]
fn test_elo_calculation() {
    let settings = EloSettings::default();

    // Equal ratings should give 50% expected score
    let expected = expected_score(1000.0, 1000.0, &settings);
    assert!((expected - 0.5).abs() < 1e-12);

    // 400 points ahead on base 10 means 10:1 odds
    let expected = expected_score(1400.0, 1000.0, &settings);
    assert!((expected - 10.0 / 11.0).abs() < 1e-12);
}

#[test]
fn test_two_nil_between_equals() {
    let settings = EloSettings::standard(16.0).unwrap();
    let mut season = EloSeason::new(settings);
    let p1 = player("P One");
    let p2 = player("P Two");

    let mut tournament = season.tournament("cup");
    let change = tournament.add_match(&p1, &p2, 2, 0).unwrap();
    tournament.close();

    assert!((change - 16.0).abs() < 1e-12);
    let ratings = season.snapshot_ratings();
    assert_eq!(ratings[0].player, p1);
    assert!((ratings[0].value - 1016.0).abs() < 1e-12);
    assert_eq!(ratings[1].player, p2);
    assert!((ratings[1].value - 984.0).abs() < 1e-12);
}

#[test]
fn test_draw_between_equals_changes_nothing() {
    let settings = EloSettings::default();
    assert_eq!(rating_change(1200.0, 1200.0, 0.5, 48.0, &settings), 0.0);
}

#[test]
fn test_zero_sum() {
    let mut season = EloSeason::new(EloSettings::default());
    let a = player("A One");
    let b = player("B Two");
    let mut tournament = season.tournament("cup");
    tournament.add_match(&a, &b, 3, 1).unwrap();
    tournament.add_match(&a, &b, 0, 2).unwrap();
    tournament.close();

    let total: f64 = season.snapshot_ratings().iter().map(|r| r.value).sum();
    assert!((total - 2000.0).abs() < 1e-9);
}

#[test]
fn test_doubling_points_doubles_change() {
    let settings = EloSettings::default();
    let narrow = rating_change(1100.0, 1000.0, 0.75, 4.0 * 16.0, &settings);
    let wide = rating_change(1100.0, 1000.0, 0.75, 8.0 * 16.0, &settings);
    assert!((wide - 2.0 * narrow).abs() < 1e-12);
}

#[test]
fn test_upset_moves_more_than_expected_win() {
    let settings = EloSettings::default();
    let favourite_wins = rating_change(1200.0, 1000.0, 1.0, 32.0, &settings);
    let underdog_wins = rating_change(1000.0, 1200.0, 1.0, 32.0, &settings);
    assert!(favourite_wins > 0.0);
    assert!(underdog_wins > favourite_wins);
}

#[test]
fn test_degenerate_match_is_rejected() {
    let mut season = EloSeason::new(EloSettings::default());
    let mut tournament = season.tournament("cup");
    let err = tournament
        .add_match(&player("A One"), &player("B Two"), 0, 0)
        .unwrap_err();
    assert!(matches!(err, RatingError::DegenerateMatch { .. }));
    tournament.close();

    // Nothing was initialized by the rejected match
    assert!(season.ratings().is_empty());
}

#[test]
fn test_overflowing_total_is_rejected() {
    let mut season = EloSeason::new(EloSettings::default());
    let mut tournament = season.tournament("cup");
    let err = tournament
        .add_match(&player("A One"), &player("B Two"), u32::MAX, 1)
        .unwrap_err();
    assert!(matches!(err, RatingError::ScoreOverflow { .. }));
    tournament.close();
    assert!(season.ratings().is_empty());
}

#[test]
fn test_invalid_settings() {
    assert!(EloSettings::new(0.0, 16.0, 10.0, 400.0).is_err());
    assert!(EloSettings::new(1000.0, -1.0, 10.0, 400.0).is_err());
    assert!(EloSettings::new(1000.0, 16.0, f64::NAN, 400.0).is_err());
    let err = EloSettings::new(1000.0, 16.0, 10.0, 0.0).unwrap_err();
    assert_eq!(
        err,
        RatingError::InvalidSettings {
            name: "logistic_denominator",
            value: 0.0
        }
    );
}

#[test]
fn test_settings_deserialize_validates() {
    let ok: EloSettings = serde_json::from_str(
        r#"{"start_rating":1500,"rating_per_point":8,"logistic_base":10,"logistic_denominator":400}"#,
    )
    .unwrap();
    assert_eq!(ok.start_rating(), 1500.0);
    assert_eq!(ok.rating_per_point(), 8.0);

    let bad = serde_json::from_str::<EloSettings>(
        r#"{"start_rating":1500,"rating_per_point":0,"logistic_base":10,"logistic_denominator":400}"#,
    );
    assert!(bad.is_err());
}

#[test]
fn test_close_records_history() {
    let mut season = EloSeason::new(EloSettings::default());
    let a = player("A One");
    let b = player("B Two");

    let mut tournament = season.tournament("cup");
    tournament.add_match(&a, &b, 2, 1).unwrap();
    tournament.close();

    let history = season.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history.entries()[0].tournament, "cup");

    let a_history = history.player(&a).unwrap();
    let record = &a_history.tournaments[0].records[0];
    assert_eq!(record.rating, 1000.0);
    assert_eq!(record.score, 2);
    assert_eq!(record.opponent_score, 1);
    assert_eq!(record.opponent, b);
    assert_eq!(record.opponent_delta, -record.delta);

    let names: Vec<String> = history.players().iter().map(|p| p.player.to_string()).collect();
    assert_eq!(names, vec!["A One", "B Two"]);
}

#[test]
fn test_records_use_first_spelling() {
    let mut season = EloSeason::new(EloSettings::default());
    let b = player("B Two");

    let mut first = season.tournament("t1");
    first.add_match(&Player::new("Ivan", "Petrov"), &b, 2, 0).unwrap();
    first.close();
    let mut second = season.tournament("t2");
    second.add_match(&b, &Player::new("Petrov", "Ivan"), 1, 1).unwrap();
    second.close();

    let b_history = season.history().player(&b).unwrap();
    let opponents: Vec<String> = b_history
        .tournaments
        .iter()
        .map(|t| t.records[0].opponent.to_string())
        .collect();
    assert_eq!(opponents, vec!["Ivan Petrov", "Ivan Petrov"]);

    let ivan = season.history().player(&Player::new("Petrov", "Ivan")).unwrap();
    assert_eq!(ivan.player.to_string(), "Ivan Petrov");
    assert!(ivan.tournaments[1].records.iter().all(|r| r.player.to_string() == "Ivan Petrov"));
    assert_eq!(season.ratings().all_ratings()[0].player.to_string(), "Ivan Petrov");
}

#[test]
fn test_trait_object_season() {
    let system = EloSystem::new(EloSettings::default());
    assert_eq!(system.name(), "elo");

    let mut season = system.new_season();
    let mut tournament = season.open_tournament("cup");
    tournament
        .add_match(&player("A One"), &player("B Two"), 1, 0)
        .unwrap();
    tournament.close();

    assert_eq!(season.history().len(), 1);
    assert!(season.snapshot_ratings()[0].value > 1000.0);
}
