use super::*;
use ratings::PlayerReport;

fn rating(name: &str, value: f64) -> Rating {
    Rating {
        player: Player::from_full_name(name),
        value,
    }
}

#[test]
fn test_file_name_strips_separators() {
    assert_eq!(file_name(&Player::new("Petrov", "Ivan")), "Petrov Ivan");
    assert_eq!(file_name(&Player::new("A/B", "C:D")), "A_B C_D");
}

#[test]
fn test_colliding_file_names_get_suffix() {
    let mut used = HashSet::new();
    assert_eq!(unique_stem("A_B C".to_string(), &mut used), "A_B C");
    assert_eq!(unique_stem("A_B C".to_string(), &mut used), "A_B C (2)");
    assert_eq!(unique_stem("A_B C".to_string(), &mut used), "A_B C (3)");
}

#[test]
fn test_write_reports_keeps_colliding_players() {
    let ledger = |name: &str| PlayerReport {
        player: Player::from_full_name(name),
        ledger: format!("{name}\r\n"),
    };
    let reports = RatingReports {
        system: "elo".to_string(),
        overall: Some(LedgerReport {
            label: "overall".to_string(),
            ranking: String::new(),
            active_ranking: None,
            progression: String::new(),
            players: vec![ledger("A/B C"), ledger("A_B C")],
        }),
        seasons: Vec::new(),
    };
    let out = tempfile::TempDir::new().unwrap();
    write_reports(out.path(), &reports).unwrap();

    let players = system_dir(out.path(), "elo").join("overall").join(PLAYERS_DIR);
    let first = std::fs::read_to_string(players.join("A_B C.csv")).unwrap();
    let second = std::fs::read_to_string(players.join("A_B C (2).csv")).unwrap();
    assert_eq!(first, "A/B C\r\n");
    assert_eq!(second, "A_B C\r\n");
}

#[test]
fn test_system_dir_layout() {
    assert_eq!(
        system_dir(Path::new("out"), "elo"),
        PathBuf::from("out").join("ratings").join("elo")
    );
}

#[test]
fn test_leaderboard_rows_filter_active() {
    let ratings = vec![rating("A One", 1020.0), rating("B Two", 1000.0), rating("C Three", 980.0)];
    let active: HashSet<Player> = [Player::from_full_name("C Three")].into_iter().collect();

    let all = leaderboard_rows(&ratings, &active, false);
    assert_eq!(all.len(), 3);
    assert!(all[2].active);
    assert!(!all[0].active);

    let only = leaderboard_rows(&ratings, &active, true);
    assert_eq!(only.len(), 1);
    assert_eq!(only[0].rank, 1);
    assert_eq!(only[0].player, "C Three");
}

#[test]
fn test_leaderboard_json() {
    let ratings = vec![rating("A One", 1016.0)];
    let json = leaderboard_json(&ratings, &HashSet::new(), false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["rank"], 1);
    assert_eq!(value[0]["player"], "A One");
    assert_eq!(value[0]["rating"], 1016.0);
}
