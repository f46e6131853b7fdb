//! Integration test: team comparison
//!
//! Uses an in-memory completion source in place of the HTTP client.

use ca_tracker::catalog::parse_catalog;
use ca_tracker::error::{LookupError, TeamError};
use ca_tracker::lookup::{CompletionSource, PlayerCompletion};
use ca_tracker::team::{build_team_report, fetch_team, total_points, TeamSortColumn, TeamView};
use ca_tracker::{AchievementId, Catalog, SortDirection};
use std::collections::HashMap;
use std::sync::Mutex;

const CATALOG: &str = r#"{
    "1": {"Name": "Mole Hunter", "Monster": "Giant Mole", "Tier": "Easy", "Type": "KC"},
    "2": {"Name": "Zulrah Veteran", "Monster": "Zulrah", "Tier": "Hard", "Type": "KC"},
    "3": {"Name": "Snake Charmer", "Monster": "Zulrah", "Tier": "Medium", "Type": "Perfection"},
    "4": {"Name": "Dragon Slayer", "Monster": "Vorkath", "Tier": "Elite", "Type": "Mechanical"}
}"#;

/// Completion source backed by a map, recording every name it was asked for.
struct Roster {
    players: HashMap<&'static str, Vec<AchievementId>>,
    asked: Mutex<Vec<String>>,
}

impl Roster {
    fn new() -> Self {
        let players = HashMap::from([
            ("Zezima", vec![1, 2]),
            ("Woox", vec![1, 2, 3]),
            ("Lynx Titan", vec![1]),
        ]);
        Self {
            players,
            asked: Mutex::new(Vec::new()),
        }
    }
}

impl CompletionSource for Roster {
    fn fetch(&self, player: &str) -> Result<PlayerCompletion, LookupError> {
        self.asked.lock().unwrap().push(player.to_string());
        match self.players.get(player) {
            Some(ids) => Ok(PlayerCompletion::new(player, ids.clone())),
            None => Err(LookupError::NotFound {
                player: player.to_string(),
                status: 404,
            }),
        }
    }
}

fn catalog() -> Catalog {
    parse_catalog(CATALOG).expect("fixture parses")
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn ids(entries: &[&ca_tracker::team::TeamEntry]) -> Vec<AchievementId> {
    entries.iter().map(|e| e.record.id).collect()
}

#[test]
fn test_buckets_split_by_completion_count() {
    let roster = Roster::new();
    let players = fetch_team(&roster, &names(&["Zezima", "Woox"])).unwrap();
    let report = build_team_report(&catalog(), players);

    let none: Vec<_> = report.none_completed.iter().map(|e| e.record.id).collect();
    let partial: Vec<_> = report.partial_completion.iter().map(|e| e.record.id).collect();
    assert_eq!(none, vec![4]);
    assert_eq!(partial, vec![3]);
    assert_eq!(report.partial_completion[0].completed_by, 1);
    assert_eq!(report.partial_completion[0].total_players, 2);
}

#[test]
fn test_blank_names_are_skipped() {
    let roster = Roster::new();
    let players = fetch_team(&roster, &names(&["", " Woox ", "   "])).unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(*roster.asked.lock().unwrap(), vec!["Woox".to_string()]);
}

#[test]
fn test_no_names_is_an_error() {
    let roster = Roster::new();
    let err = fetch_team(&roster, &names(&["", " "])).unwrap_err();
    assert!(matches!(err, TeamError::NoPlayers));
    assert_eq!(err.to_string(), "Please enter at least one username");
    assert!(roster.asked.lock().unwrap().is_empty());
}

#[test]
fn test_more_than_four_players_rejected() {
    let roster = Roster::new();
    let err = fetch_team(&roster, &names(&["a", "b", "c", "d", "e"])).unwrap_err();
    assert!(matches!(err, TeamError::TooManyPlayers(4)));
}

#[test]
fn test_first_failure_aborts_remaining_fetches() {
    let roster = Roster::new();
    let err = fetch_team(&roster, &names(&["Zezima", "ghost", "Woox"])).unwrap_err();
    assert_eq!(err.to_string(), "Player \"ghost\" not found");
    assert_eq!(
        *roster.asked.lock().unwrap(),
        vec!["Zezima".to_string(), "ghost".to_string()]
    );
}

#[test]
fn test_view_merges_enabled_buckets() {
    let roster = Roster::new();
    let players = fetch_team(&roster, &names(&["Zezima", "Woox", "Lynx Titan"])).unwrap();
    let report = build_team_report(&catalog(), players);

    let mut view = TeamView::default();
    assert_eq!(ids(&view.displayed(&report)), vec![4]);

    view.show_partial = true;
    // Default order is tier ascending: Medium(3), Hard(2), Elite(4).
    let shown = view.displayed(&report);
    assert_eq!(ids(&shown), vec![3, 2, 4]);
    assert_eq!(total_points(&shown), 2 + 3 + 4);

    view.show_none = false;
    view.show_partial = false;
    assert!(view.displayed(&report).is_empty());
}

#[test]
fn test_sort_column_toggles_direction() {
    let roster = Roster::new();
    let players = fetch_team(&roster, &names(&["Zezima", "Woox", "Lynx Titan"])).unwrap();
    let report = build_team_report(&catalog(), players);
    let mut view = TeamView {
        show_none: true,
        show_partial: true,
        sort: None,
    };

    view.toggle_sort(TeamSortColumn::CompletedBy);
    assert_eq!(view.sort, Some((TeamSortColumn::CompletedBy, SortDirection::Ascending)));
    // 4 by nobody, 3 by one player, 2 by two.
    assert_eq!(ids(&view.displayed(&report)), vec![4, 3, 2]);

    view.toggle_sort(TeamSortColumn::CompletedBy);
    assert_eq!(ids(&view.displayed(&report)), vec![2, 3, 4]);

    view.toggle_sort(TeamSortColumn::Monster);
    assert_eq!(view.sort, Some((TeamSortColumn::Monster, SortDirection::Ascending)));
    // Vorkath, then the two Zulrah entries in bucket order.
    assert_eq!(ids(&view.displayed(&report)), vec![4, 3, 2]);
}
