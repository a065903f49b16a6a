use gamecat_sources::steam::parse_owned_games;
use gamecat_sources::{SourceError, SteamClient};

const OWNED_GAMES: &str = r#"{
  "response": {
    "game_count": 3,
    "games": [
      { "appid": 620, "name": "Portal 2", "playtime_forever": 754, "rtime_last_played": 1600000000 },
      { "appid": 1145360, "name": " Hades ", "playtime_forever": 0, "rtime_last_played": 0 }
    ]
  }
}"#;

#[test]
fn owned_games_are_parsed() {
    let library = parse_owned_games(OWNED_GAMES).unwrap();

    assert_eq!(library.declared_count, 3);
    assert_eq!(library.games.len(), 2);

    let portal = library.find("Portal 2").unwrap();
    assert_eq!(portal.app_id, 620);
    assert_eq!(portal.playtime_minutes, 754);
    assert_eq!(portal.last_played, Some(1_600_000_000));
}

#[test]
fn names_are_trimmed_and_zero_launch_time_means_never() {
    let library = parse_owned_games(OWNED_GAMES).unwrap();
    let hades = library.find("Hades").unwrap();
    assert_eq!(hades.playtime_minutes, 0);
    assert_eq!(hades.last_played, None);
}

#[test]
fn fewer_games_than_declared_is_incomplete() {
    let library = parse_owned_games(OWNED_GAMES).unwrap();
    assert!(library.is_incomplete());

    let complete = parse_owned_games(
        r#"{"response":{"game_count":1,"games":[{"appid":1,"name":"A","playtime_forever":5}]}}"#,
    )
    .unwrap();
    assert!(!complete.is_incomplete());
    assert_eq!(complete.games[0].last_played, None);
}

#[test]
fn private_profile_is_an_empty_library() {
    let library = parse_owned_games(r#"{"response":{}}"#).unwrap();
    assert_eq!(library.declared_count, 0);
    assert!(library.games.is_empty());
}

#[test]
fn malformed_body_is_a_json_error() {
    let err = parse_owned_games("<html>Bad gateway</html>").unwrap_err();
    assert!(matches!(err, SourceError::Json(_)));
    assert!(!err.is_fatal());
}

#[test]
fn missing_credentials_are_fatal() {
    let err = SteamClient::new("", "76561197960287930").err().unwrap();
    assert!(matches!(err, SourceError::MissingCredentials(_)));
    assert!(err.is_fatal());

    let err = SteamClient::new("KEY", "  ").err().unwrap();
    assert!(err.is_fatal());
}

#[test]
fn only_credential_errors_are_fatal() {
    assert!(SourceError::InvalidCredentials("rejected".into()).is_fatal());
    assert!(!SourceError::RateLimit("Steam").is_fatal());
    assert!(
        !SourceError::ServerError {
            status: 500,
            message: "oops".into()
        }
        .is_fatal()
    );
    assert!(!SourceError::Parse("odd".into()).is_fatal());
}
