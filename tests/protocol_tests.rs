use seabattle::{Coordinate, Message, ShotOutcome, ShotResult};

fn c(x: u8, y: u8) -> Coordinate {
    Coordinate::new(x, y)
}

fn json(msg: &Message) -> String {
    String::from_utf8(msg.encode().unwrap()).unwrap()
}

#[test]
fn test_wire_shapes() {
    assert_eq!(json(&Message::Hello), r#"{"type":"HELLO"}"#);
    assert_eq!(json(&Message::Ready), r#"{"type":"READY"}"#);
    assert_eq!(json(&Message::PlayAgain), r#"{"type":"PLAY_AGAIN"}"#);
    assert_eq!(json(&Message::shot(c(3, 7))), r#"{"type":"SHOT","x":3,"y":7}"#);
}

#[test]
fn test_shot_result_shapes() {
    let hit = Message::shot_result(c(1, 2), &ShotOutcome::Hit).unwrap();
    assert_eq!(json(&hit), r#"{"type":"SHOT_RESULT","x":1,"y":2,"result":"hit"}"#);

    let miss = Message::shot_result(c(0, 9), &ShotOutcome::Miss).unwrap();
    assert_eq!(json(&miss), r#"{"type":"SHOT_RESULT","x":0,"y":9,"result":"miss"}"#);

    let sunk = Message::shot_result(c(4, 5), &ShotOutcome::Sunk(vec![c(4, 4), c(4, 5)])).unwrap();
    assert_eq!(
        json(&sunk),
        r#"{"type":"SHOT_RESULT","x":4,"y":5,"result":"sunk","sunkShipCoords":[{"x":4,"y":4},{"x":4,"y":5}]}"#
    );
}

#[test]
fn test_already_shot_is_never_sent() {
    assert_eq!(Message::shot_result(c(0, 0), &ShotOutcome::AlreadyShot), None);
}

#[test]
fn test_decode_peer_messages() {
    assert_eq!(
        Message::decode(br#"{"type":"SHOT","x":9,"y":0}"#).unwrap(),
        Message::Shot { x: 9, y: 0 }
    );
    // field order does not matter, missing sunk list is allowed
    assert_eq!(
        Message::decode(br#"{"result":"miss","y":1,"type":"SHOT_RESULT","x":2}"#).unwrap(),
        Message::ShotResult {
            x: 2,
            y: 1,
            result: ShotResult::Miss,
            sunk_ship_coords: None,
        }
    );
    let sunk = Message::decode(
        br#"{"type":"SHOT_RESULT","x":6,"y":6,"result":"sunk","sunkShipCoords":[{"x":6,"y":6}]}"#,
    )
    .unwrap();
    assert_eq!(sunk, Message::shot_result(c(6, 6), &ShotOutcome::Sunk(vec![c(6, 6)])).unwrap());
}

#[test]
fn test_decode_rejects_garbage() {
    assert!(Message::decode(b"not json").is_err());
    assert!(Message::decode(br#"{"type":"FIRE","x":1,"y":1}"#).is_err());
    assert!(Message::decode(br#"{"type":"SHOT","x":1}"#).is_err());
    assert!(Message::decode(br#"{"type":"SHOT_RESULT","x":1,"y":1,"result":"alreadyShot"}"#).is_err());
    assert!(Message::decode(br#"{"type":"SHOT","x":300,"y":1}"#).is_err());
}

#[test]
fn test_wire_result_to_outcome() {
    assert_eq!(ShotResult::Hit.into_outcome(None), ShotOutcome::Hit);
    assert_eq!(ShotResult::Miss.into_outcome(Some(vec![c(1, 1)])), ShotOutcome::Miss);
    assert_eq!(
        ShotResult::Sunk.into_outcome(Some(vec![c(2, 2)])),
        ShotOutcome::Sunk(vec![c(2, 2)])
    );
    assert_eq!(ShotResult::Sunk.into_outcome(None), ShotOutcome::Sunk(vec![]));
}
