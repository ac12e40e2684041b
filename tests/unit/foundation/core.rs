use super::*;

#[test]
fn session_id_advances_by_one() {
    let s = SessionId::default();
    assert_eq!(s.next(), SessionId(1));
    assert_eq!(s.next().next(), SessionId(2));
}

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(1080, 1920).unwrap();
    assert_eq!(c.center(), Point::new(540.0, 960.0));
}

#[test]
fn ids_serialize_transparently() {
    let s = serde_json::to_string(&SceneId(7)).unwrap();
    assert_eq!(s, "7");
    let p: PointerId = serde_json::from_str("3").unwrap();
    assert_eq!(p, PointerId(3));
}
