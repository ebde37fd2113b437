use super::*;

#[test]
fn canvas_rejects_zero_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    let c = Canvas::new(600, 1490).unwrap();
    assert_eq!(c.as_u16(), (600, 1490));
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 600.0, 1490.0));
}
