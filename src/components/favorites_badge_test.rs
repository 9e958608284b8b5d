use super::*;

#[test]
fn zero_count_hides_badge() {
    let view = BadgeView::for_count(0);
    assert_eq!(view.text, "0");
    assert!(!view.visible);
    assert_eq!(view.display(), "none");
}

#[test]
fn positive_count_shows_badge_as_flex() {
    let view = BadgeView::for_count(12);
    assert_eq!(view.text, "12");
    assert!(view.visible);
    assert_eq!(view.display(), "flex");
}
