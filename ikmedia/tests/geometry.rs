use ikmedia::geometry::{Color, Position, Positionf, Positioni, Rect, Rectf, Recti, Size, Sizei};

#[test]
fn with_position_keeps_size_and_with_size_keeps_position() {
    let rects = [
        Recti::new(0, 0, 0, 0),
        Recti::new(-3, 7, 12, 1),
        Recti::new(i32::MAX / 2, -1, 5, 9),
    ];
    let positions = [Positioni::new(0, 0), Positioni::new(-100, 100)];
    let sizes = [Sizei::new(1, 1), Sizei::new(640, 480)];

    for rect in rects {
        for position in positions {
            assert_eq!(rect.with_position(position).size(), rect.size());
        }
        for size in sizes {
            assert_eq!(rect.with_size(size).position(), rect.position());
        }
    }
}

#[test]
fn float_rects_follow_the_same_rules() {
    let rect = Rectf::from_parts(Positionf::new(0.5, 1.5), Size::new(2.0, 3.0));
    let moved = rect.with_position(Position::new(10.0, 10.0));

    assert_eq!(moved.size(), rect.size());
    assert!(moved.contains(Positionf::new(12.0, 13.0)));
    assert!(!moved.intersects(&rect));
}

#[test]
fn positions_and_sizes_do_arithmetic_per_component() {
    assert_eq!(
        Positioni::new(1, 2) + Positioni::new(10, 20),
        Positioni::new(11, 22)
    );
    assert_eq!(Sizei::new(8, 6) / Sizei::new(2, 3), Sizei::new(4, 2));
}

#[test]
fn colors_are_plain_values() {
    let color = Color::rgba(10, 20, 30, 40);
    assert_eq!(Color { a: 255, ..color }, Color::rgb(10, 20, 30));
    assert_eq!(Rect::<i32>::default(), Recti::new(0, 0, 0, 0));
}
