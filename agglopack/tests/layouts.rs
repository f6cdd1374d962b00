use std::fmt::Write;

use agglopack::{
    pack, AlgorithmKind, Dimension, Item, PackError, Rect, Settings, SheetSize, Vector2,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A small linear congruential generator so that the item sets are varied
/// but identical on every run.
fn sizes(count: usize, max: u32, mut seed: u32) -> Vec<Item> {
    (0..count)
        .map(|_| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let width = (seed >> 16) % max + 1;
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let height = (seed >> 16) % max + 1;

            Item::new((width, height))
        })
        .collect()
}

fn render(items: &[Item], sheet: Vector2) -> String {
    let mut output = String::new();

    for item in items {
        let rect = item.rect().unwrap();
        writeln!(output, "{},{} {}", rect.pos.x, rect.pos.y, rect.size).unwrap();
    }
    write!(output, "sheet {}", sheet).unwrap();

    output
}

fn assert_valid_layout(items: &[Item], sheet: Vector2) {
    let bounds = Rect::new((0, 0), sheet);
    let rects: Vec<Rect> = items.iter().map(|item| item.rect().unwrap()).collect();

    for (index, rect) in rects.iter().enumerate() {
        assert!(
            bounds.contains(rect),
            "item {} at {:?} is outside the {} sheet",
            index,
            rect,
            sheet
        );

        for (other_index, other) in rects.iter().enumerate().skip(index + 1) {
            assert!(
                !rect.intersects(other),
                "item {} ({:?}) overlaps item {} ({:?})",
                index,
                rect,
                other_index,
                other
            );
        }
    }

    assert!(items.iter().all(|item| !item.rotated()));
}

#[test]
fn three_equal_squares() {
    init_logging();

    let mut items = vec![Item::new((10, 10)); 3];
    let packed = pack(&mut items, &Settings::default()).unwrap();

    insta::assert_snapshot!(render(&items, packed.size), @r###"
    0,0 10x10
    0,10 10x10
    10,0 10x10
    sheet 20x20
    "###);
}

#[test]
fn mixed_sizes() {
    init_logging();

    let mut items = vec![Item::new((4, 4)), Item::new((2, 16)), Item::new((8, 8))];
    let packed = pack(&mut items, &Settings::default()).unwrap();

    insta::assert_snapshot!(render(&items, packed.size), @r###"
    2,8 4x4
    0,0 2x16
    2,0 8x8
    sheet 10x16
    "###);
}

#[test]
fn single_item() {
    init_logging();

    let mut items = vec![Item::new((50, 30))];
    let packed = pack(&mut items, &Settings::default()).unwrap();

    assert_eq!(packed.size, Vector2::new(50, 30));
    assert_eq!(items[0].position(), Some(Vector2::zero()));
}

#[test]
fn empty_input() {
    init_logging();

    let mut items: Vec<Item> = Vec::new();
    let packed = pack(&mut items, &Settings::default()).unwrap();

    assert_eq!(packed.size, Vector2::zero());
}

#[test]
fn out_of_space_leaves_item_unplaced() {
    init_logging();

    let mut items = vec![Item::new((40, 40))];
    let settings = Settings::default().with_size(SheetSize::fixed(32, 32));

    let err = pack(&mut items, &settings).unwrap_err();

    assert!(matches!(err, PackError::OutOfSpace { .. }));
    assert_eq!(items[0].position(), None);
}

#[test]
fn many_items_never_overlap() {
    init_logging();

    for (seed, algorithm) in [
        (1, AlgorithmKind::BinaryTree),
        (7, AlgorithmKind::BinaryTree),
        (42, AlgorithmKind::BinaryTree),
        (3, AlgorithmKind::Inline),
    ]
    .iter()
    {
        let mut items = sizes(200, 64, *seed);
        let packed = pack(&mut items, &Settings::new(*algorithm)).unwrap();

        assert_valid_layout(&items, packed.size);
    }
}

#[test]
fn fixed_axes_are_preserved() {
    init_logging();

    let mut items = sizes(100, 64, 9);
    let settings =
        Settings::default().with_size(SheetSize::new(Dimension::Fixed(64), Dimension::Auto));

    let packed = pack(&mut items, &settings).unwrap();

    assert_eq!(packed.size.x, 64);
    assert_valid_layout(&items, packed.size);

    let mut items = sizes(100, 64, 9);
    let settings =
        Settings::default().with_size(SheetSize::new(Dimension::Auto, Dimension::Fixed(64)));

    let packed = pack(&mut items, &settings).unwrap();

    assert_eq!(packed.size.y, 64);
    assert_valid_layout(&items, packed.size);
}

#[test]
fn packing_is_deterministic() {
    init_logging();

    let mut first = sizes(150, 100, 5);
    let mut second = first.clone();

    let first_size = pack(&mut first, &Settings::default()).unwrap().size;
    let second_size = pack(&mut second, &Settings::default()).unwrap().size;

    assert_eq!(first_size, second_size);
    assert_eq!(first, second);
}

#[test]
fn sizes_are_untouched() {
    init_logging();

    let original = sizes(50, 30, 11);
    let mut items = original.clone();

    pack(&mut items, &Settings::default()).unwrap();

    for (before, after) in original.iter().zip(&items) {
        assert_eq!(before.size(), after.size());
    }
}
