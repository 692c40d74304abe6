//! Builder composition contracts: dimensions, layout, error paths

use avagen::builder::{
    CircleMask, Compose, FillStyle, Grid, ImageBuilder, LongShadow, Margin, RandomChoice,
    RandomFillStyle, RoundedRectMask, ScoreShadow, Shadow, ShadowSpec, Square,
};
use avagen::{AvatarError, Color, SeededRandom};

fn fill(color: Color) -> Box<dyn ImageBuilder> {
    Box::new(FillStyle::new(color))
}

#[test]
fn every_combinator_honors_requested_dimensions() {
    let builders: Vec<Box<dyn ImageBuilder>> = vec![
        Box::new(Compose::new(vec![fill(Color::rgb(1, 2, 3)), fill(Color::rgba(0, 0, 0, 9))])),
        Box::new(Margin::uniform(fill(Color::rgb(1, 2, 3)), 5)),
        Box::new(Grid::new(fill(Color::rgb(1, 2, 3)), 3, 2)),
        Box::new(CircleMask::new(fill(Color::rgb(1, 2, 3)))),
        Box::new(RoundedRectMask::with_default_radius(fill(Color::rgb(1, 2, 3)))),
        Box::new(Shadow::new(fill(Color::rgb(1, 2, 3)), ShadowSpec::default())),
        Box::new(ScoreShadow::with_default_color(fill(Color::rgb(1, 2, 3)))),
        Box::new(LongShadow::with_default_color(fill(Color::rgb(1, 2, 3)))),
        Box::new(RandomFillStyle::default()),
    ];
    for builder in builders {
        let mut random = SeededRandom::from_id("dim");
        let canvas = builder.render(&mut random, 97, 41).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (97, 41));
    }
}

#[test]
fn grid_tiles_squares_across_a_wide_banner() {
    let grid = Grid::new(Box::new(Square::with_default_palette(3).unwrap()), 4, 1);
    let mut random = SeededRandom::from_id("banner");
    let canvas = grid.render(&mut random, 512, 128).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (512, 128));

    // Four 128x128 cells; each cell's square fills the whole cell
    for cell in 0..4u32 {
        let cx = cell * 128 + 64;
        assert_eq!(canvas.pixel(cx, 64).alpha, 255, "cell {cell} center");
        assert_eq!(canvas.pixel(cell * 128, 0).alpha, 255, "cell {cell} corner");
    }
}

#[test]
fn grid_cells_share_one_random_stream() {
    let grid = Grid::new(Box::new(Square::with_default_palette(3).unwrap()), 2, 1);
    let mut random = SeededRandom::from_id("stream");
    let canvas = grid.render(&mut random, 128, 64).unwrap();

    // With independent draws per cell the two halves almost surely differ
    let mut identical = true;
    for y in 0..64 {
        for x in 0..64 {
            if canvas.pixel(x, y) != canvas.pixel(x + 64, y) {
                identical = false;
            }
        }
    }
    assert!(!identical, "grid cells rendered identically");
}

#[test]
fn grid_rejects_zero_dimensions() {
    for (gx, gy) in [(0, 1), (1, 0)] {
        let grid = Grid::new(fill(Color::rgb(0, 0, 0)), gx, gy);
        let mut random = SeededRandom::from_id("g");
        assert!(matches!(
            grid.render(&mut random, 8, 8).unwrap_err(),
            AvatarError::InvalidArgument { .. }
        ));
    }
}

#[test]
fn margin_larger_than_image_is_invalid() {
    let margin = Margin::uniform(fill(Color::rgb(0, 0, 0)), 40);
    let mut random = SeededRandom::from_id("m");
    let err = margin.render(&mut random, 64, 64).unwrap_err();
    assert!(matches!(err, AvatarError::InvalidArgument { .. }));
}

#[test]
fn margin_leaves_the_border_transparent() {
    let margin = Margin::uniform(fill(Color::rgb(9, 9, 9)), 4);
    let mut random = SeededRandom::from_id("m");
    let canvas = margin.render(&mut random, 16, 16).unwrap();
    assert_eq!(canvas.pixel(0, 0).alpha, 0);
    assert_eq!(canvas.pixel(3, 8).alpha, 0);
    assert_eq!(canvas.pixel(8, 8), Color::rgb(9, 9, 9));
}

#[test]
fn random_choice_picks_exactly_one_child() {
    let choice = RandomChoice::new(vec![
        fill(Color::rgb(255, 0, 0)),
        fill(Color::rgb(0, 255, 0)),
    ]);
    let mut random = SeededRandom::from_id("pick");
    let canvas = choice.render(&mut random, 8, 8).unwrap();
    let pixel = canvas.pixel(4, 4);
    assert!(pixel == Color::rgb(255, 0, 0) || pixel == Color::rgb(0, 255, 0));
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(canvas.pixel(x, y), pixel);
        }
    }
}

#[test]
fn random_choice_rejects_empty_children() {
    let choice = RandomChoice::new(Vec::new());
    let mut random = SeededRandom::from_id("pick");
    assert!(matches!(
        choice.render(&mut random, 8, 8).unwrap_err(),
        AvatarError::InvalidArgument { .. }
    ));
}

#[test]
fn empty_compose_is_a_blank_canvas() {
    let compose = Compose::new(Vec::new());
    let mut random = SeededRandom::from_id("blank");
    let canvas = compose.render(&mut random, 8, 8).unwrap();
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(canvas.pixel(x, y).alpha, 0);
        }
    }
}

#[test]
fn compose_draws_later_children_on_top() {
    let compose = Compose::new(vec![
        fill(Color::rgb(255, 0, 0)),
        Box::new(Margin::uniform(fill(Color::rgb(0, 0, 255)), 2)),
    ]);
    let mut random = SeededRandom::from_id("stack");
    let canvas = compose.render(&mut random, 8, 8).unwrap();
    assert_eq!(canvas.pixel(0, 0), Color::rgb(255, 0, 0));
    assert_eq!(canvas.pixel(4, 4), Color::rgb(0, 0, 255));
}
