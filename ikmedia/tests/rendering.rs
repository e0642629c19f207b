use ikmedia::{
    geometry::{Color, Positioni, Recti, Sizef, Sizei, Sizeu},
    render::{
        FillRectangle, FillRectangleArray, Flip, Line, LineArray, Point, Rectangle, Renderer,
        RendererOptions, Sprite, Texture,
    },
};

fn renderer(width: u32, height: u32) -> Renderer {
    let mut renderer = Renderer::new(Sizeu::new(width, height), RendererOptions::DEFAULT);
    renderer.clear(Color::BLACK);
    renderer
}

fn pixel(renderer: &Renderer, x: i32, y: i32) -> Option<Color> {
    renderer.canvas().pixel(Positioni::new(x, y))
}

/// Left column red, right column blue
fn two_tone() -> eyre::Result<Texture> {
    Texture::from_pixels(Sizei::new(2, 1), vec![Color::RED, Color::BLUE])
}

#[test]
fn shapes_land_where_they_say() {
    let mut renderer = renderer(8, 8);
    renderer.draw(&FillRectangle::new(Recti::new(1, 1, 2, 2), Color::GREEN));
    renderer.draw(&Rectangle::new(Recti::new(4, 4, 3, 3), Color::RED));
    renderer.draw(&Point::new(Positioni::new(7, 0), Color::BLUE));

    assert_eq!(pixel(&renderer, 1, 1), Some(Color::GREEN));
    assert_eq!(pixel(&renderer, 2, 2), Some(Color::GREEN));
    assert_eq!(pixel(&renderer, 3, 3), Some(Color::BLACK));

    assert_eq!(pixel(&renderer, 4, 4), Some(Color::RED));
    assert_eq!(pixel(&renderer, 6, 6), Some(Color::RED));
    assert_eq!(pixel(&renderer, 5, 5), Some(Color::BLACK));

    assert_eq!(pixel(&renderer, 7, 0), Some(Color::BLUE));
}

#[test]
fn viewport_offsets_and_clips_drawing() {
    let mut renderer = renderer(8, 8);
    renderer.set_viewport(Recti::new(4, 4, 2, 2));
    renderer.draw(&FillRectangle::new(Recti::new(0, 0, 8, 8), Color::WHITE));

    assert_eq!(pixel(&renderer, 4, 4), Some(Color::WHITE));
    assert_eq!(pixel(&renderer, 5, 5), Some(Color::WHITE));
    assert_eq!(pixel(&renderer, 6, 6), Some(Color::BLACK));
    assert_eq!(pixel(&renderer, 3, 3), Some(Color::BLACK));

    renderer.reset_viewport();
    assert_eq!(renderer.viewport(), Recti::new(0, 0, 8, 8));
}

#[test]
fn arrays_draw_every_item() {
    let mut renderer = renderer(6, 6);

    let mut rectangles = FillRectangleArray::new(Color::GREEN);
    rectangles.push(Recti::new(0, 0, 1, 1));
    rectangles.push(Recti::new(5, 5, 1, 1));
    renderer.draw(&rectangles);

    let mut polyline = LineArray::new(Color::RED);
    polyline.push(Positioni::new(0, 3));
    polyline.push(Positioni::new(5, 3));
    renderer.draw(&polyline);

    assert_eq!(pixel(&renderer, 0, 0), Some(Color::GREEN));
    assert_eq!(pixel(&renderer, 5, 5), Some(Color::GREEN));
    assert_eq!(pixel(&renderer, 2, 3), Some(Color::RED));
}

#[test]
fn sprite_scales_and_flips_its_texture() -> eyre::Result<()> {
    let texture = two_tone()?;
    let mut renderer = renderer(4, 2);

    let mut sprite = Sprite::new(&texture, Positioni::new(0, 0));
    sprite.scale(Sizef::new(2.0, 2.0));
    assert_eq!(sprite.size(), Sizei::new(4, 2));
    renderer.draw(&sprite);
    assert_eq!(pixel(&renderer, 1, 1), Some(Color::RED));
    assert_eq!(pixel(&renderer, 2, 0), Some(Color::BLUE));

    sprite.set_flip(Flip::Horizontal);
    renderer.draw(&sprite);
    assert_eq!(pixel(&renderer, 0, 0), Some(Color::BLUE));
    assert_eq!(pixel(&renderer, 3, 1), Some(Color::RED));
    Ok(())
}

#[test]
fn snapshot_copies_the_frame() -> eyre::Result<()> {
    let mut renderer = Renderer::new(Sizeu::new(3, 3), RendererOptions::DEFAULT.target_texture());
    renderer.clear(Color::BLUE);
    renderer.draw(&Point::new(Positioni::new(1, 1), Color::RED));

    let frame = renderer.snapshot()?;
    let mut copy = Renderer::new(Sizeu::new(3, 3), RendererOptions::DEFAULT);
    copy.draw(&Sprite::new(&frame, Positioni::new(0, 0)));

    assert_eq!(pixel(&copy, 1, 1), Some(Color::RED));
    assert_eq!(pixel(&copy, 0, 2), Some(Color::BLUE));
    Ok(())
}

#[test]
fn far_reaching_line_stays_on_the_canvas() {
    let mut renderer = renderer(4, 4);
    renderer.draw(&Line::new(
        Positioni::new(0, 1),
        Positioni::new(i32::MAX, 1),
        Color::WHITE,
    ));
    renderer.draw(&Line::new(
        Positioni::new(i32::MIN, i32::MIN),
        Positioni::new(i32::MIN, 3),
        Color::WHITE,
    ));

    let lit = renderer
        .canvas()
        .pixels()
        .iter()
        .filter(|&&pixel| pixel == Color::WHITE.to_0rgb())
        .count();
    assert_eq!(lit, 4);
    for x in 0..4 {
        assert_eq!(pixel(&renderer, x, 1), Some(Color::WHITE));
    }
}
