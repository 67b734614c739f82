use image_morph::{dilate, pixel, Cpu, DirSet, Edge, Error, Grid};
use image_morph_bridge::{export_rect, import, LumaWeights, Mode, PixelBlock};

#[test]
fn dilate_an_imported_block() -> Result<(), Error> {
    let (width, height) = (9, 7);
    let mut data = vec![0u8; width * height];
    data[3 * width + 4] = 1;

    let block = PixelBlock::packed(&data, width as u32, height as u32, Mode::One)?;
    let dot = import(&block, LumaWeights::default())?;

    let mut disk = dot.like(dot.depth())?;
    dilate(&Cpu, &dot, &mut disk, 1, DirSet::all(Grid::Square), Grid::Square, Edge::Empty)?;
    assert_eq!(pixel::volume(&disk), 9);

    let out = export_rect(&disk, Mode::One, width as u32, height as u32)?;
    for (idx, &px) in out.iter().enumerate() {
        let (x, y) = (idx % width, idx / width);
        let expected = if x.abs_diff(4) <= 1 && y.abs_diff(3) <= 1 { 255 } else { 0 };
        assert_eq!(px, expected, "at {}", idx);
    }

    Ok(())
}

#[test]
fn strided_grey_round_trip() -> Result<(), Error> {
    let (width, height, stride) = (6u32, 4u32, 16usize);
    let data: Vec<u8> = (0..stride * height as usize).map(|i| (i * 7 % 256) as u8).collect();

    let block = PixelBlock::new(&data, width, height, stride, Mode::L)?;
    let image = import(&block, LumaWeights::default())?;
    let out = export_rect(&image, Mode::L, width, height)?;

    for (y, row) in out.chunks_exact(width as usize).enumerate() {
        assert_eq!(row, &data[y * stride..][..width as usize], "at {}", y);
    }

    Ok(())
}
