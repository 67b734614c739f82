use image_morph::{Depth, Error};

use crate::{export, export_rect, import, LumaWeights, Mode, PixelBlock};

#[test]
fn mode_names() -> Result<(), Error> {
    for mode in Mode::ALL {
        assert_eq!(Mode::from_name(mode.name())?, mode);
    }

    assert_eq!(Mode::from_name("YCbCr"), Err(Error::BadParameter));
    assert_eq!(Mode::from_name("rgb"), Err(Error::BadParameter));
    assert_eq!(Mode::Rgb.bytes_per_pixel(), 3);
    assert_eq!(Mode::F.depth(), Depth::Word);
    Ok(())
}

#[test]
fn block_validation() {
    let data = [0u8; 20];
    assert!(PixelBlock::new(&data, 4, 2, 8, Mode::L).is_ok());
    // The last row needs no padding.
    assert!(PixelBlock::new(&data[..12], 4, 2, 8, Mode::L).is_ok());

    assert_eq!(
        PixelBlock::new(&data, 4, 2, 3, Mode::L).unwrap_err(),
        Error::BadSize
    );
    assert_eq!(
        PixelBlock::new(&data, 4, 3, 10, Mode::L).unwrap_err(),
        Error::LoadDataSize
    );
    assert_eq!(
        PixelBlock::new(&data, 0, 3, 8, Mode::L).unwrap_err(),
        Error::BadSize
    );
    assert_eq!(
        PixelBlock::packed(&data, 3, 2, Mode::Rgba).unwrap_err(),
        Error::LoadDataSize
    );
}

#[test]
fn weights() -> Result<(), Error> {
    assert_eq!(LumaWeights::default(), LumaWeights::BT601);
    assert_eq!(LumaWeights::new(0.5, 0.5, 0.5), Err(Error::BadValue));
    assert_eq!(LumaWeights::new(-0.5, 1.0, 0.5), Err(Error::BadValue));
    assert_eq!(LumaWeights::new(f32::NAN, 0.5, 0.5), Err(Error::BadValue));

    let red = LumaWeights::new(1.0, 0.0, 0.0)?;
    assert_eq!(red.apply([200, 10, 10]), 200);
    assert_eq!(LumaWeights::BT601.apply([0, 0, 0]), 0);
    assert_eq!(LumaWeights::BT601.apply([100, 100, 100]), 100);
    Ok(())
}

#[test]
fn grey_blocks() -> Result<(), Error> {
    let data: Vec<u8> = (0..24).collect();
    let block = PixelBlock::new(&data, 5, 3, 8, Mode::L)?;
    let image = import(&block, LumaWeights::default())?;

    assert_eq!(image.depth(), Depth::Byte);
    assert_eq!(image.get_pixel(4, 0)?, 4);
    assert_eq!(image.get_pixel(0, 2)?, 16);
    assert_eq!(image.get_pixel(5, 0)?, 0);

    let out = export_rect(&image, Mode::L, 5, 3)?;
    assert_eq!(out.len(), 15);
    assert_eq!(&out[5..10], &data[8..13]);
    Ok(())
}

#[test]
fn integer_and_float_blocks() -> Result<(), Error> {
    let ints: Vec<u8> = [-1i32, 7, i32::MIN]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    let block = PixelBlock::packed(&ints, 3, 1, Mode::I)?;
    let image = import(&block, LumaWeights::default())?;
    assert_eq!(image.get_pixel(0, 0)?, u32::MAX);
    assert_eq!(image.get_pixel(1, 0)?, 7);
    assert_eq!(image.get_pixel(2, 0)?, 0x8000_0000);
    assert_eq!(export_rect(&image, Mode::I, 3, 1)?, ints);

    let floats: Vec<u8> = [2.75f32, -2.75, 0.5]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    let block = PixelBlock::packed(&floats, 3, 1, Mode::F)?;
    let image = import(&block, LumaWeights::default())?;
    assert_eq!(image.get_pixel(0, 0)?, 2);
    assert_eq!(image.get_pixel(1, 0)?, (-2i32) as u32);
    assert_eq!(image.get_pixel(2, 0)?, 0);
    Ok(())
}

#[test]
fn color_blocks() -> Result<(), Error> {
    let cmyk = [10, 20, 30, 55, 0, 0, 0, 255];
    let block = PixelBlock::packed(&cmyk, 2, 1, Mode::Cmyk)?;
    let image = import(&block, LumaWeights::default())?;
    assert_eq!(image.get_pixel(0, 0)?, 200);
    assert_eq!(image.get_pixel(1, 0)?, 0);

    let rgba = [0, 0, 200, 0, 50, 50, 50, 255];
    let block = PixelBlock::packed(&rgba, 2, 1, Mode::Rgba)?;
    let blue = LumaWeights::new(0.0, 0.0, 1.0)?;
    let image = import(&block, blue)?;
    assert_eq!(image.get_pixel(0, 0)?, 200);
    assert_eq!(image.get_pixel(1, 0)?, 50);
    Ok(())
}

#[test]
fn binary_blocks() -> Result<(), Error> {
    let data = [0, 1, 255, 0, 0, 0, 0, 9];
    let block = PixelBlock::packed(&data, 4, 2, Mode::One)?;
    let image = import(&block, LumaWeights::default())?;
    assert_eq!(image.depth(), Depth::Bit);
    assert_eq!(image.get_pixel(1, 0)?, 1);
    assert_eq!(image.get_pixel(3, 1)?, 1);
    assert_eq!(image.get_pixel(3, 0)?, 0);

    let out = export_rect(&image, Mode::One, 4, 2)?;
    assert_eq!(out, [0, 255, 255, 0, 0, 0, 0, 255]);

    let whole = export(&image, Mode::One)?;
    assert_eq!(whole.len(), (image.width() * image.height()) as usize);
    Ok(())
}

#[test]
fn export_checks() -> Result<(), Error> {
    let block = PixelBlock::packed(&[1, 2, 3], 3, 1, Mode::L)?;
    let image = import(&block, LumaWeights::default())?;

    assert_eq!(export(&image, Mode::Rgb), Err(Error::BadParameter));
    assert_eq!(export(&image, Mode::I), Err(Error::BadDepth));
    assert_eq!(
        export_rect(&image, Mode::L, image.width() + 1, 1),
        Err(Error::BadImageDimensions)
    );
    Ok(())
}
