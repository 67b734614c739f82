//! Benchmarks importing pixel blocks.
use brunch::Bench;

use image_morph::Error;
use image_morph_bridge::{import, LumaWeights, Mode, PixelBlock};

struct Import {
    mode: Mode,
    sz: u32,
}

impl Import {
    fn name(&self) -> String {
        format!("import({}, {})", self.mode.name(), self.sz)
    }

    fn prepare(self) -> Result<impl FnMut(), Error> {
        let len = (self.sz * self.sz) as usize * self.mode.bytes_per_pixel();
        let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        // Keeps float pixels finite.
        let data = if self.mode == Mode::F { vec![0x3f; len] } else { data };

        let (mode, sz) = (self.mode, self.sz);
        PixelBlock::packed(&data, sz, sz, mode)?;

        Ok(move || {
            let block = PixelBlock::packed(&data, sz, sz, mode).unwrap();
            import(&block, LumaWeights::default()).unwrap();
        })
    }
}

fn main() {
    let tests = Mode::ALL.map(|mode| Import { mode, sz: 256 });

    let mut benches = brunch::Benches::default();
    benches.extend(tests.map(|import| {
        Bench::new(format!("bridge::import::main::{}", import.name()))
            .run(import.prepare().expect("Failed to setup benchmark"))
    }));
    benches.finish();
}
