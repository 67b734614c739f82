//! Benchmarks erosion and dilation by the unit ball.
use brunch::Bench;

use image_morph::{dilate, erode, Cpu, Depth, DirSet, Edge, Error, Grid, Image};

type Operator = fn(&Cpu, &Image, &mut Image, u32, DirSet, Grid, Edge) -> Result<(), Error>;

struct Morphology {
    depth: Depth,
    grid: Grid,
    erode: bool,
    sz: u32,
}

impl Morphology {
    fn name(&self) -> String {
        let op = if self.erode { "erode" } else { "dilate" };
        format!("{}({:?}, {:?}, {})", op, self.depth, self.grid, self.sz)
    }

    fn prepare(self) -> Result<impl FnMut(), Error> {
        let mut from = Image::new(self.sz, self.sz, self.depth)?;
        let max = self.depth.max_value();
        for y in (0..self.sz).step_by(3) {
            for x in (0..self.sz).step_by(5) {
                from.set_pixel(x, y, max)?;
            }
        }

        let mut into = from.like(self.depth)?;
        let (grid, ball) = (self.grid, DirSet::all(self.grid));
        let op: Operator = if self.erode { erode } else { dilate };

        Ok(move || op(&Cpu, &from, &mut into, 1, ball, grid, Edge::Empty).unwrap())
    }
}

fn main() {
    let mut tests = Vec::new();
    for depth in [Depth::Bit, Depth::Byte, Depth::Word] {
        for grid in [Grid::Square, Grid::Hexagonal] {
            for erode in [false, true] {
                tests.push(Morphology {
                    depth,
                    grid,
                    erode,
                    sz: 256,
                });
            }
        }
    }

    let mut benches = brunch::Benches::default();
    benches.extend(tests.into_iter().map(|morphology| {
        Bench::new(format!("morph::neighbor::main::{}", morphology.name()))
            .run(morphology.prepare().expect("Failed to setup benchmark"))
    }));
    benches.finish();
}
