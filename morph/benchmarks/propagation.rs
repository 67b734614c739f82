//! Benchmarks the queue driven operators.
use brunch::Bench;

use image_morph::{basin_segment, build, compute_distance, Depth, Edge, Error, Grid, Image};

#[derive(Clone, Copy, Debug)]
enum Operator {
    Build,
    Distance,
    Basins,
}

struct Propagate {
    op: Operator,
    grid: Grid,
    sz: u32,
}

impl Propagate {
    fn name(&self) -> String {
        format!("{:?}({:?}, {})", self.op, self.grid, self.sz)
    }

    /// A relief of concentric rings, so that every level is populated.
    fn relief(&self) -> Result<Image, Error> {
        let mut relief = Image::new(self.sz, self.sz, Depth::Byte)?;
        let c = self.sz / 2;
        for y in 0..self.sz {
            for x in 0..self.sz {
                let ring = (x.abs_diff(c) + y.abs_diff(c)) % 256;
                relief.set_pixel(x, y, ring)?;
            }
        }
        Ok(relief)
    }

    fn prepare(self) -> Result<Box<dyn FnMut()>, Error> {
        let (grid, sz) = (self.grid, self.sz);
        let relief = self.relief()?;

        Ok(match self.op {
            Operator::Build => {
                let mut marker = relief.like(Depth::Byte)?;
                Box::new(move || {
                    marker.reset();
                    marker.set_pixel(0, 0, 255).unwrap();
                    build(&relief, &mut marker, grid).unwrap()
                })
            }
            Operator::Distance => {
                let mut set = Image::new(sz, sz, Depth::Bit)?;
                set.fill(1)?;
                let mut into = set.like(Depth::Word)?;
                Box::new(move || compute_distance(&set, &mut into, grid, Edge::Empty).unwrap())
            }
            Operator::Basins => {
                let mut marker = relief.like(Depth::Word)?;
                Box::new(move || {
                    marker.reset();
                    marker.set_pixel(0, 0, 1).unwrap();
                    marker.set_pixel(sz - 1, sz - 1, 2).unwrap();
                    basin_segment(&relief, &mut marker, grid, 256).unwrap()
                })
            }
        })
    }
}

fn main() {
    let mut tests = Vec::new();
    for op in [Operator::Build, Operator::Distance, Operator::Basins] {
        for grid in [Grid::Square, Grid::Hexagonal] {
            tests.push(Propagate { op, grid, sz: 256 });
        }
    }

    let mut benches = brunch::Benches::default();
    benches.extend(tests.into_iter().map(|propagate| {
        Bench::new(format!("morph::propagation::main::{}", propagate.name()))
            .run(propagate.prepare().expect("Failed to setup benchmark"))
    }));
    benches.finish();
}
