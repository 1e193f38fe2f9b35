//! A small catalog of named example [`Program`]s the CLI can drive through
//! a capture + emit pass without the caller having to write Rust.
//!
//! `mandelbrot` is transcribed from `Mandelbrot/Main.cpp`'s loop shape
//! (normalized-index remap, iterate-while-bounded-and-budgeted, closing
//! `log`/`sqrt` expression) through this crate's eDSL surface; `identity`
//! and `counter` are small enough to serve as smoke tests for either
//! backend.

use shade_frontend::*;

/// Copies a single scalar uniform straight to a single scalar output.
#[derive(Default)]
pub struct Identity {
    input: Option<Float>,
    output: Option<Float>,
}

impl Program for Identity {
    fn const_data(&mut self) {
        self.input = Some(const_input("value"));
    }

    fn out_data(&mut self) {
        self.output = Some(output("value"));
    }

    fn main(&mut self) {
        let mut out = self.output.take().expect("out_data runs before main");
        let inp = self.input.take().expect("const_data runs before main");
        out.assign(inp);
    }
}

/// Counts a fresh local up to ten inside a `while` loop, exercising
/// compound assignment and loop emission.
pub struct Counter;

impl Program for Counter {
    fn main(&mut self) {
        let mut i = Int::fresh();
        i.assign(Int::new(0));
        while_loop(i.lt(&Int::new(10)), || {
            i.add_assign(Int::new(1));
        });
    }
}

/// A Mandelbrot-like iteration kernel: remaps the fragment's normalized
/// index into a complex-plane window bounded by `mn`/`mx`, iterates the
/// escape-time recurrence up to a fixed budget, and writes a normalized
/// escape-speed value to `o`.
#[derive(Default)]
pub struct Mandelbrot {
    mn: Option<Float2>,
    mx: Option<Float2>,
    o: Option<Float>,
}

const MAX_ITER: i32 = 50;

impl Program for Mandelbrot {
    fn const_data(&mut self) {
        self.mn = Some(const_input("mn"));
        self.mx = Some(const_input("mx"));
    }

    fn out_data(&mut self) {
        self.o = Some(output("o"));
    }

    fn main(&mut self) {
        let mn = self.mn.take().expect("const_data runs before main");
        let mx = self.mx.take().expect("const_data runs before main");
        let mut o = self.o.take().expect("out_data runs before main");

        let ni = normalized_index();
        let span = &mx - &mn;
        let scaled = &ni * &span;
        let mut val0 = Float2::fresh();
        val0.assign(&scaled + &mn);

        let mut zx = Float::fresh();
        zx.assign(val0.x());
        let mut zy = Float::fresh();
        zy.assign(val0.y());
        let cx = val0.x();
        let cy = val0.y();

        let mut iter = Int::fresh();
        iter.assign(Int::new(0));

        let mag2 = &zx * &zx + &zy * &zy;
        let bounded = mag2.lt(&Float::new(4.0));
        let budget_left = iter.lt(&Int::new(MAX_ITER));
        let cond = bounded.and(budget_left);

        while_loop(cond, || {
            let nzx = &zx * &zx - &zy * &zy + cx;
            let nzy = (&zx * &zy) + (&zx * &zy) + cy;
            zx.assign(nzx);
            zy.assign(nzy);
            iter.add_assign(Int::new(1));
        });

        let iter_f: Float = cast(iter);
        let numerator = log(iter_f + Float::new(1.0));
        let denominator = log(Float::new((MAX_ITER + 1) as f32));
        o.assign(sqrt(Float::new(1.0) - numerator / denominator));
    }
}

/// Samples a `Float3` 2D buffer at a fixed texel and writes its red
/// channel to a scalar output; exercises buffer parameter expansion on
/// whichever backend it's lowered for.
#[derive(Default)]
pub struct BufferSample {
    img: Option<Buffer2D<Float3>>,
    result: Option<Float>,
}

impl Program for BufferSample {
    fn const_data(&mut self) {
        self.img = Some(Buffer2D::new("img"));
    }

    fn out_data(&mut self) {
        self.result = Some(output("result"));
    }

    fn main(&mut self) {
        let img = self.img.take().expect("const_data runs before main");
        let mut result = self.result.take().expect("out_data runs before main");
        let mut px = img.sample(Int::new(0), Int::new(0));
        result.assign(px.x());
    }
}

/// Looks up a demo's captured AST by name, or `None` if `name` doesn't
/// match any catalog entry.
pub fn capture_by_name(name: &str) -> Option<AstNode> {
    Some(match name {
        "identity" => shade_frontend::parse(&mut Identity::default()),
        "counter" => shade_frontend::parse(&mut Counter),
        "mandelbrot" => shade_frontend::parse(&mut Mandelbrot::default()),
        "buffer-sample" => shade_frontend::parse(&mut BufferSample::default()),
        _ => return None,
    })
}

/// The names `capture_by_name` accepts, in catalog order, for `--help`
/// text and error messages.
pub const NAMES: &[&str] = &["identity", "counter", "mandelbrot", "buffer-sample"];
