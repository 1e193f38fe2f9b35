//! End-to-end scenarios for the GLSL/OpenCL emitters, built from real
//! `shade-frontend` programs rather than hand-assembled `AstNode` trees.
//!
//! Covers spec.md §8's scenarios S1-S6: an empty program, scalar identity,
//! a vector swizzle, a while loop with compound assignment, a
//! Mandelbrot-like kernel exercising nested control flow and builtins, and
//! an OpenCL buffer signature.

use shade_codegen::{emit_glsl, emit_opencl};
use shade_frontend::*;

/// S1: const-data, out-data, and main all empty.
struct EmptyProgram;

impl Program for EmptyProgram {
    fn main(&mut self) {}
}

#[test]
fn s1_empty_program_has_no_uniforms_or_outputs() {
    let ast = parse(&mut EmptyProgram);
    let src = emit_glsl(&ast).unwrap();
    assert!(src.contains("#version 330"));
    assert!(src.contains("noperspective in vec2 index;"));
    assert!(src.contains("noperspective in vec2 normalized_index;"));
    assert!(!src.lines().any(|l| l.trim_start().starts_with("uniform ")));
    assert!(!src.lines().any(|l| l.trim_start().starts_with("layout")));
    let main_start = src.find("void main()").expect("main entry point");
    assert!(!src[main_start..].contains(';'), "an empty Main block must emit no statements");
}

/// S2: one scalar input copied straight to one scalar output.
#[derive(Default)]
struct ScalarIdentity {
    input: Option<Float>,
    output: Option<Float>,
}

impl Program for ScalarIdentity {
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

#[test]
fn s2_scalar_identity() {
    let ast = parse(&mut ScalarIdentity::default());
    let src = emit_glsl(&ast).unwrap();
    assert!(src.contains("uniform float a;"));
    assert!(src.contains("layout (location = 0) out float b;"));
    assert!(src.contains("b = a;"));
    assert!(!src.contains("float b = a;"));
}

/// S3: a single `Float2` input's `.x` swizzled out to a scalar output.
#[derive(Default)]
struct VectorSwizzle {
    input: Option<Float2>,
    output: Option<Float>,
}

impl Program for VectorSwizzle {
    fn const_data(&mut self) {
        self.input = Some(const_input("value"));
    }

    fn out_data(&mut self) {
        self.output = Some(output("value"));
    }

    fn main(&mut self) {
        let mut inp = self.input.take().expect("const_data runs before main");
        let mut out = self.output.take().expect("out_data runs before main");
        out.assign(inp.x());
    }
}

#[test]
fn s3_vector_swizzle() {
    let ast = parse(&mut VectorSwizzle::default());
    let src = emit_glsl(&ast).unwrap();
    assert!(src.contains("uniform vec2 a;"));
    assert!(src.contains("layout (location = 0) out float b;"));
    assert!(src.contains("b = a.x;"));
}

/// S4: a fresh local counted up to 10 with `+=` inside a `while`.
struct WhileCompoundAssign;

impl Program for WhileCompoundAssign {
    fn main(&mut self) {
        let mut i = Int::fresh();
        i.assign(Int::new(0));
        while_loop(i.lt(&Int::new(10)), || {
            i.add_assign(Int::new(1));
        });
    }
}

#[test]
fn s4_while_plus_compound_assign() {
    let ast = parse(&mut WhileCompoundAssign);
    let src = emit_glsl(&ast).unwrap();
    assert!(src.contains("int a = 0;"));
    let body: String = src.chars().filter(|c| !c.is_whitespace()).collect();
    assert!(body.contains("while((a<10))"));
    assert!(body.contains("a=(a+1);"));
}

/// S5: a Mandelbrot-like kernel -- normalized-index remap, an iterate-until
/// bound-or-budget `while` loop, and a closing `sqrt`/`log` expression.
#[derive(Default)]
struct MandelbrotLike {
    mn: Option<Float2>,
    mx: Option<Float2>,
    o: Option<Float>,
}

const MAX_ITER: i32 = 50;

impl Program for MandelbrotLike {
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

#[test]
fn s5_mandelbrot_like_kernel() {
    let ast = parse(&mut MandelbrotLike::default());
    let src = emit_glsl(&ast).unwrap();
    assert!(src.contains("normalized_index"));
    let body: String = src.chars().filter(|c| !c.is_whitespace()).collect();
    // the remap multiplication is parenthesized regardless of GLSL's own
    // precedence rules (spec.md §4.5's parenthesization rule)
    assert!(body.contains("*("));
    assert!(body.contains("&&"));
    assert!(src.contains("sqrt("));
    assert!(src.contains("while ("));
}

/// S6: a 2D float3 buffer input alongside a scalar output, lowered for
/// OpenCL.
#[derive(Default)]
struct BufferKernel {
    img: Option<Buffer2D<Float3>>,
    result: Option<Float>,
}

impl Program for BufferKernel {
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

#[test]
fn s6_opencl_buffer_signature() {
    let ast = parse(&mut BufferKernel::default());
    let src = emit_opencl(&ast).unwrap();
    assert!(src.contains("uint a_width"));
    assert!(src.contains("uint a_height"));
    assert!(src.contains("const __global float3* a"));
    assert!(src.contains("__global float* b"));
}

#[test]
fn glsl_and_opencl_agree_on_scalar_identity() {
    let ast = parse(&mut ScalarIdentity::default());
    let glsl = emit_glsl(&ast).unwrap();
    let opencl = emit_opencl(&ast).unwrap();
    assert!(glsl.contains("b = a;"));
    assert!(opencl.contains("b = a;"));
}

/// Universal invariant 1 (spec.md §8): two back-to-back captures of the
/// same program object yield structurally equal ASTs.
#[test]
fn structural_determinism_across_repeated_captures() {
    let first = parse(&mut MandelbrotLike::default());
    let second = parse(&mut MandelbrotLike::default());
    assert_eq!(first, second);
}

/// Universal invariant 5 (spec.md §8): every binary-operator emission's
/// outermost non-identifier characters are `(` and `)` around the pair of
/// operands, regardless of the target's own precedence rules.
#[test]
fn every_binary_operator_is_parenthesized() {
    struct Arithmetic;
    impl Program for Arithmetic {
        fn main(&mut self) {
            let mut out = Int::fresh();
            // captured as `(a + (b * c))`, not flattened by precedence
            out.assign(Int::new(1) + Int::new(2) * Int::new(3));
        }
    }
    let ast = parse(&mut Arithmetic);
    let src = emit_glsl(&ast).unwrap();
    let body: String = src.chars().filter(|c| !c.is_whitespace()).collect();
    assert!(body.contains("=(1+(2*3));"));
}
