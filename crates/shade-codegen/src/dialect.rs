//! What differs between the GLSL and OpenCL C backends: type spellings,
//! how a buffer sample expands, and whether the per-fragment coordinate
//! builtins make sense at all. Every other rule (operator
//! parenthesization, first-use declaration, control-flow bracing) is
//! identical and lives in [`crate::visitor`].

use shade_core::{ElementKind, TypeTag, Width};

use crate::error::EmitError;

/// The coordinate arguments a two-dimensional sample was called with --
/// either the `(x, y)` overload or the single-`Int2` overload (spec.md
/// §9 Open Question 3).
pub enum SampleCoord2D {
    Separate(String, String),
    Packed(String),
}

fn width_swizzle(ty: TypeTag) -> &'static str {
    match ty.width() {
        Width::One => ".x",
        Width::Two => ".xy",
        Width::Three => ".xyz",
        Width::Four => ".xyzw",
    }
}

pub trait Dialect {
    /// The target language's name, used only in error messages.
    const NAME: &'static str;

    /// Spells a non-buffer element/vector type tag (`Int2` -> `ivec2` for
    /// GLSL, `Int2` -> `int2` for OpenCL).
    fn scalar_type_name(ty: TypeTag) -> Result<&'static str, EmitError>;

    /// Spells a buffer-qualified type tag, used in declarations only.
    fn buffer_type_name(ty: TypeTag) -> Result<String, EmitError>;

    /// A `buffer[index]`/`texelFetch(buffer, index)`-style expression
    /// reading one element of a `Buffer1D`, already swizzled/cast down to
    /// `element_ty`.
    fn sample1d(buffer: &str, element_ty: TypeTag, index_code: &str) -> Result<String, EmitError>;

    /// As `sample1d`, for a `Buffer2D`.
    fn sample2d(buffer: &str, element_ty: TypeTag, coords: SampleCoord2D) -> Result<String, EmitError>;

    /// `GetIndex`'s expansion, or an error if this target has no notion
    /// of a per-fragment coordinate.
    fn fragment_index() -> Result<&'static str, EmitError>;

    /// `GetNormalizedIndex`'s expansion.
    fn normalized_fragment_index() -> Result<&'static str, EmitError>;
}

fn numeric_stem(ty: TypeTag) -> Option<(&'static str, &'static str, &'static str, &'static str)> {
    match ty.element_kind()? {
        ElementKind::Bool => Some(("bool", "bool", "bool", "bool")),
        ElementKind::Int => Some(("int", "int2", "int3", "int4")),
        ElementKind::UInt => Some(("uint", "uint2", "uint3", "uint4")),
        ElementKind::Float => Some(("float", "float2", "float3", "float4")),
    }
}

pub struct Glsl;

impl Dialect for Glsl {
    const NAME: &'static str = "GLSL";

    fn scalar_type_name(ty: TypeTag) -> Result<&'static str, EmitError> {
        if ty == TypeTag::VOID {
            return Ok("void");
        }
        let kind = ty
            .element_kind()
            .ok_or(EmitError::UnknownType { tag: ty, target: Self::NAME })?;
        Ok(match (kind, ty.width()) {
            (ElementKind::Bool, Width::One) => "bool",
            (ElementKind::Int, Width::One) => "int",
            (ElementKind::UInt, Width::One) => "uint",
            (ElementKind::Float, Width::One) => "float",
            (ElementKind::Int, Width::Two) => "ivec2",
            (ElementKind::UInt, Width::Two) => "uvec2",
            (ElementKind::Float, Width::Two) => "vec2",
            (ElementKind::Int, Width::Three) => "ivec3",
            (ElementKind::UInt, Width::Three) => "uvec3",
            (ElementKind::Float, Width::Three) => "vec3",
            (ElementKind::Int, Width::Four) => "ivec4",
            (ElementKind::UInt, Width::Four) => "uvec4",
            (ElementKind::Float, Width::Four) => "vec4",
            _ => return Err(EmitError::UnknownType { tag: ty, target: Self::NAME }),
        })
    }

    fn buffer_type_name(ty: TypeTag) -> Result<String, EmitError> {
        let kind = ty
            .element()
            .element_kind()
            .ok_or(EmitError::UnknownType { tag: ty, target: Self::NAME })?;
        let dim = ty.buffer_dim().ok_or(EmitError::UnknownType { tag: ty, target: Self::NAME })?;
        let stem = match kind {
            ElementKind::Int => "isampler",
            ElementKind::UInt => "usampler",
            ElementKind::Float => "sampler",
            ElementKind::Bool => return Err(EmitError::UnknownType { tag: ty, target: Self::NAME }),
        };
        let suffix = match dim {
            Width::One => "Buffer",
            Width::Two => "2DRect",
            _ => return Err(EmitError::UnknownType { tag: ty, target: Self::NAME }),
        };
        Ok(format!("{stem}{suffix}"))
    }

    fn sample1d(buffer: &str, element_ty: TypeTag, index_code: &str) -> Result<String, EmitError> {
        Ok(format!("texelFetch({buffer}, {index_code}){}", width_swizzle(element_ty)))
    }

    fn sample2d(buffer: &str, element_ty: TypeTag, coords: SampleCoord2D) -> Result<String, EmitError> {
        let coord_expr = match coords {
            SampleCoord2D::Packed(c) => c,
            SampleCoord2D::Separate(x, y) => format!("ivec2({x}, {y})"),
        };
        Ok(format!("texelFetch({buffer}, {coord_expr}){}", width_swizzle(element_ty)))
    }

    fn fragment_index() -> Result<&'static str, EmitError> {
        Ok("ivec2(index)")
    }

    fn normalized_fragment_index() -> Result<&'static str, EmitError> {
        Ok("normalized_index")
    }
}

pub struct OpenCl;

impl Dialect for OpenCl {
    const NAME: &'static str = "OpenCL";

    fn scalar_type_name(ty: TypeTag) -> Result<&'static str, EmitError> {
        if ty == TypeTag::VOID {
            return Ok("void");
        }
        let (w1, w2, w3, w4) =
            numeric_stem(ty).ok_or(EmitError::UnknownType { tag: ty, target: Self::NAME })?;
        Ok(match ty.width() {
            Width::One => w1,
            Width::Two => w2,
            Width::Three => w3,
            Width::Four => w4,
        })
    }

    fn buffer_type_name(ty: TypeTag) -> Result<String, EmitError> {
        // `StringBuffer::operator<<(ReturnType_t)` prints the plain element
        // type name for a buffer tag too, then appends a pointer sigil.
        let elem = Self::scalar_type_name(ty.element())?;
        Ok(format!("{elem}*"))
    }

    fn sample1d(buffer: &str, _element_ty: TypeTag, index_code: &str) -> Result<String, EmitError> {
        Ok(format!("{buffer}[{index_code}]"))
    }

    fn sample2d(buffer: &str, _element_ty: TypeTag, coords: SampleCoord2D) -> Result<String, EmitError> {
        let flat = match coords {
            SampleCoord2D::Separate(x, y) => format!("({y}) * {buffer}_width + ({x})"),
            SampleCoord2D::Packed(c) => format!("({c}).y * {buffer}_width + ({c}).x"),
        };
        Ok(format!("{buffer}[{flat}]"))
    }

    fn fragment_index() -> Result<&'static str, EmitError> {
        Err(EmitError::UnsupportedNode { kind: "GetIndex", target: Self::NAME })
    }

    fn normalized_fragment_index() -> Result<&'static str, EmitError> {
        Err(EmitError::UnsupportedNode { kind: "GetNormalizedIndex", target: Self::NAME })
    }
}
