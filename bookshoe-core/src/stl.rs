/// STL export of shoe meshes, and a reader for checking what was written
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};
use tracing::info;

use crate::geometry::{Mesh, Triangle};
use nalgebra::Point3;

const HEADER_LEN: usize = 80;
const RECORD_LEN: usize = 50;

/// Must not begin with `solid`, or readers take the file for ASCII
const BINARY_HEADER: &[u8] = b"bookshoe binary STL";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StlError {
    #[error("file too small to be a valid STL")]
    TooShort,

    #[error("unexpected end of file: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("failed to parse ASCII STL: {0}")]
    Ascii(String),
}

/// STL flavour to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// Serialize a mesh in the requested flavour
pub fn export(mesh: &Mesh, format: StlFormat) -> Vec<u8> {
    let bytes = match format {
        StlFormat::Binary => to_binary_stl(mesh),
        StlFormat::Ascii => to_ascii_stl(mesh, "bookshoe").into_bytes(),
    };
    info!(
        ?format,
        triangles = mesh.triangle_count(),
        bytes = bytes.len(),
        "exported STL"
    );
    bytes
}

/// Binary STL: header, triangle count, then one 50-byte record per triangle
pub fn to_binary_stl(mesh: &Mesh) -> Vec<u8> {
    let count = mesh.triangle_count();
    let mut data = Vec::with_capacity(HEADER_LEN + 4 + count * RECORD_LEN);

    let mut header = [0u8; HEADER_LEN];
    header[..BINARY_HEADER.len()].copy_from_slice(BINARY_HEADER);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(count as u32).to_le_bytes());

    for triangle in mesh.triangles() {
        let normal = triangle.normal().cast::<f32>();
        for component in normal.iter() {
            data.extend_from_slice(&component.to_le_bytes());
        }
        for vertex in &triangle.vertices {
            for component in vertex.iter() {
                data.extend_from_slice(&(*component as f32).to_le_bytes());
            }
        }
        // Attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    data
}

/// ASCII STL with one facet per triangle
pub fn to_ascii_stl(mesh: &Mesh, name: &str) -> String {
    let mut out = format!("solid {name}\n");

    for triangle in mesh.triangles() {
        let n = triangle.normal().cast::<f32>();
        out.push_str(&format!("  facet normal {:e} {:e} {:e}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for v in &triangle.vertices {
            let v = v.cast::<f32>();
            out.push_str(&format!("      vertex {:e} {:e} {:e}\n", v.x, v.y, v.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh, StlError> {
    if data.len() < HEADER_LEN + 4 {
        return Err(StlError::TooShort);
    }

    // Skip 80-byte header
    let data = &data[HEADER_LEN..];

    let triangle_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

    let truncated = StlError::Truncated {
        expected: triangle_count
            .saturating_mul(RECORD_LEN)
            .saturating_add(HEADER_LEN + 4),
        actual: HEADER_LEN + data.len(),
    };
    let expected = match triangle_count
        .checked_mul(RECORD_LEN)
        .and_then(|records| records.checked_add(4))
    {
        Some(expected) if expected <= data.len() => expected,
        _ => return Err(truncated),
    };

    let mut mesh = Mesh::with_capacity(triangle_count);
    for record in data[4..expected].chunks_exact(RECORD_LEN) {
        // Normals are recomputed from the winding, skip them
        let v0 = read_point(&record[12..24]);
        let v1 = read_point(&record[24..36]);
        let v2 = read_point(&record[36..48]);
        mesh.push_triangle(v0, v1, v2);
    }

    Ok(mesh)
}

fn read_f32(bytes: &[u8]) -> f32 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn read_point(bytes: &[u8]) -> Point3<f64> {
    Point3::new(
        read_f32(&bytes[0..4]) as f64,
        read_f32(&bytes[4..8]) as f64,
        read_f32(&bytes[8..12]) as f64,
    )
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh, StlError> {
    match parse_ascii_stl_impl(input) {
        Ok((_, mesh)) => Ok(mesh),
        Err(e) => Err(StlError::Ascii(format!("{:?}", e))),
    }
}

fn parse_ascii_stl_impl(input: &str) -> IResult<&str, Mesh> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _) = not_line_ending(input)?; // Optional name
    let (input, triangles) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;

    let mut mesh = Mesh::with_capacity(triangles.len());
    for triangle in triangles {
        let [v0, v1, v2] = triangle.vertices;
        mesh.push_triangle(v0, v1, v2);
    }

    Ok((input, mesh))
}

fn parse_facet(input: &str) -> IResult<&str, Triangle> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v1) = parse_vertex(input)?;
    let (input, v2) = parse_vertex(input)?;
    let (input, v3) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, Triangle::new(v1, v2, v3)))
}

fn parse_vertex(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    let (input, (x, y, z)) = parse_vector3(input)?;
    Ok((input, Point3::new(x as f64, y as f64, z as f64)))
}

fn parse_vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, (x, y, z)))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Mesh, StlError> {
    if data.len() > 5 && &data[0..5] == b"solid" {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                return Ok(mesh);
            }
        }
    }

    parse_binary_stl(data)
}
