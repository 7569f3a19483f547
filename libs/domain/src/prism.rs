use super::V3D;
use thiserror::Error;

/// Vertices of the reference prism.
///
/// The triangle `r, s >= -1, r + s <= 0` is extruded along `t` from -1 to +1.
pub const PRISM_VERTICES: [V3D; 6] = [
    V3D::from([-1.0, -1.0, -1.0]),
    V3D::from([1.0, -1.0, -1.0]),
    V3D::from([-1.0, 1.0, -1.0]),
    V3D::from([-1.0, -1.0, 1.0]),
    V3D::from([1.0, -1.0, 1.0]),
    V3D::from([-1.0, 1.0, 1.0]),
];

/// Number of faces on a prism (2 triangles and 3 quadrilaterals)
pub const NUM_PRISM_FACES: usize = 5;

/// Number of rigid transformations of a square (rotations and reflections)
pub const NUM_QUAD_ORIENTATIONS: u8 = 8;

/// Local vertex ids of the quadrilateral faces of the prism, keyed by face id.
///
/// Corners are listed counter-clockwise as seen from outside; corner 0 -> 1 is the
/// face-local ξ direction and corner 0 -> 3 is the face-local η direction.
const QUAD_FACE_VERTICES: [(usize, [usize; 4]); 3] = [
    (2, [0, 1, 4, 3]),
    (3, [1, 2, 5, 4]),
    (4, [0, 3, 5, 2]),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrismFace {
    Triangle,
    Quad([usize; 4]),
}

/// Topology of face `face_id` of the reference prism
pub fn prism_face(face_id: usize) -> Option<PrismFace> {
    match face_id {
        0 | 1 => Some(PrismFace::Triangle),
        _ => QUAD_FACE_VERTICES
            .iter()
            .find(|(id, _)| *id == face_id)
            .map(|(_, corners)| PrismFace::Quad(*corners)),
    }
}

/// A rigid transformation mapping the canonical vertex order of a quadrilateral face onto the
/// vertex order seen from the adjacent element.
///
/// Codes `0..=3` are counter-clockwise quarter turns; codes `4..=7` swap the two face directions
/// before applying `code % 4` quarter turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuadOrientation {
    code: u8,
}

impl QuadOrientation {
    pub fn from_code(code: u8) -> Result<Self, FaceMapError> {
        if code < NUM_QUAD_ORIENTATIONS {
            Ok(Self { code })
        } else {
            Err(FaceMapError::InvalidOrientation(code))
        }
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn is_reflected(&self) -> bool {
        self.code >= 4
    }

    pub fn quarter_turns(&self) -> u8 {
        self.code % 4
    }

    /// Transform a pair of face-local coordinates
    pub fn apply(&self, xi: f64, eta: f64) -> [f64; 2] {
        let (xi, eta) = if self.is_reflected() { (eta, xi) } else { (xi, eta) };

        match self.quarter_turns() {
            0 => [xi, eta],
            1 => [-eta, xi],
            2 => [-xi, -eta],
            3 => [eta, -xi],
            _ => unreachable!(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceMapError {
    #[error("Face {0} does not exist on a prism; Cannot map quadrilateral face coordinates!")]
    FaceDoesntExist(usize),
    #[error("Face {0} of a prism is a triangle; Cannot map quadrilateral face coordinates onto it!")]
    NotAQuadFace(usize),
    #[error("Orientation code {0} is not a valid quadrilateral orientation (expected 0..=7)")]
    InvalidOrientation(u8),
}

/// Corner vertices of quadrilateral face `face_id`
pub fn quad_face_corners(face_id: usize) -> Result<[V3D; 4], FaceMapError> {
    match prism_face(face_id) {
        Some(PrismFace::Quad(ids)) => Ok([
            PRISM_VERTICES[ids[0]],
            PRISM_VERTICES[ids[1]],
            PRISM_VERTICES[ids[2]],
            PRISM_VERTICES[ids[3]],
        ]),
        Some(PrismFace::Triangle) => Err(FaceMapError::NotAQuadFace(face_id)),
        None => Err(FaceMapError::FaceDoesntExist(face_id)),
    }
}

/// Signed distance of `point` from the plane of quadrilateral face `face_id` (zero on the face)
pub fn face_constraint(face_id: usize, point: V3D) -> Result<f64, FaceMapError> {
    match face_id {
        2 => Ok(point.s() + 1.0),
        3 => Ok(point.r() + point.s()),
        4 => Ok(point.r() + 1.0),
        0 | 1 => Err(FaceMapError::NotAQuadFace(face_id)),
        _ => Err(FaceMapError::FaceDoesntExist(face_id)),
    }
}

/// Map a single pair of face-local coordinates onto quadrilateral face `face_id` of the prism.
///
/// Quad faces of the reference prism are parallelograms, so the map is affine and exact.
pub fn quad_face_point_to_prism(
    corners: &[V3D; 4],
    orientation: QuadOrientation,
    xi: f64,
    eta: f64,
) -> V3D {
    let [xi_o, eta_o] = orientation.apply(xi, eta);
    let d_xi = corners[1] - corners[0];
    let d_eta = corners[3] - corners[0];

    corners[0] + d_xi * (0.5 * (xi_o + 1.0)) + d_eta * (0.5 * (eta_o + 1.0))
}

/// Convert the tensor-product 2D integration points of a quadrilateral face into 3D parametric
/// coordinates of the adjacent prism.
///
/// The first face-local direction varies fastest. Returns the `r`, `s` and `t` coordinates as
/// separate vectors, each of length `r_line.len()^2`.
pub fn convert_quad_face_to_prism(
    r_line: &[f64],
    face_id: usize,
    orientation: u8,
) -> Result<[Vec<f64>; 3], FaceMapError> {
    let corners = quad_face_corners(face_id).map_err(|err| {
        log::error!("{}", err);
        err
    })?;
    let orientation = QuadOrientation::from_code(orientation).map_err(|err| {
        log::error!("{}", err);
        err
    })?;

    let n_points = r_line.len() * r_line.len();
    let mut r = Vec::with_capacity(n_points);
    let mut s = Vec::with_capacity(n_points);
    let mut t = Vec::with_capacity(n_points);

    for eta in r_line.iter() {
        for xi in r_line.iter() {
            let point = quad_face_point_to_prism(&corners, orientation, *xi, *eta);
            r.push(point.r());
            s.push(point.s());
            t.push(point.t());
        }
    }

    Ok([r, s, t])
}
