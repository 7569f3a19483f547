mod prism;
mod vector_space_3d;

pub use prism::{
    convert_quad_face_to_prism, face_constraint, prism_face, quad_face_corners,
    quad_face_point_to_prism, FaceMapError, PrismFace, QuadOrientation, NUM_PRISM_FACES,
    NUM_QUAD_ORIENTATIONS, PRISM_VERTICES,
};
pub use vector_space_3d::V3D;
