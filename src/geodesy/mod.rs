pub mod ellipsoid;
pub mod transform;
