/// Rotates a local North-East-Up displacement into a geocentric XYZ delta.
///
/// `latitude` and `longitude` are the station's reference angles in radians.
/// The rotation is exact and depends only on orientation, not on height or
/// ellipsoid. See Nørbech et al. (2003), "Transformation from a Common Nordic
/// Reference Frame to ETRS89 in Denmark, Finland, Norway, and Sweden".
pub fn neu_to_xyz(latitude: f64, longitude: f64, neu: [f64; 3]) -> [f64; 3] {
    let (s_lat, c_lat) = latitude.sin_cos();
    let (s_lon, c_lon) = longitude.sin_cos();
    let [dn, de, du] = neu;
    [
        -s_lat * c_lon * dn - s_lon * de + c_lat * c_lon * du,
        -s_lat * s_lon * dn + c_lon * de + c_lat * s_lon * du,
        c_lat * dn + s_lat * du,
    ]
}

/// Inverse of [`neu_to_xyz`]: the transpose of the same rotation.
pub fn xyz_to_neu(latitude: f64, longitude: f64, xyz: [f64; 3]) -> [f64; 3] {
    let (s_lat, c_lat) = latitude.sin_cos();
    let (s_lon, c_lon) = longitude.sin_cos();
    let [dx, dy, dz] = xyz;
    [
        -s_lat * c_lon * dx - s_lat * s_lon * dy + c_lat * dz,
        -s_lon * dx + c_lon * dy,
        c_lat * c_lon * dx + c_lat * s_lon * dy + s_lat * dz,
    ]
}
