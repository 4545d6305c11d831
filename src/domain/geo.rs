use crate::domain::model::Coordinates;

/// 地球半徑（公里）
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine 大圓距離，單位公里。
///
/// 相同座標回傳 0；平方根參數先限制在 [0, 1]，避免浮點誤差讓
/// 對蹠點附近的 `asin` 得到 NaN。
pub fn haversine_km(from: &Coordinates, to: &Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = (to.latitude - from.latitude).to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}
