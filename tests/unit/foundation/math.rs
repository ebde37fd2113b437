use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(100, 128), ((100u16 * 128 + 127) / 255) as u8);
}

#[test]
fn opaque_pixels_survive_premul_roundtrip() {
    let px = [12, 200, 99, 255];
    assert_eq!(unpremultiply_px(premultiply_px(px)), px);
}

#[test]
fn transparent_pixels_collapse_to_zero() {
    assert_eq!(premultiply_px([200, 10, 10, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremultiply_px([0, 0, 0, 0]), [0, 0, 0, 0]);
}

#[test]
fn half_alpha_unpremultiply_is_close() {
    let straight = [200, 100, 50, 128];
    let back = unpremultiply_px(premultiply_px(straight));
    for i in 0..3 {
        assert!((i32::from(back[i]) - i32::from(straight[i])).abs() <= 2);
    }
    assert_eq!(back[3], 128);
}

#[test]
fn degrees_convert_to_radians() {
    assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
    assert!((deg_to_rad(-90.0) + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}
