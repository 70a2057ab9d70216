use super::*;

#[test]
fn mul_div255_endpoints() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
}

#[test]
fn mul_div255_rounds_to_nearest() {
    // 100 * 128 / 255 = 50.196...
    assert_eq!(mul_div255_u16(100, 128), 50);
    // 200 * 128 / 255 = 100.39...
    assert_eq!(mul_div255_u16(200, 128), 100);
}

#[test]
fn add_sat_clamps() {
    assert_eq!(add_sat_u8(200, 100), 255);
    assert_eq!(add_sat_u8(1, 2), 3);
}
