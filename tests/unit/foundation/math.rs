use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 128), 64);
    assert_eq!(mul_div255_u16(230, 130), 117);
}

#[test]
fn wrap_source_handles_both_directions() {
    // Shifting right by 2: destination 0 reads from the last-but-one column.
    assert_eq!(wrap_source(0, 2, 5), 3);
    assert_eq!(wrap_source(4, 2, 5), 2);
    // Shifting left by 1: destination 4 reads from column 0.
    assert_eq!(wrap_source(4, -1, 5), 0);
    // Shifts larger than the row wrap more than once.
    assert_eq!(wrap_source(1, 11, 5), 0);
}

#[test]
fn trig_pixels_round_half_away_from_zero() {
    assert_eq!(sin_px(0.0, 2.0), 0);
    assert_eq!(cos_px(0.0, 2.0), 2);
    assert_eq!(sin_px(std::f64::consts::FRAC_PI_2, 3.0), 3);
    assert_eq!(sin_px(-std::f64::consts::FRAC_PI_2, 3.0), -3);
    // sin(0.8) * 3 = 2.152..
    assert_eq!(sin_px(0.8, 3.0), 2);
}
