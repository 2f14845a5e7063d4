use super::*;

#[test]
fn none_overwrites() {
    assert_eq!(
        blend_pixel([1, 2, 3, 4], [5, 6, 7, 0], BlendMode::None),
        [5, 6, 7, 0]
    );
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_half_alpha_on_opaque_mixes_evenly() {
    let dst = [0, 0, 0, 255];
    let src = [255, 255, 255, 128];
    let out = over(dst, src);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 128);
}

#[test]
fn addition_saturates_every_channel() {
    assert_eq!(
        add([200, 10, 0, 250], [100, 10, 5, 10]),
        [255, 20, 5, 255]
    );
}

#[test]
fn mod_multiplies_channels() {
    assert_eq!(
        modulate([255, 128, 0, 255], [255, 255, 255, 128]),
        [255, 128, 0, 128]
    );
    assert_eq!(modulate([200, 200, 200, 200], [0, 0, 0, 0]), [0, 0, 0, 0]);
}

#[test]
fn blend_row_applies_mode_per_pixel() {
    let mut dst = vec![10u8, 10, 10, 10, 250, 250, 250, 250];
    let src = vec![5u8, 5, 5, 5, 10, 10, 10, 10];
    blend_row_in_place(&mut dst, &src, BlendMode::Addition);
    assert_eq!(dst, vec![15, 15, 15, 15, 255, 255, 255, 255]);
}

#[test]
fn blend_mode_defaults_to_blend() {
    assert_eq!(BlendMode::default(), BlendMode::Blend);
    let parsed: BlendMode = serde_json::from_str(r#""mod""#).unwrap();
    assert_eq!(parsed, BlendMode::Mod);
}
