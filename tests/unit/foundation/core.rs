use super::*;

#[test]
fn hex_parsing_accepts_short_long_and_alpha_forms() {
    assert_eq!(Rgba8::from_hex("#FFFFFF").unwrap(), Rgba8::WHITE);
    assert_eq!(Rgba8::from_hex("fff").unwrap(), Rgba8::WHITE);
    assert_eq!(
        Rgba8::from_hex("#3B82F680").unwrap(),
        Rgba8 {
            r: 0x3B,
            g: 0x82,
            b: 0xF6,
            a: 0x80
        }
    );
}

#[test]
fn hex_parsing_rejects_garbage() {
    assert!(Rgba8::from_hex("").is_err());
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#GGGGGG").is_err());
    assert!(Rgba8::from_hex("#ééé").is_err());
}

#[test]
fn display_uses_short_form_for_opaque_colors() {
    assert_eq!(Rgba8::rgb(1, 2, 255).to_string(), "#0102FF");
    let translucent = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 16,
    };
    assert_eq!(translucent.to_string(), "#00000010");
}

#[test]
fn serde_goes_through_hex_strings() {
    let json = serde_json::to_string(&Rgba8::rgb(255, 0, 0)).unwrap();
    assert_eq!(json, "\"#FF0000\"");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Rgba8::rgb(255, 0, 0));
    assert!(serde_json::from_str::<Rgba8>("\"red\"").is_err());
}

#[test]
fn premul_scales_color_by_alpha() {
    let c = Rgba8 {
        r: 200,
        g: 100,
        b: 0,
        a: 128,
    };
    assert_eq!(c.to_premul(), [100, 50, 0, 128]);
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
}
