use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ThumbError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        ThumbError::asset_load("x")
            .to_string()
            .contains("asset load failure:")
    );
    assert!(ThumbError::render("x").to_string().contains("render error:"));
    assert!(ThumbError::export("x").to_string().contains("export error:"));
}

#[test]
fn stale_result_names_both_generations() {
    let err = ThumbError::StaleResult {
        ticket: 3,
        current: 5,
    };
    assert!(err.is_stale());
    let msg = err.to_string();
    assert!(msg.contains('3'));
    assert!(msg.contains('5'));
    assert!(!ThumbError::invalid_input("x").is_stale());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ThumbError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
