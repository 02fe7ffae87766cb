use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlidecastError::invalid_slide("x")
            .to_string()
            .contains("invalid slide:")
    );
    assert!(
        SlidecastError::insufficient_audio("x")
            .to_string()
            .contains("insufficient audio duration:")
    );
    assert!(
        SlidecastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SlidecastError::media("x")
            .to_string()
            .contains("media error:")
    );
    assert!(
        SlidecastError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlidecastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_converts_via_from() {
    fn fails() -> SlidecastResult<()> {
        Err(anyhow::anyhow!("deep failure"))?;
        Ok(())
    }
    assert!(fails().unwrap_err().to_string().contains("deep failure"));
}
